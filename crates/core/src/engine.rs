//! The single state-transition function of the view.
//! This module exists to fold props updates, touches, button presses, and
//! clock ticks into a fresh `ViewState` plus the commands owed to the parent.
//! It does not own drawing; `compose` reads the state it produces.

mod hash;

use serde::{Deserialize, Serialize};

use crate::board::BoardLayers;
use crate::command::Command;
use crate::config::ViewConfig;
use crate::controls::{ControlAction, ControlPanel};
use crate::error::ViewResult;
use crate::gesture::{Gesture, GestureRouter, HighlightRect, Selection, TouchEvent, highlight_rects};
use crate::grid::CellIndex;
use crate::motion::{MotionEvent, SpriteMotion, sprite_anchor};
use crate::props::{ViewProps, ZoomLevel};
use crate::viewport::{Viewport, ViewportEvent};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    Props { props: Box<ViewProps>, now_ms: u64 },
    Touch(TouchEvent),
    Control { action: ControlAction, now_ms: u64 },
    Tick { now_ms: u64 },
}

impl ViewEvent {
    pub fn now_ms(&self) -> u64 {
        match self {
            ViewEvent::Props { now_ms, .. }
            | ViewEvent::Control { now_ms, .. }
            | ViewEvent::Tick { now_ms } => *now_ms,
            ViewEvent::Touch(touch) => touch.sample().now_ms,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Transition {
    pub state: ViewState,
    pub commands: Vec<Command>,
}

#[derive(Clone, Debug)]
pub struct ViewState {
    config: ViewConfig,
    props: ViewProps,
    level: ZoomLevel,
    layers: BoardLayers,
    viewport: Viewport,
    sprite: SpriteMotion,
    gestures: GestureRouter,
    panel: ControlPanel,
    highlight_rects: Vec<HighlightRect>,
    just_zoomed: bool,
    presented_feedback: Option<CellIndex>,
}

impl ViewState {
    pub fn mount(props: ViewProps, config: ViewConfig, now_ms: u64) -> ViewResult<Self> {
        config.validate()?;
        let level = props.validate()?;
        let actor = props.actor();
        let tile = props.tile_size;
        let player = props.acting_cell();
        let layers = BoardLayers::derive(&props.board, actor);

        let mut viewport = Viewport::new(config.screen, tile, player);
        if props.counters.turn_counter == 0
            && let Some(feedback) = props.board.first_feedback_cell(actor)
        {
            log::debug!("opening camera on feedback cell {}", feedback.get());
            viewport.snap_to(feedback);
        }
        viewport.recenter_on_player(now_ms, config.mount_recenter_ms);

        let mut panel = ControlPanel::default();
        panel.enforce(&props);

        let mut state = Self {
            sprite: SpriteMotion::new(actor, sprite_anchor(player, tile, level)),
            gestures: GestureRouter::new(&config),
            config,
            props,
            level,
            layers,
            viewport,
            panel,
            highlight_rects: Vec::new(),
            just_zoomed: false,
            presented_feedback: None,
        };
        state.refresh_rects();
        Ok(state)
    }

    /// Returns the successor state. On error `self` is untouched and stays current.
    pub fn apply(&self, event: &ViewEvent) -> ViewResult<Transition> {
        let mut state = self.clone();
        let mut commands = Vec::new();
        match event {
            ViewEvent::Props { props, now_ms } => state.on_props(props, *now_ms)?,
            ViewEvent::Touch(touch) => state.on_touch(touch, &mut commands),
            ViewEvent::Control { action, now_ms } => state.on_control(*action, *now_ms, &mut commands),
            ViewEvent::Tick { now_ms } => state.on_tick(*now_ms, &mut commands),
        }
        state.panel.enforce(&state.props);
        state.refresh_rects();
        Ok(Transition { state, commands })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    pub fn layers(&self) -> &BoardLayers {
        &self.layers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn sprite(&self) -> &SpriteMotion {
        &self.sprite
    }

    pub fn gestures(&self) -> &GestureRouter {
        &self.gestures
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn highlight_rects(&self) -> &[HighlightRect] {
        &self.highlight_rects
    }

    pub fn just_zoomed(&self) -> bool {
        self.just_zoomed
    }

    /// Tap-to-select is live only on the zoomed-in map with highlights showing.
    pub fn selection_enabled(&self) -> bool {
        self.panel.show_highlighted && self.level == ZoomLevel::In && self.props.moves_remaining()
    }

    fn on_props(&mut self, next: &ViewProps, now_ms: u64) -> ViewResult<()> {
        let level = next.validate()?;
        let actor = next.actor();

        if next.tile_size != self.props.tile_size {
            log::debug!("tile size {} -> {}", self.props.tile_size.get(), next.tile_size.get());
            self.viewport.set_tile_size(next.tile_size, now_ms);
            self.just_zoomed = true;
        }
        if next.is_human != self.props.is_human {
            log::debug!("acting actor switched to {actor:?}");
            self.sprite.set_actor(actor);
            self.just_zoomed = true;
        }
        self.viewport.track_player(next.acting_cell());

        let layers = BoardLayers::derive(&next.board, actor);
        if layers.highlight != self.layers.highlight {
            self.panel.show_highlighted = layers.any_highlighted() && !next.out_of_moves;
        }
        self.layers = layers;
        self.props = next.clone();
        self.level = level;

        let target = sprite_anchor(self.props.acting_cell(), self.props.tile_size, level);
        if self.just_zoomed {
            self.sprite.transport_to(target, now_ms, self.config.transport_ms);
        } else if let Some(duration) = self.sprite.walk_to(target, now_ms, &self.config) {
            self.viewport.recenter_on_player(now_ms, duration);
        }

        self.maybe_present_feedback(now_ms);
        Ok(())
    }

    fn maybe_present_feedback(&mut self, now_ms: u64) {
        let flags = &self.props.feedback;
        let wanted = if flags.highlight_feedback && self.props.feedback_pending() {
            flags.feedback_cell
        } else {
            None
        };
        match wanted {
            Some(cell) if self.presented_feedback != Some(cell) && !self.viewport.is_presenting() => {
                self.presented_feedback = Some(cell);
                self.viewport.present_feedback(
                    cell,
                    now_ms,
                    self.config.feedback_leg_ms,
                    self.config.feedback_hold_ms,
                );
            }
            Some(_) => {}
            None => self.presented_feedback = None,
        }
    }

    fn on_touch(&mut self, touch: &TouchEvent, commands: &mut Vec<Command>) {
        let now_ms = touch.sample().now_ms;
        let selection = Selection {
            enabled: self.selection_enabled(),
            offset: self.viewport.offset(now_ms),
            rects: &self.highlight_rects,
        };
        let Some(gesture) = self.gestures.handle(touch, &selection) else {
            return;
        };
        match gesture {
            Gesture::DoubleTap => commands.push(Command::AlterZoom),
            Gesture::Pan(delta) => self.viewport.pan(delta, now_ms),
            Gesture::Selected(cell) => {
                self.panel.controls_visible = false;
                self.panel.target_picker_visible = false;
                commands.push(Command::Move(cell));
                commands.push(Command::IncrementTurnCounter);
            }
            Gesture::Missed => {}
        }
    }

    fn on_control(&mut self, action: ControlAction, now_ms: u64, commands: &mut Vec<Command>) {
        if action == ControlAction::CenterCamera {
            self.viewport.recenter_on_player(now_ms, self.config.center_button_recenter_ms);
            return;
        }
        commands.extend(self.panel.apply(action, &self.props));
    }

    fn on_tick(&mut self, now_ms: u64, commands: &mut Vec<Command>) {
        if let Some(ViewportEvent::FeedbackPresented) = self.viewport.tick(now_ms) {
            commands.push(Command::FeedbackPresented);
        }
        match self.sprite.tick(now_ms) {
            Some(MotionEvent::WalkFinished(actor)) => {
                self.panel.controls_visible = true;
                commands.push(Command::ShowMoves(actor));
            }
            Some(MotionEvent::TransportFinished { resumed_walk }) => {
                self.just_zoomed = false;
                self.viewport.recenter_on_player(now_ms, self.config.zoom_recenter_ms);
                if resumed_walk {
                    self.panel.controls_visible = true;
                    commands.push(Command::ShowMoves(self.sprite.actor()));
                }
            }
            None => {}
        }
        if self.gestures.poll_reset(now_ms)
            && (!self.gestures.is_panning() || !self.panel.show_highlighted)
        {
            self.panel.show_highlighted = false;
            self.panel.controls_visible = true;
            commands.push(Command::ResetHighlighted);
        }
    }

    fn refresh_rects(&mut self) {
        self.highlight_rects = if self.panel.show_highlighted {
            highlight_rects(&self.layers, self.props.tile_size)
        } else {
            Vec::new()
        };
    }
}
