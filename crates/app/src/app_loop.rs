use possession_core::command::Command;
use possession_core::compose::{RenderPlan, compose};
use possession_core::config::ViewConfig;
use possession_core::controls::ControlAction;
use possession_core::engine::ViewEvent;
use possession_core::error::ViewResult;
use possession_core::gesture::{TouchEvent, TouchSample};
use possession_core::grid::Point;
use possession_core::runtime::{ViewRuntime, ViewTrace};

use crate::bar_layout::BarLayout;
use crate::sandbox::Sandbox;

/// Command round trips allowed per frame before the rest waits for the next one.
const MAX_PROPS_ROUNDS: usize = 4;

/// Pointer state sampled once per rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFrame {
    pub position: Point,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

/// Where the current press started.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PressTarget {
    Button(ControlAction),
    Map { last: Point },
}

pub struct AppState {
    runtime: ViewRuntime,
    sandbox: Sandbox,
    bar_layout: BarLayout,
    press: Option<PressTarget>,
    /// Commands produced during the latest frame, oldest first.
    pub frame_commands: Vec<Command>,
}

impl AppState {
    pub fn new(
        sandbox: Sandbox,
        config: ViewConfig,
        bar_layout: BarLayout,
        now_ms: u64,
    ) -> ViewResult<Self> {
        let runtime = ViewRuntime::mount(sandbox.props(), config, now_ms)?;
        Ok(Self { runtime, sandbox, bar_layout, press: None, frame_commands: Vec::new() })
    }

    pub fn plan(&self, now_ms: u64) -> RenderPlan {
        compose(self.runtime.state(), now_ms)
    }

    pub fn bar_layout(&self) -> &BarLayout {
        &self.bar_layout
    }

    pub fn trace(&self) -> &ViewTrace {
        self.runtime.trace()
    }

    pub fn runtime(&self) -> &ViewRuntime {
        &self.runtime
    }

    /// Routes one frame of pointer input, then advances the clock.
    pub fn tick(&mut self, pointer: &PointerFrame, now_ms: u64) -> ViewResult<()> {
        self.frame_commands.clear();
        let position = pointer.position;

        if pointer.pressed {
            let plan = self.plan(now_ms);
            match self.button_at(&plan, position) {
                Some(action) => self.press = Some(PressTarget::Button(action)),
                None => {
                    self.press = Some(PressTarget::Map { last: position });
                    self.touch(TouchEvent::Down, position, now_ms)?;
                }
            }
        } else if pointer.down
            && let Some(PressTarget::Map { last }) = self.press
            && last != position
        {
            self.press = Some(PressTarget::Map { last: position });
            self.touch(TouchEvent::Move, position, now_ms)?;
        }

        if pointer.released {
            match self.press.take() {
                Some(PressTarget::Button(action)) => {
                    let plan = self.plan(now_ms);
                    if self.button_at(&plan, position) == Some(action) {
                        self.dispatch(ViewEvent::Control { action, now_ms })?;
                    }
                }
                Some(PressTarget::Map { .. }) => self.touch(TouchEvent::Up, position, now_ms)?,
                None => {}
            }
        }

        self.dispatch(ViewEvent::Tick { now_ms })
    }

    fn button_at(&self, plan: &RenderPlan, point: Point) -> Option<ControlAction> {
        plan.control_at(point).or_else(|| {
            self.bar_layout.item_at(point, &plan.bar).map(ControlAction::Bar)
        })
    }

    fn touch(
        &mut self,
        event: fn(TouchSample) -> TouchEvent,
        at: Point,
        now_ms: u64,
    ) -> ViewResult<()> {
        self.dispatch(ViewEvent::Touch(event(TouchSample { x: at.x, y: at.y, now_ms })))
    }

    /// Sends one event, hands the commands to the sandbox, and feeds any resulting
    /// props back in.
    fn dispatch(&mut self, event: ViewEvent) -> ViewResult<()> {
        let now_ms = event.now_ms();
        let mut commands = self.runtime.dispatch(event)?;
        for _ in 0..MAX_PROPS_ROUNDS {
            for command in &commands {
                log::debug!("view command {command:?}");
                command.dispatch(&mut self.sandbox);
            }
            self.frame_commands.append(&mut commands);
            if !self.sandbox.take_changed() {
                return Ok(());
            }
            let props = Box::new(self.sandbox.props());
            commands = self.runtime.dispatch(ViewEvent::Props { props, now_ms })?;
        }
        if !commands.is_empty() {
            log::warn!("dropping {} view commands after {MAX_PROPS_ROUNDS} rounds", commands.len());
        }
        Ok(())
    }
}
