//! Visibility of the on-map control panel, the monster's target picker, and
//! the highlighted destination tiles, plus the button actions that toggle them.

use serde::{Deserialize, Serialize};

use crate::board::Actor;
use crate::command::{BarItem, Command, Direction, FocusTarget};
use crate::props::ViewProps;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlAction {
    SpriteTapped,
    Echo(Direction),
    PickTarget,
    TargetPicked(FocusTarget),
    CenterCamera,
    Bar(BarItem),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlPanel {
    pub controls_visible: bool,
    pub target_picker_visible: bool,
    pub show_highlighted: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self { controls_visible: true, target_picker_visible: false, show_highlighted: false }
    }
}

impl ControlPanel {
    /// Applies one button action. Camera actions are handled by the caller.
    pub fn apply(&mut self, action: ControlAction, props: &ViewProps) -> Vec<Command> {
        let actor = props.actor();
        match action {
            ControlAction::SpriteTapped => {
                if !props.moves_remaining() {
                    return Vec::new();
                }
                if self.controls_visible {
                    self.controls_visible = false;
                    self.target_picker_visible = false;
                    self.show_highlighted = true;
                    vec![Command::ShowMoves(actor)]
                } else {
                    self.controls_visible = true;
                    self.target_picker_visible = false;
                    self.show_highlighted = false;
                    Vec::new()
                }
            }
            ControlAction::Echo(direction) => {
                if actor != Actor::Priest || !self.controls_visible {
                    log::debug!("echo {direction:?} ignored for {actor:?}");
                    return Vec::new();
                }
                vec![Command::ResetHighlighted, Command::Echolocate(direction)]
            }
            ControlAction::PickTarget => {
                if actor == Actor::Monster && self.controls_visible {
                    self.controls_visible = false;
                    self.target_picker_visible = true;
                }
                Vec::new()
            }
            ControlAction::TargetPicked(target) => {
                if !self.target_picker_visible {
                    return Vec::new();
                }
                self.target_picker_visible = false;
                self.controls_visible = false;
                vec![Command::Focus(target)]
            }
            ControlAction::CenterCamera => Vec::new(),
            ControlAction::Bar(item) => vec![Command::ItemSelected(item)],
        }
    }

    /// Forces panels hidden while the game is paused or the actor is out of moves.
    pub fn enforce(&mut self, props: &ViewProps) {
        if !props.moves_remaining() {
            self.controls_visible = false;
            self.show_highlighted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSnapshot;
    use crate::grid::{CellIndex, TileSize};
    use crate::props::{Counters, FeedbackFlags, ZoomLevels};

    fn props(is_human: bool) -> ViewProps {
        let tile = TileSize::new(64).expect("tile");
        ViewProps {
            board: BoardSnapshot::blank(),
            human_cell: CellIndex::new(0).expect("cell"),
            monster_cell: CellIndex::new(1).expect("cell"),
            is_human,
            tile_size: tile,
            zoom: ZoomLevels { zoomed_in: tile, zoomed_out: TileSize::new(25).expect("tile") },
            game_active: true,
            out_of_moves: false,
            opponent_visible: false,
            bar_active: true,
            feedback: FeedbackFlags::default(),
            counters: Counters::default(),
        }
    }

    #[test]
    fn sprite_tap_toggles_between_controls_and_moves() {
        let mut panel = ControlPanel::default();
        let priest = props(true);
        assert_eq!(panel.apply(ControlAction::SpriteTapped, &priest), vec![Command::ShowMoves(Actor::Priest)]);
        assert!(!panel.controls_visible);
        assert!(panel.show_highlighted);

        assert!(panel.apply(ControlAction::SpriteTapped, &priest).is_empty());
        assert!(panel.controls_visible);
        assert!(!panel.show_highlighted);
    }

    #[test]
    fn sprite_tap_does_nothing_when_out_of_moves() {
        let mut panel = ControlPanel::default();
        let mut priest = props(true);
        priest.out_of_moves = true;
        assert!(panel.apply(ControlAction::SpriteTapped, &priest).is_empty());
        assert_eq!(panel, ControlPanel::default());
    }

    #[test]
    fn echo_resets_highlight_first() {
        let mut panel = ControlPanel::default();
        assert_eq!(
            panel.apply(ControlAction::Echo(Direction::North), &props(true)),
            vec![Command::ResetHighlighted, Command::Echolocate(Direction::North)]
        );
        assert!(panel.apply(ControlAction::Echo(Direction::North), &props(false)).is_empty());
    }

    #[test]
    fn monster_picks_a_focus_target() {
        let mut panel = ControlPanel::default();
        let monster = props(false);
        assert!(panel.apply(ControlAction::PickTarget, &monster).is_empty());
        assert!(panel.target_picker_visible);
        assert!(!panel.controls_visible);
        assert_eq!(
            panel.apply(ControlAction::TargetPicked(FocusTarget::Shrine), &monster),
            vec![Command::Focus(FocusTarget::Shrine)]
        );
        assert!(!panel.target_picker_visible);
    }

    #[test]
    fn inactive_game_hides_everything() {
        let mut panel = ControlPanel { show_highlighted: true, ..ControlPanel::default() };
        let mut paused = props(true);
        paused.game_active = false;
        panel.enforce(&paused);
        assert!(!panel.controls_visible);
        assert!(!panel.show_highlighted);
    }
}
