//! Outbound requests from the view to the parent game state.

use serde::{Deserialize, Serialize};

use crate::board::Actor;
use crate::grid::CellIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Radius,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusTarget {
    Human,
    Shrine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarItem {
    Menu,
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(CellIndex),
    IncrementTurnCounter,
    Echolocate(Direction),
    Focus(FocusTarget),
    AlterZoom,
    ResetHighlighted,
    ShowMoves(Actor),
    FeedbackPresented,
    ItemSelected(BarItem),
}

/// Callback surface the parent implements to receive view commands.
pub trait ViewHost {
    fn move_to(&mut self, cell: CellIndex);
    fn increment_turn_counter(&mut self);
    fn echolocate(&mut self, direction: Direction);
    fn focus(&mut self, target: FocusTarget);
    fn alter_zoom(&mut self);
    fn reset_highlighted(&mut self);
    fn show_human_moves(&mut self);
    fn show_monster_moves(&mut self);
    fn feedback_presented(&mut self);
    fn item_selected(&mut self, item: BarItem);
}

impl Command {
    pub fn dispatch<H: ViewHost + ?Sized>(&self, host: &mut H) {
        match *self {
            Command::Move(cell) => host.move_to(cell),
            Command::IncrementTurnCounter => host.increment_turn_counter(),
            Command::Echolocate(direction) => host.echolocate(direction),
            Command::Focus(target) => host.focus(target),
            Command::AlterZoom => host.alter_zoom(),
            Command::ResetHighlighted => host.reset_highlighted(),
            Command::ShowMoves(Actor::Priest) => host.show_human_moves(),
            Command::ShowMoves(Actor::Monster) => host.show_monster_moves(),
            Command::FeedbackPresented => host.feedback_presented(),
            Command::ItemSelected(item) => host.item_selected(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl ViewHost for Recorder {
        fn move_to(&mut self, cell: CellIndex) {
            self.calls.push(format!("move {}", cell.get()));
        }
        fn increment_turn_counter(&mut self) {
            self.calls.push("turn".into());
        }
        fn echolocate(&mut self, direction: Direction) {
            self.calls.push(format!("echo {direction:?}"));
        }
        fn focus(&mut self, target: FocusTarget) {
            self.calls.push(format!("focus {target:?}"));
        }
        fn alter_zoom(&mut self) {
            self.calls.push("zoom".into());
        }
        fn reset_highlighted(&mut self) {
            self.calls.push("reset".into());
        }
        fn show_human_moves(&mut self) {
            self.calls.push("human moves".into());
        }
        fn show_monster_moves(&mut self) {
            self.calls.push("monster moves".into());
        }
        fn feedback_presented(&mut self) {
            self.calls.push("feedback".into());
        }
        fn item_selected(&mut self, item: BarItem) {
            self.calls.push(format!("item {item:?}"));
        }
    }

    #[test]
    fn dispatch_routes_show_moves_by_actor() {
        let mut host = Recorder::default();
        for command in [
            Command::Move(CellIndex::new(7).expect("cell")),
            Command::IncrementTurnCounter,
            Command::ShowMoves(Actor::Priest),
            Command::ShowMoves(Actor::Monster),
            Command::Echolocate(Direction::Radius),
            Command::ItemSelected(BarItem::EndTurn),
        ] {
            command.dispatch(&mut host);
        }
        assert_eq!(
            host.calls,
            vec!["move 7", "turn", "human moves", "monster moves", "echo Radius", "item EndTurn"]
        );
    }
}
