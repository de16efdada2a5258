//! Shared fixtures for the engine, compose, and runtime test suites.

use crate::board::BoardSnapshot;
use crate::grid::{CellIndex, TileSize};
use crate::props::{Counters, FeedbackFlags, ViewProps, ZoomLevels};

pub(crate) const ZOOMED_IN: u32 = 64;
pub(crate) const ZOOMED_OUT: u32 = 25;

pub(crate) fn cell(column: u32, row: u32) -> CellIndex {
    CellIndex::from_column_row(column, row).expect("cell on board")
}

pub(crate) fn tile(pixels: u32) -> TileSize {
    TileSize::new(pixels).expect("positive tile")
}

/// An active priest turn at the zoomed-in level; the monster waits in a corner.
pub(crate) fn priest_props(player: CellIndex) -> ViewProps {
    ViewProps {
        board: BoardSnapshot::blank(),
        human_cell: player,
        monster_cell: cell(0, 0),
        is_human: true,
        tile_size: tile(ZOOMED_IN),
        zoom: ZoomLevels { zoomed_in: tile(ZOOMED_IN), zoomed_out: tile(ZOOMED_OUT) },
        game_active: true,
        out_of_moves: false,
        opponent_visible: false,
        bar_active: true,
        feedback: FeedbackFlags::default(),
        counters: Counters { turn_counter: 3, ..Counters::default() },
    }
}

pub(crate) fn monster_props(player: CellIndex) -> ViewProps {
    ViewProps {
        human_cell: cell(39, 39),
        monster_cell: player,
        is_human: false,
        ..priest_props(player)
    }
}

pub(crate) fn with_highlights(mut props: ViewProps, cells: &[CellIndex]) -> ViewProps {
    for index in CellIndex::all() {
        props.board.cell_mut(index).is_highlighted = cells.contains(&index);
    }
    props
}
