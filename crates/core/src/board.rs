//! Read-only board snapshot supplied by the rules engine, and the per-layer
//! code arrays derived from it for one acting actor.
//! This module never mutates cells; change requests leave as commands.

use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};
use crate::grid::{CELL_COUNT, CellIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Priest,
    Monster,
}

impl Actor {
    pub fn from_is_human(is_human: bool) -> Self {
        if is_human { Actor::Priest } else { Actor::Monster }
    }

    pub fn opponent(self) -> Self {
        match self {
            Actor::Priest => Actor::Monster,
            Actor::Monster => Actor::Priest,
        }
    }
}

/// One board square as described by the parent game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cell {
    pub image_key: u8,
    pub image_fog_key: u8,
    pub image_decor_key: u8,
    pub is_revealed: bool,
    pub is_semi_revealed: bool,
    pub is_highlighted: bool,
    pub has_cache: bool,
    pub has_blessed_cache: bool,
    pub has_desecrated_cache: bool,
    pub has_human: bool,
    pub has_monster: bool,
    pub was_pounced: bool,
    pub was_echoed: bool,
}

/// Exactly 1600 cells in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct BoardSnapshot {
    cells: Vec<Cell>,
}

impl BoardSnapshot {
    pub fn new(cells: Vec<Cell>) -> ViewResult<Self> {
        if cells.len() != CELL_COUNT {
            return Err(ViewError::BoardSize { expected: CELL_COUNT, actual: cells.len() });
        }
        Ok(Self { cells })
    }

    /// A board of default cells, handy for hosts that fill it in afterwards.
    pub fn blank() -> Self {
        Self { cells: vec![Cell::default(); CELL_COUNT] }
    }

    pub fn cell(&self, index: CellIndex) -> &Cell {
        &self.cells[index.as_usize()]
    }

    pub fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        &mut self.cells[index.as_usize()]
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, &Cell)> {
        CellIndex::all().zip(self.cells.iter())
    }

    /// First cell carrying the feedback marker the given actor is shown.
    pub fn first_feedback_cell(&self, actor: Actor) -> Option<CellIndex> {
        self.cells().find(|(_, cell)| feedback_mark(cell, actor)).map(|(index, _)| index)
    }
}

impl TryFrom<Vec<Cell>> for BoardSnapshot {
    type Error = ViewError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<BoardSnapshot> for Vec<Cell> {
    fn from(board: BoardSnapshot) -> Self {
        board.cells
    }
}

fn feedback_mark(cell: &Cell, actor: Actor) -> bool {
    match actor {
        Actor::Priest => cell.was_pounced,
        Actor::Monster => cell.was_echoed,
    }
}

/// Per-cell image codes for each map layer as seen by one actor.
/// Code 0 means the cell draws nothing on that layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayers {
    pub terrain: Vec<u8>,
    pub fog: Vec<u8>,
    pub decoration: Vec<u8>,
    pub cache: Vec<u8>,
    pub blessed_cache: Vec<u8>,
    pub desecrated_cache: Vec<u8>,
    pub highlight: Vec<u8>,
    pub feedback: Vec<u8>,
}

impl BoardLayers {
    pub fn derive(board: &BoardSnapshot, actor: Actor) -> Self {
        let priest = actor == Actor::Priest;
        let layer = |code: &dyn Fn(&Cell) -> u8| board.cells.iter().map(code).collect::<Vec<u8>>();
        Self {
            terrain: layer(&|cell| {
                if !priest || cell.is_revealed || cell.is_semi_revealed { cell.image_key } else { 0 }
            }),
            fog: layer(&|cell| if priest { cell.image_fog_key } else { 0 }),
            decoration: layer(&|cell| if priest { 0 } else { cell.image_decor_key }),
            cache: layer(&|cell| u8::from(cell.has_cache)),
            blessed_cache: layer(&|cell| u8::from(cell.has_blessed_cache)),
            desecrated_cache: layer(&|cell| u8::from(cell.has_desecrated_cache)),
            highlight: layer(&|cell| u8::from(cell.is_highlighted)),
            feedback: layer(&|cell| u8::from(feedback_mark(cell, actor))),
        }
    }

    pub fn any_highlighted(&self) -> bool {
        self.highlight.contains(&1)
    }

    pub fn highlighted_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        CellIndex::all().zip(self.highlight.iter()).filter(|(_, code)| **code != 0).map(|(i, _)| i)
    }
}
