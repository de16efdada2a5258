//! Inbound snapshot pushed by the parent game state on every change.
//! This module exists to validate that snapshot once, at the boundary.
//! It does not own any derived view state.

use serde::{Deserialize, Serialize};

use crate::board::{Actor, BoardSnapshot};
use crate::error::{ViewError, ViewResult};
use crate::grid::{CellIndex, TileSize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomLevel {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomLevels {
    pub zoomed_in: TileSize,
    pub zoomed_out: TileSize,
}

impl ZoomLevels {
    pub fn level_of(&self, tile: TileSize) -> ViewResult<ZoomLevel> {
        if tile == self.zoomed_in {
            Ok(ZoomLevel::In)
        } else if tile == self.zoomed_out {
            Ok(ZoomLevel::Out)
        } else {
            Err(ViewError::UnknownZoomLevel { tile_size: tile.get() })
        }
    }

    /// Sprites are authored for the zoomed-in tile size.
    pub fn sprite_scale(&self, tile: TileSize) -> f32 {
        tile.as_f32() / self.zoomed_in.as_f32()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackFlags {
    pub highlight_feedback: bool,
    pub human_feedback: bool,
    pub monster_feedback: bool,
    pub feedback_cell: Option<CellIndex>,
}

impl FeedbackFlags {
    pub fn pending_for(&self, actor: Actor) -> bool {
        match actor {
            Actor::Priest => self.human_feedback,
            Actor::Monster => self.monster_feedback,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counters {
    pub turn_counter: u32,
    pub shrine_amount: u32,
    pub shrines_unclaimed: u32,
    pub heart_beat_timer: u32,
    pub human_shrines_to_win: u32,
    pub monster_shrines_to_win: u32,
    pub monster_sanity_level: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewProps {
    pub board: BoardSnapshot,
    pub human_cell: CellIndex,
    pub monster_cell: CellIndex,
    pub is_human: bool,
    pub tile_size: TileSize,
    pub zoom: ZoomLevels,
    pub game_active: bool,
    pub out_of_moves: bool,
    pub opponent_visible: bool,
    pub bar_active: bool,
    #[serde(default)]
    pub feedback: FeedbackFlags,
    #[serde(default)]
    pub counters: Counters,
}

impl ViewProps {
    /// Checks the parts serde cannot: the tile size must be one of the zoom levels.
    pub fn validate(&self) -> ViewResult<ZoomLevel> {
        self.zoom.level_of(self.tile_size)
    }

    pub fn actor(&self) -> Actor {
        Actor::from_is_human(self.is_human)
    }

    pub fn acting_cell(&self) -> CellIndex {
        match self.actor() {
            Actor::Priest => self.human_cell,
            Actor::Monster => self.monster_cell,
        }
    }

    pub fn opponent_cell(&self) -> CellIndex {
        match self.actor() {
            Actor::Priest => self.monster_cell,
            Actor::Monster => self.human_cell,
        }
    }

    /// Shows when the parent flags feedback for the acting actor.
    pub fn feedback_pending(&self) -> bool {
        self.feedback.pending_for(self.actor())
    }

    pub fn moves_remaining(&self) -> bool {
        self.game_active && !self.out_of_moves
    }
}
