//! Stable snapshot hashing for deterministic replay checks.
//! This module exists to keep hashing concerns separate from the transition code.
//! It does not own trace recording or file persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::board::Actor;
use crate::grid::Point;
use crate::viewport::{CameraMode, PresentPhase};

fn write_point(hasher: &mut Xxh3, point: Point) {
    hasher.write_u32(point.x.to_bits());
    hasher.write_u32(point.y.to_bits());
}

impl ViewState {
    /// Hashes resting targets rather than in-flight values, so the result does not
    /// depend on when it is taken between ticks.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.props.tile_size.get());
        hasher.write_u8(match self.level {
            ZoomLevel::In => 0,
            ZoomLevel::Out => 1,
        });
        write_point(&mut hasher, self.viewport.target());
        hasher.write_u32(self.viewport.player().get());
        match self.viewport.mode() {
            CameraMode::Following => hasher.write_u8(0),
            CameraMode::Presenting(PresentPhase::ToFeedback) => hasher.write_u8(1),
            CameraMode::Presenting(PresentPhase::Holding { until_ms }) => {
                hasher.write_u8(2);
                hasher.write_u64(until_ms);
            }
            CameraMode::Presenting(PresentPhase::ToPlayer) => hasher.write_u8(3),
        }
        write_point(&mut hasher, self.sprite.target());
        hasher.write_u8(match self.sprite.actor() {
            Actor::Priest => 0,
            Actor::Monster => 1,
        });
        hasher.write_u8(self.sprite.facing().code());
        hasher.write_u8(u8::from(self.panel.controls_visible));
        hasher.write_u8(u8::from(self.panel.target_picker_visible));
        hasher.write_u8(u8::from(self.panel.show_highlighted));
        hasher.write_u8(u8::from(self.just_zoomed));
        hasher.write_u64(self.gestures.pending_reset_ms().unwrap_or(u64::MAX));
        for rect in &self.highlight_rects {
            hasher.write_u32(rect.cell.get());
        }
        if let Some(cell) = self.presented_feedback {
            hasher.write_u32(cell.get());
        }
        hasher.finish()
    }
}
