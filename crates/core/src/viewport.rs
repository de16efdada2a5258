//! Camera offset over the scrolled map.
//! This module exists to keep the clamp rule and the feedback presentation sequence in one owner.
//! It does not own gesture classification or sprite motion.

use serde::{Deserialize, Serialize};

use crate::anim::Animated;
use crate::config::ScreenSize;
use crate::grid::{CellIndex, Point, TileSize, cell_to_pixel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentPhase {
    ToFeedback,
    Holding { until_ms: u64 },
    ToPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    Following,
    Presenting(PresentPhase),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
    FeedbackPresented,
}

/// Largest admissible offset on each axis; never negative.
pub fn max_offset(tile: TileSize, screen: ScreenSize) -> Point {
    let board = tile.board_pixels();
    Point::new((board - screen.width).max(0.0), (board - screen.height).max(0.0))
}

pub fn clamp_offset(offset: Point, tile: TileSize, screen: ScreenSize) -> Point {
    let max = max_offset(tile, screen);
    let clamp_axis = |value: f32, max: f32| if value.is_finite() { value.clamp(0.0, max) } else { 0.0 };
    Point::new(clamp_axis(offset.x, max.x), clamp_axis(offset.y, max.y))
}

/// Offset that puts the cell's top-left pixel at the middle of the screen, clamped.
pub fn centered_offset(cell: CellIndex, tile: TileSize, screen: ScreenSize) -> Point {
    clamp_offset(cell_to_pixel(cell, tile).to_point() - screen.half(), tile, screen)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    screen: ScreenSize,
    tile: TileSize,
    offset: Animated,
    player: CellIndex,
    feedback: Option<CellIndex>,
    mode: CameraMode,
    leg_ms: u64,
    hold_ms: u64,
}

impl Viewport {
    pub fn new(screen: ScreenSize, tile: TileSize, player: CellIndex) -> Self {
        Self {
            screen,
            tile,
            offset: Animated::at(centered_offset(player, tile, screen)),
            player,
            feedback: None,
            mode: CameraMode::Following,
            leg_ms: 0,
            hold_ms: 0,
        }
    }

    pub fn offset(&self, now_ms: u64) -> Point {
        self.offset.value(now_ms)
    }

    pub fn target(&self) -> Point {
        self.offset.target()
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_presenting(&self) -> bool {
        matches!(self.mode, CameraMode::Presenting(_))
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    pub fn tile(&self) -> TileSize {
        self.tile
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn player(&self) -> CellIndex {
        self.player
    }

    /// Records where the acting player stands; the presentation return leg aims here.
    pub fn track_player(&mut self, cell: CellIndex) {
        self.player = cell;
    }

    /// Jumps straight to the cell without animating.
    pub fn snap_to(&mut self, cell: CellIndex) {
        self.offset.set(centered_offset(cell, self.tile, self.screen));
    }

    /// Starts a linear move to centre `cell`. Ignored while a feedback presentation runs.
    pub fn recenter_on(&mut self, cell: CellIndex, now_ms: u64, duration_ms: u64) {
        if self.is_presenting() {
            log::debug!("recenter on {} deferred to the presentation return leg", cell.get());
            return;
        }
        let target = centered_offset(cell, self.tile, self.screen);
        self.offset.animate_to(target, now_ms, duration_ms);
    }

    pub fn recenter_on_player(&mut self, now_ms: u64, duration_ms: u64) {
        self.recenter_on(self.player, now_ms, duration_ms);
    }

    pub fn present_feedback(&mut self, cell: CellIndex, now_ms: u64, leg_ms: u64, hold_ms: u64) {
        log::info!("presenting feedback at cell {}", cell.get());
        self.leg_ms = leg_ms;
        self.hold_ms = hold_ms;
        self.feedback = Some(cell);
        self.mode = CameraMode::Presenting(PresentPhase::ToFeedback);
        let target = centered_offset(cell, self.tile, self.screen);
        self.offset.animate_to(target, now_ms, leg_ms);
    }

    /// Scrolls by a finger delta: dragging right reveals the map to the left.
    pub fn pan(&mut self, delta: Point, now_ms: u64) {
        if self.is_presenting() {
            return;
        }
        let next = self.offset.value(now_ms) - delta;
        self.offset.set(clamp_offset(next, self.tile, self.screen));
    }

    /// Applies a new zoom level, keeping the current offset inside the new bounds.
    /// A running presentation leg is re-aimed at its cell on the new scale.
    pub fn set_tile_size(&mut self, tile: TileSize, now_ms: u64) {
        let current = self.offset.value(now_ms);
        let remaining_ms = self.offset.remaining_ms(now_ms);
        self.tile = tile;
        self.offset.set(clamp_offset(current, tile, self.screen));

        let CameraMode::Presenting(phase) = self.mode else {
            return;
        };
        let aim = match phase {
            PresentPhase::ToPlayer => self.player,
            PresentPhase::ToFeedback | PresentPhase::Holding { .. } => {
                self.feedback.unwrap_or(self.player)
            }
        };
        let target = centered_offset(aim, tile, self.screen);
        match phase {
            PresentPhase::Holding { .. } => self.offset.set(target),
            PresentPhase::ToFeedback | PresentPhase::ToPlayer => {
                self.offset.animate_to(target, now_ms, remaining_ms)
            }
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> Option<ViewportEvent> {
        if let CameraMode::Presenting(PresentPhase::Holding { until_ms }) = self.mode {
            if now_ms >= until_ms {
                self.start_return_leg(now_ms);
            }
            return None;
        }
        if !self.offset.settle(now_ms) {
            return None;
        }
        match self.mode {
            CameraMode::Following => None,
            CameraMode::Presenting(PresentPhase::ToFeedback) => {
                if self.hold_ms == 0 {
                    self.start_return_leg(now_ms);
                } else {
                    let until_ms = now_ms.saturating_add(self.hold_ms);
                    self.mode = CameraMode::Presenting(PresentPhase::Holding { until_ms });
                }
                None
            }
            CameraMode::Presenting(PresentPhase::Holding { .. }) => None,
            CameraMode::Presenting(PresentPhase::ToPlayer) => {
                log::info!("feedback presentation finished");
                self.mode = CameraMode::Following;
                self.feedback = None;
                Some(ViewportEvent::FeedbackPresented)
            }
        }
    }

    fn start_return_leg(&mut self, now_ms: u64) {
        log::debug!("camera returning to player cell {}", self.player.get());
        self.mode = CameraMode::Presenting(PresentPhase::ToPlayer);
        let target = centered_offset(self.player, self.tile, self.screen);
        self.offset.animate_to(target, now_ms, self.leg_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenSize {
        ScreenSize { width: 400.0, height: 600.0 }
    }

    fn tile(pixels: u32) -> TileSize {
        TileSize::new(pixels).expect("tile")
    }

    fn cell(column: u32, row: u32) -> CellIndex {
        CellIndex::from_column_row(column, row).expect("cell")
    }

    #[test]
    fn centered_offset_clamps_at_board_edges() {
        let t = tile(64);
        assert_eq!(centered_offset(cell(0, 0), t, screen()), Point::ZERO);
        let far = centered_offset(cell(39, 39), t, screen());
        assert_eq!(far, Point::new(2560.0 - 400.0, 2560.0 - 600.0));
        let mid = centered_offset(cell(20, 20), t, screen());
        assert_eq!(mid, Point::new(1280.0 - 200.0, 1280.0 - 300.0));
    }

    #[test]
    fn small_board_clamps_to_zero() {
        let t = tile(5);
        assert_eq!(max_offset(t, screen()), Point::ZERO);
        assert_eq!(centered_offset(cell(39, 39), t, screen()), Point::ZERO);
    }

    #[test]
    fn recenter_animates_then_settles() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(0, 0));
        viewport.recenter_on(cell(20, 20), 1_000, 1_000);
        assert_eq!(viewport.offset(1_500), Point::new(540.0, 490.0));
        assert_eq!(viewport.tick(2_000), None);
        assert_eq!(viewport.offset(2_000), Point::new(1080.0, 980.0));
        assert!(!viewport.is_animating());
    }

    #[test]
    fn pan_moves_against_finger_and_clamps() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(20, 20));
        let start = viewport.offset(0);
        viewport.pan(Point::new(30.0, -20.0), 0);
        assert_eq!(viewport.offset(0), Point::new(start.x - 30.0, start.y + 20.0));
        viewport.pan(Point::new(100_000.0, 100_000.0), 0);
        assert_eq!(viewport.offset(0), Point::ZERO);
    }

    #[test]
    fn feedback_presentation_runs_both_legs() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(20, 20));
        viewport.present_feedback(cell(5, 5), 0, 2_000, 0);
        assert!(viewport.is_presenting());
        assert_eq!(viewport.tick(1_000), None);
        assert_eq!(viewport.tick(2_000), None);
        assert_eq!(viewport.mode(), CameraMode::Presenting(PresentPhase::ToPlayer));
        assert_eq!(viewport.target(), centered_offset(cell(20, 20), tile(64), screen()));
        assert_eq!(viewport.tick(4_000), Some(ViewportEvent::FeedbackPresented));
        assert_eq!(viewport.mode(), CameraMode::Following);
    }

    #[test]
    fn presentation_holds_before_returning() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(20, 20));
        viewport.present_feedback(cell(5, 5), 0, 100, 500);
        assert_eq!(viewport.tick(100), None);
        assert_eq!(viewport.mode(), CameraMode::Presenting(PresentPhase::Holding { until_ms: 600 }));
        assert_eq!(viewport.tick(599), None);
        assert_eq!(viewport.tick(600), None);
        assert_eq!(viewport.tick(700), Some(ViewportEvent::FeedbackPresented));
    }

    #[test]
    fn pan_and_recenter_are_ignored_while_presenting() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(20, 20));
        viewport.present_feedback(cell(5, 5), 0, 2_000, 0);
        let target = viewport.target();
        viewport.pan(Point::new(50.0, 50.0), 10);
        viewport.recenter_on(cell(30, 30), 10, 100);
        assert_eq!(viewport.target(), target);
    }

    #[test]
    fn zoom_change_mid_presentation_still_finishes() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(20, 20));
        viewport.present_feedback(cell(30, 30), 0, 2_000, 0);
        viewport.set_tile_size(tile(25), 500);
        assert_eq!(viewport.target(), centered_offset(cell(30, 30), tile(25), screen()));
        assert_eq!(viewport.tick(2_000), None);
        assert_eq!(viewport.target(), centered_offset(cell(20, 20), tile(25), screen()));
        assert_eq!(viewport.tick(4_000), Some(ViewportEvent::FeedbackPresented));
    }

    #[test]
    fn zoom_out_reclamps_offset() {
        let mut viewport = Viewport::new(screen(), tile(64), cell(39, 39));
        viewport.set_tile_size(tile(25), 0);
        let max = max_offset(tile(25), screen());
        let offset = viewport.offset(0);
        assert!(offset.x <= max.x && offset.y <= max.y);
    }
}
