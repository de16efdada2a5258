//! Touch gesture classification: pan, double tap, or tap-to-select.
//! This module exists to turn raw touch samples into one gesture at a time.
//! It does not own the viewport or the highlight state it reports on.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::board::BoardLayers;
use crate::config::ViewConfig;
use crate::grid::{CellIndex, Point, TileSize, cell_to_pixel};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    pub x: f32,
    pub y: f32,
    pub now_ms: u64,
}

impl TouchSample {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    Down(TouchSample),
    Move(TouchSample),
    Up(TouchSample),
}

impl TouchEvent {
    pub fn sample(&self) -> &TouchSample {
        match self {
            TouchEvent::Down(sample) | TouchEvent::Move(sample) | TouchEvent::Up(sample) => sample,
        }
    }
}

/// Map-space rectangle of one highlighted cell. Containment is strict on every edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightRect {
    pub cell: CellIndex,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl HighlightRect {
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.x_min && point.x < self.x_max && point.y > self.y_min && point.y < self.y_max
    }
}

/// Rebuilds the hit-test list from the highlight layer at the current tile size.
pub fn highlight_rects(layers: &BoardLayers, tile: TileSize) -> Vec<HighlightRect> {
    let size = tile.as_f32();
    layers
        .highlighted_cells()
        .map(|cell| {
            let origin = cell_to_pixel(cell, tile).to_point();
            HighlightRect {
                cell,
                x_min: origin.x,
                y_min: origin.y,
                x_max: origin.x + size,
                y_max: origin.y + size,
            }
        })
        .collect()
}

/// What a release may select against.
#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    pub enabled: bool,
    pub offset: Point,
    pub rects: &'a [HighlightRect],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    DoubleTap,
    Pan(Point),
    Selected(CellIndex),
    /// Release in selection mode that hit no rectangle; a highlight reset is now pending.
    Missed,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GesturePhase {
    Idle,
    Pressed { start: Point },
    Panning { last: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureRouter {
    dead_zone: f32,
    double_tap_window_ms: u64,
    reset_delay_ms: u64,
    phase: GesturePhase,
    previous_down_ms: Option<u64>,
    pending_reset_ms: Option<u64>,
}

impl GestureRouter {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            dead_zone: config.pan_dead_zone_px,
            double_tap_window_ms: config.double_tap_window_ms,
            reset_delay_ms: config.highlight_reset_delay_ms,
            phase: GesturePhase::Idle,
            previous_down_ms: None,
            pending_reset_ms: None,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.phase, GesturePhase::Panning { .. })
    }

    pub fn pending_reset_ms(&self) -> Option<u64> {
        self.pending_reset_ms
    }

    pub fn handle(&mut self, event: &TouchEvent, selection: &Selection<'_>) -> Option<Gesture> {
        let sample = event.sample();
        let point = sample.point();
        match *event {
            TouchEvent::Down(_) => self.on_down(point, sample.now_ms),
            TouchEvent::Move(_) => self.on_move(point),
            TouchEvent::Up(_) => self.on_up(point, sample.now_ms, selection),
        }
    }

    /// Consumes the debounced highlight reset once its deadline has passed.
    pub fn poll_reset(&mut self, now_ms: u64) -> bool {
        match self.pending_reset_ms {
            Some(deadline) if now_ms >= deadline => {
                self.pending_reset_ms = None;
                true
            }
            _ => false,
        }
    }

    fn on_down(&mut self, point: Point, now_ms: u64) -> Option<Gesture> {
        if let Some(previous) = self.previous_down_ms
            && now_ms.saturating_sub(previous) < self.double_tap_window_ms
        {
            log::debug!("double tap after {} ms", now_ms - previous);
            self.previous_down_ms = None;
            self.phase = GesturePhase::Idle;
            return Some(Gesture::DoubleTap);
        }
        self.previous_down_ms = Some(now_ms);
        self.phase = GesturePhase::Pressed { start: point };
        None
    }

    fn on_move(&mut self, point: Point) -> Option<Gesture> {
        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Pressed { start } => {
                if !self.beyond_dead_zone(start, point) {
                    return None;
                }
                log::debug!("gesture classified as pan");
                self.phase = GesturePhase::Panning { last: point };
                Some(Gesture::Pan(point - start))
            }
            GesturePhase::Panning { last } => {
                self.phase = GesturePhase::Panning { last: point };
                let delta = point - last;
                (delta != Point::ZERO).then_some(Gesture::Pan(delta))
            }
        }
    }

    fn on_up(&mut self, point: Point, now_ms: u64, selection: &Selection<'_>) -> Option<Gesture> {
        let phase = mem::replace(&mut self.phase, GesturePhase::Idle);
        match phase {
            GesturePhase::Idle => None,
            GesturePhase::Panning { last } => {
                let delta = point - last;
                (delta != Point::ZERO).then_some(Gesture::Pan(delta))
            }
            GesturePhase::Pressed { start } if self.beyond_dead_zone(start, point) => {
                Some(Gesture::Pan(point - start))
            }
            GesturePhase::Pressed { .. } => {
                if !selection.enabled {
                    return None;
                }
                let map_point = point + selection.offset;
                match selection.rects.iter().find(|rect| rect.contains(map_point)) {
                    Some(rect) => {
                        log::debug!("tap selected cell {}", rect.cell.get());
                        self.pending_reset_ms = None;
                        Some(Gesture::Selected(rect.cell))
                    }
                    None => {
                        log::debug!("tap missed every highlighted tile");
                        self.pending_reset_ms = Some(now_ms.saturating_add(self.reset_delay_ms));
                        Some(Gesture::Missed)
                    }
                }
            }
        }
    }

    fn beyond_dead_zone(&self, start: Point, point: Point) -> bool {
        let delta = point - start;
        delta.x.abs() > self.dead_zone || delta.y.abs() > self.dead_zone
    }
}
