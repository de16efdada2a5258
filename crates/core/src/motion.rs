//! Sprite walk cycles: direction picking, travel duration, and completion.
//! This module exists to drive the acting sprite between anchor positions.
//! It does not own the camera; completion is reported back to the engine.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::anim::Animated;
use crate::board::Actor;
use crate::config::ViewConfig;
use crate::grid::{CellIndex, Point, TileSize, cell_to_pixel};
use crate::props::ZoomLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Idle,
    WalkUp,
    WalkDown,
    WalkLeft,
    WalkRight,
}

impl Facing {
    pub fn code(self) -> u8 {
        match self {
            Facing::Idle => 0,
            Facing::WalkUp => 1,
            Facing::WalkDown => 2,
            Facing::WalkLeft => 3,
            Facing::WalkRight => 4,
        }
    }
}

pub fn sprite_image(actor: Actor, facing: Facing) -> &'static str {
    match (actor, facing) {
        (Actor::Priest, Facing::Idle) => "priest-idle",
        (Actor::Priest, Facing::WalkUp) => "priest-walk-up",
        (Actor::Priest, Facing::WalkDown) => "priest-walk-down",
        (Actor::Priest, Facing::WalkLeft) => "priest-walk-left",
        (Actor::Priest, Facing::WalkRight) => "priest-walk-right",
        (Actor::Monster, Facing::Idle) => "monster-idle",
        (Actor::Monster, Facing::WalkUp) => "monster-walk-up",
        (Actor::Monster, Facing::WalkDown) => "monster-walk-down",
        (Actor::Monster, Facing::WalkLeft) => "monster-walk-left",
        (Actor::Monster, Facing::WalkRight) => "monster-walk-right",
    }
}

/// The priest checks the vertical axis first. The monster only walks
/// vertically on a pure vertical step and otherwise keeps its current facing
/// when neither rule applies.
pub fn walk_facing(actor: Actor, from: Point, to: Point, current: Facing) -> Facing {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    match actor {
        Actor::Priest => {
            if dy > 0.0 {
                Facing::WalkDown
            } else if dy < 0.0 {
                Facing::WalkUp
            } else if dx < 0.0 {
                Facing::WalkLeft
            } else {
                Facing::WalkRight
            }
        }
        Actor::Monster => {
            if dy > 0.0 && dx == 0.0 {
                Facing::WalkDown
            } else if dy < 0.0 && dx == 0.0 {
                Facing::WalkUp
            } else if dx < 0.0 {
                Facing::WalkLeft
            } else if dx > 0.0 {
                Facing::WalkRight
            } else {
                current
            }
        }
    }
}

/// Base duration per travel unit, clamped to `1..=walk_max_units` units.
pub fn walk_duration_ms(from: Point, to: Point, config: &ViewConfig) -> u64 {
    let dx = to.x - from.x;
    let distance = if dx != 0.0 { dx.abs() } else { (to.y - from.y).abs() };
    let max_units = config.walk_max_units.max(1) as f32;
    let units = (distance / config.walk_px_per_unit).max(1.0).min(max_units);
    (units * config.walk_base_ms as f32).round() as u64
}

/// Where the sprite image is drawn for an actor standing on `cell`.
pub fn sprite_anchor(cell: CellIndex, tile: TileSize, level: ZoomLevel) -> Point {
    let origin = cell_to_pixel(cell, tile).to_point();
    let size = tile.as_f32();
    match level {
        ZoomLevel::In => Point::new(origin.x, origin.y - size),
        ZoomLevel::Out => Point::new(origin.x - 0.8 * size, origin.y - 2.8 * size),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    Walk,
    Transport,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionEvent {
    WalkFinished(Actor),
    /// `resumed_walk` is set when the transport cut a walk cycle short.
    TransportFinished { resumed_walk: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteMotion {
    actor: Actor,
    facing: Facing,
    position: Animated,
    kind: Option<MotionKind>,
    interrupted_walk: bool,
}

impl SpriteMotion {
    pub fn new(actor: Actor, anchor: Point) -> Self {
        Self {
            actor,
            facing: Facing::Idle,
            position: Animated::at(anchor),
            kind: None,
            interrupted_walk: false,
        }
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    pub fn set_actor(&mut self, actor: Actor) {
        self.actor = actor;
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn image(&self) -> &'static str {
        sprite_image(self.actor, self.facing)
    }

    pub fn position(&self, now_ms: u64) -> Point {
        self.position.value(now_ms)
    }

    pub fn target(&self) -> Point {
        self.position.target()
    }

    pub fn in_flight(&self) -> Option<MotionKind> {
        self.kind
    }

    /// Starts a walk cycle from wherever the sprite is now and returns its
    /// duration, or `None` when the sprite is already headed to `target`.
    pub fn walk_to(&mut self, target: Point, now_ms: u64, config: &ViewConfig) -> Option<u64> {
        if self.position.target() == target {
            return None;
        }
        let from = self.position.value(now_ms);
        self.facing = walk_facing(self.actor, from, target, self.facing);
        let duration = walk_duration_ms(from, target, config);
        self.position.animate_to(target, now_ms, duration);
        self.kind = Some(MotionKind::Walk);
        Some(duration)
    }

    /// Moves without a walk cycle, used after zoom and actor changes.
    pub fn transport_to(&mut self, target: Point, now_ms: u64, duration_ms: u64) {
        log::debug!("transporting {:?} sprite", self.actor);
        self.interrupted_walk |= self.kind == Some(MotionKind::Walk);
        self.facing = Facing::Idle;
        self.position.animate_to(target, now_ms, duration_ms);
        self.kind = Some(MotionKind::Transport);
    }

    pub fn tick(&mut self, now_ms: u64) -> Option<MotionEvent> {
        if !self.position.settle(now_ms) {
            return None;
        }
        match self.kind.take() {
            Some(MotionKind::Walk) => {
                self.facing = Facing::Idle;
                Some(MotionEvent::WalkFinished(self.actor))
            }
            Some(MotionKind::Transport) => Some(MotionEvent::TransportFinished {
                resumed_walk: mem::take(&mut self.interrupted_walk),
            }),
            None => None,
        }
    }
}
