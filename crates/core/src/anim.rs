//! Linear tweens over explicit millisecond time.
//! Superseding a tween restarts from the value it had reached, so the last write wins.

use serde::{Deserialize, Serialize};

use crate::grid::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: Point,
    pub to: Point,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl Tween {
    pub fn value_at(&self, now_ms: u64) -> Point {
        if self.duration_ms == 0 || now_ms >= self.end_ms() {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = elapsed as f32 / self.duration_ms as f32;
        Point::new(
            self.from.x + (self.to.x - self.from.x) * t,
            self.from.y + (self.to.y - self.from.y) * t,
        )
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms.saturating_add(self.duration_ms)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }
}

/// A point that is either at rest or travelling along one tween.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animated {
    resting: Point,
    tween: Option<Tween>,
}

impl Animated {
    pub fn at(point: Point) -> Self {
        Self { resting: point, tween: None }
    }

    pub fn value(&self, now_ms: u64) -> Point {
        match &self.tween {
            Some(tween) => tween.value_at(now_ms),
            None => self.resting,
        }
    }

    /// Where the point ends up once the running tween (if any) finishes.
    pub fn target(&self) -> Point {
        self.tween.map_or(self.resting, |tween| tween.to)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.tween.map_or(0, |tween| tween.end_ms().saturating_sub(now_ms))
    }

    pub fn animate_to(&mut self, to: Point, now_ms: u64, duration_ms: u64) {
        let from = self.value(now_ms);
        self.tween = Some(Tween { from, to, start_ms: now_ms, duration_ms });
    }

    pub fn set(&mut self, point: Point) {
        self.resting = point;
        self.tween = None;
    }

    /// Folds a finished tween into the resting value. Returns true when one did finish.
    pub fn settle(&mut self, now_ms: u64) -> bool {
        match self.tween {
            Some(tween) if tween.is_finished(now_ms) => {
                self.resting = tween.to;
                self.tween = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_interpolates_linearly() {
        let tween = Tween {
            from: Point::new(0.0, 100.0),
            to: Point::new(100.0, 0.0),
            start_ms: 1_000,
            duration_ms: 200,
        };
        assert_eq!(tween.value_at(900), Point::new(0.0, 100.0));
        assert_eq!(tween.value_at(1_100), Point::new(50.0, 50.0));
        assert_eq!(tween.value_at(1_200), Point::new(100.0, 0.0));
        assert!(tween.is_finished(1_200));
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let tween = Tween { from: Point::ZERO, to: Point::new(3.0, 4.0), start_ms: 10, duration_ms: 0 };
        assert_eq!(tween.value_at(10), Point::new(3.0, 4.0));
    }

    #[test]
    fn retarget_starts_from_mid_flight_value() {
        let mut value = Animated::at(Point::ZERO);
        value.animate_to(Point::new(100.0, 0.0), 0, 100);
        value.animate_to(Point::new(50.0, 50.0), 50, 100);
        assert_eq!(value.value(50), Point::new(50.0, 0.0));
        assert_eq!(value.target(), Point::new(50.0, 50.0));
    }

    #[test]
    fn settle_reports_completion_once() {
        let mut value = Animated::at(Point::ZERO);
        value.animate_to(Point::new(10.0, 10.0), 0, 5);
        assert!(!value.settle(4));
        assert!(value.settle(5));
        assert!(!value.settle(6));
        assert!(!value.is_animating());
        assert_eq!(value.value(6), Point::new(10.0, 10.0));
    }
}
