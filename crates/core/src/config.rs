use serde::{Deserialize, Serialize};

use crate::error::{ViewError, ViewResult};
use crate::grid::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self { width: 375.0, height: 667.0 }
    }
}

/// Every timing and threshold constant the view uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub screen: ScreenSize,
    pub pan_dead_zone_px: f32,
    pub double_tap_window_ms: u64,
    pub highlight_reset_delay_ms: u64,
    pub feedback_leg_ms: u64,
    /// Pause on the feedback cell between the two camera legs.
    pub feedback_hold_ms: u64,
    pub mount_recenter_ms: u64,
    pub center_button_recenter_ms: u64,
    pub walk_base_ms: u64,
    pub walk_px_per_unit: f32,
    pub walk_max_units: u32,
    pub transport_ms: u64,
    pub zoom_recenter_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            screen: ScreenSize::default(),
            pan_dead_zone_px: 10.0,
            double_tap_window_ms: 200,
            highlight_reset_delay_ms: 200,
            feedback_leg_ms: 2_000,
            feedback_hold_ms: 0,
            mount_recenter_ms: 1_000,
            center_button_recenter_ms: 2_000,
            walk_base_ms: 1_300,
            walk_px_per_unit: 50.0,
            walk_max_units: 10,
            transport_ms: 1,
            zoom_recenter_ms: 1,
        }
    }
}

impl ViewConfig {
    /// Rejects settings the camera and walk timing cannot work with.
    pub fn validate(&self) -> ViewResult<()> {
        let checks = [
            ("screen.width", self.screen.width.is_finite() && self.screen.width > 0.0),
            ("screen.height", self.screen.height.is_finite() && self.screen.height > 0.0),
            ("pan_dead_zone_px", self.pan_dead_zone_px.is_finite() && self.pan_dead_zone_px >= 0.0),
            ("walk_px_per_unit", self.walk_px_per_unit.is_finite() && self.walk_px_per_unit > 0.0),
            ("walk_max_units", self.walk_max_units >= 1),
        ];
        match checks.into_iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(ViewError::InvalidConfig { field }),
            None => Ok(()),
        }
    }
}
