use super::{asset_names, on_screen, placeholder_color};
use macroquad::prelude::{DARKGRAY, GOLD, PURPLE};
use possession_core::grid::{Point, Rect};

#[test]
fn asset_list_covers_tiles_sprites_and_buttons() {
    let names = asset_names();
    for expected in ["floor-c-1", "fog-nw", "shrine-blessed", "priest-walk-up", "monster-idle"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    assert!(names.contains(&"center-camera"));
    let mut sorted = names.clone();
    sorted.dedup();
    assert_eq!(sorted.len(), names.len());
}

#[test]
fn placeholders_follow_asset_family() {
    assert_eq!(placeholder_color("shrine-blessed"), GOLD);
    assert_eq!(placeholder_color("monster-walk-left"), PURPLE);
    assert_eq!(placeholder_color("echo-north"), DARKGRAY);
    assert!(placeholder_color("fog-se").a < 1.0);
}

#[test]
fn map_rects_shift_by_camera_offset() {
    let rect = on_screen(Rect::new(1280.0, 1216.0, 64.0, 128.0), Point::new(1092.5, 946.5));
    assert_eq!(rect, Rect::new(187.5, 269.5, 64.0, 128.0));
}
