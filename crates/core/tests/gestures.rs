use possession_core::board::{Actor, BoardLayers, BoardSnapshot};
use possession_core::config::ViewConfig;
use possession_core::gesture::{
    Gesture, GestureRouter, HighlightRect, Selection, TouchEvent, TouchSample, highlight_rects,
};
use possession_core::grid::{CellIndex, Point, TileSize};
use possession_core::motion::{Facing, walk_duration_ms, walk_facing};

fn sample(x: f32, y: f32, now_ms: u64) -> TouchSample {
    TouchSample { x, y, now_ms }
}

fn cell(index: u32) -> CellIndex {
    CellIndex::new(index).expect("cell")
}

const NO_SELECTION: Selection<'static> = Selection { enabled: false, offset: Point::ZERO, rects: &[] };

#[test]
fn second_down_inside_window_toggles_zoom_once() {
    let mut router = GestureRouter::new(&ViewConfig::default());
    assert_eq!(router.handle(&TouchEvent::Down(sample(50.0, 50.0, 1_000)), &NO_SELECTION), None);
    assert_eq!(router.handle(&TouchEvent::Up(sample(50.0, 50.0, 1_040)), &NO_SELECTION), None);
    assert_eq!(
        router.handle(&TouchEvent::Down(sample(50.0, 50.0, 1_199)), &NO_SELECTION),
        Some(Gesture::DoubleTap)
    );
    assert_eq!(router.handle(&TouchEvent::Up(sample(50.0, 50.0, 1_220)), &NO_SELECTION), None);
    assert_eq!(router.handle(&TouchEvent::Down(sample(50.0, 50.0, 1_300)), &NO_SELECTION), None);
}

#[test]
fn second_down_at_window_edge_is_not_a_double_tap() {
    let mut router = GestureRouter::new(&ViewConfig::default());
    router.handle(&TouchEvent::Down(sample(50.0, 50.0, 1_000)), &NO_SELECTION);
    router.handle(&TouchEvent::Up(sample(50.0, 50.0, 1_050)), &NO_SELECTION);
    assert_eq!(router.handle(&TouchEvent::Down(sample(50.0, 50.0, 1_200)), &NO_SELECTION), None);
}

#[test]
fn jitter_inside_dead_zone_never_pans() {
    let mut router = GestureRouter::new(&ViewConfig::default());
    router.handle(&TouchEvent::Down(sample(100.0, 100.0, 0)), &NO_SELECTION);
    for (dx, dy) in [(10.0, 0.0), (-10.0, 10.0), (3.0, -7.5), (0.0, -10.0)] {
        let event = TouchEvent::Move(sample(100.0 + dx, 100.0 + dy, 16));
        assert_eq!(router.handle(&event, &NO_SELECTION), None);
    }
    assert_eq!(router.handle(&TouchEvent::Up(sample(104.0, 96.0, 40)), &NO_SELECTION), None);
}

#[test]
fn crossing_dead_zone_on_one_axis_pans() {
    let mut router = GestureRouter::new(&ViewConfig::default());
    router.handle(&TouchEvent::Down(sample(100.0, 100.0, 0)), &NO_SELECTION);
    assert_eq!(
        router.handle(&TouchEvent::Move(sample(100.0, 111.0, 16)), &NO_SELECTION),
        Some(Gesture::Pan(Point::new(0.0, 11.0)))
    );
    assert!(router.is_panning());
}

#[test]
fn first_rectangle_wins_and_misses_arm_the_reset() {
    let rects = [
        HighlightRect { cell: cell(7), x_min: 0.0, y_min: 0.0, x_max: 10.0, y_max: 10.0 },
        HighlightRect { cell: cell(8), x_min: 20.0, y_min: 20.0, x_max: 30.0, y_max: 30.0 },
    ];
    let selection = Selection { enabled: true, offset: Point::ZERO, rects: &rects };
    let mut router = GestureRouter::new(&ViewConfig::default());

    router.handle(&TouchEvent::Down(sample(5.0, 5.0, 0)), &selection);
    assert_eq!(
        router.handle(&TouchEvent::Up(sample(5.0, 5.0, 30)), &selection),
        Some(Gesture::Selected(cell(7)))
    );
    assert_eq!(router.pending_reset_ms(), None);

    router.handle(&TouchEvent::Down(sample(15.0, 15.0, 1_000)), &selection);
    assert_eq!(
        router.handle(&TouchEvent::Up(sample(15.0, 15.0, 1_030)), &selection),
        Some(Gesture::Missed)
    );
    assert_eq!(router.pending_reset_ms(), Some(1_230));
    assert!(!router.poll_reset(1_229));
    assert!(router.poll_reset(1_230));
}

#[test]
fn hit_test_list_follows_highlight_layer() {
    let mut board = BoardSnapshot::blank();
    board.cell_mut(cell(41)).is_highlighted = true;
    let layers = BoardLayers::derive(&board, Actor::Priest);
    let rects = highlight_rects(&layers, TileSize::new(64).expect("tile"));
    assert_eq!(
        rects,
        vec![HighlightRect { cell: cell(41), x_min: 64.0, y_min: 64.0, x_max: 128.0, y_max: 128.0 }]
    );
}

#[test]
fn walk_cycle_picks_direction_from_delta() {
    let from = Point::new(100.0, 100.0);
    for actor in [Actor::Priest, Actor::Monster] {
        assert_eq!(walk_facing(actor, from, Point::new(100.0, 50.0), Facing::Idle), Facing::WalkUp);
        assert_eq!(walk_facing(actor, from, Point::new(150.0, 100.0), Facing::Idle), Facing::WalkRight);
    }
}

#[test]
fn walk_duration_scales_with_distance_and_caps() {
    let config = ViewConfig::default();
    let from = Point::new(0.0, 0.0);
    assert_eq!(walk_duration_ms(from, Point::new(500.0, 0.0), &config), 13_000);
    assert_eq!(walk_duration_ms(from, Point::new(0.0, 100.0), &config), 2_600);
    assert_eq!(walk_duration_ms(from, Point::new(0.0, 5_000.0), &config), 13_000);
}
