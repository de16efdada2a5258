use app::app_loop::{AppState, PointerFrame};
use app::bar_layout::layout_bar;
use app::sandbox::{Sandbox, ZOOMED_OUT_TILE};
use possession_core::bar::bar_frame;
use possession_core::board::Actor;
use possession_core::command::Command;
use possession_core::config::ViewConfig;
use possession_core::grid::{CellIndex, Point};
use possession_core::props::ZoomLevel;
use possession_core::runtime::replay;

fn mounted() -> AppState {
    let config = ViewConfig::default();
    let layout = layout_bar(bar_frame(config.screen)).expect("layout");
    let mut app = AppState::new(Sandbox::new().expect("sandbox"), config, layout, 0).expect("app");
    app.tick(&PointerFrame::default(), 2_000).expect("settle");
    app
}

fn press(app: &mut AppState, at: Point, now_ms: u64) {
    let frame = PointerFrame { position: at, pressed: true, down: true, released: false };
    app.tick(&frame, now_ms).expect("press");
}

fn release(app: &mut AppState, at: Point, now_ms: u64) {
    let frame = PointerFrame { position: at, pressed: false, down: false, released: true };
    app.tick(&frame, now_ms).expect("release");
}

#[test]
fn tapping_a_highlighted_tile_walks_the_priest_there() {
    let mut app = mounted();
    let plan = app.plan(2_000);
    let sprite = plan.sprite.bounds.translated(Point::new(-plan.offset.x, -plan.offset.y));
    let on_sprite = Point::new(sprite.x + 10.0, sprite.y + 10.0);
    press(&mut app, on_sprite, 2_100);
    release(&mut app, on_sprite, 2_130);

    let east = CellIndex::from_column_row(4, 3).expect("cell");
    let rect = *app
        .runtime()
        .state()
        .highlight_rects()
        .iter()
        .find(|rect| rect.cell == east)
        .expect("east neighbour highlighted");
    let offset = app.plan(2_400).offset;
    let tap = Point::new(
        (rect.x_min + rect.x_max) / 2.0 - offset.x,
        (rect.y_min + rect.y_max) / 2.0 - offset.y,
    );
    press(&mut app, tap, 2_500);
    release(&mut app, tap, 2_530);
    assert!(app.frame_commands.contains(&Command::Move(east)));
    assert!(app.frame_commands.contains(&Command::IncrementTurnCounter));
    assert_eq!(app.runtime().state().props().human_cell, east);

    app.tick(&PointerFrame::default(), 40_000).expect("finish walk");
    assert!(app.frame_commands.contains(&Command::ShowMoves(Actor::Priest)));
    assert!(app.runtime().state().sprite().in_flight().is_none());

    let replayed = replay(app.trace()).expect("replay");
    assert_eq!(replayed.snapshot_hash, app.runtime().state().snapshot_hash());
}

#[test]
fn double_tap_on_the_map_zooms_out_and_hides_controls() {
    let mut app = mounted();
    let spot = Point::new(60.0, 400.0);
    press(&mut app, spot, 3_000);
    release(&mut app, spot, 3_020);
    press(&mut app, spot, 3_100);
    assert!(app.frame_commands.contains(&Command::AlterZoom));
    release(&mut app, spot, 3_120);

    let state = app.runtime().state();
    assert_eq!(state.props().tile_size.get(), ZOOMED_OUT_TILE);
    assert_eq!(state.level(), ZoomLevel::Out);
    assert!(app.plan(3_200).controls.is_empty());
}
