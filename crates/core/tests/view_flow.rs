use possession_core::board::{Actor, BoardSnapshot};
use possession_core::command::Command;
use possession_core::config::ViewConfig;
use possession_core::engine::ViewEvent;
use possession_core::gesture::{TouchEvent, TouchSample};
use possession_core::grid::{CellIndex, TileSize};
use possession_core::motion::MotionKind;
use possession_core::props::{Counters, FeedbackFlags, ViewProps, ZoomLevels};
use possession_core::runtime::{ViewRuntime, replay};

fn cell(column: u32, row: u32) -> CellIndex {
    CellIndex::from_column_row(column, row).expect("cell")
}

fn tile(pixels: u32) -> TileSize {
    TileSize::new(pixels).expect("tile")
}

fn props(player: CellIndex, tile_size: TileSize) -> ViewProps {
    ViewProps {
        board: BoardSnapshot::blank(),
        human_cell: player,
        monster_cell: cell(39, 0),
        is_human: true,
        tile_size,
        zoom: ZoomLevels { zoomed_in: tile(64), zoomed_out: tile(25) },
        game_active: true,
        out_of_moves: false,
        opponent_visible: false,
        bar_active: true,
        feedback: FeedbackFlags::default(),
        counters: Counters { turn_counter: 1, ..Counters::default() },
    }
}

fn touch(event: fn(TouchSample) -> TouchEvent, now_ms: u64) -> ViewEvent {
    ViewEvent::Touch(event(TouchSample { x: 120.0, y: 120.0, now_ms }))
}

#[test]
fn zoom_toggle_mid_walk_snaps_the_sprite() {
    let mut runtime =
        ViewRuntime::mount(props(cell(10, 10), tile(64)), ViewConfig::default(), 0).expect("mount");
    runtime
        .dispatch(ViewEvent::Props { props: Box::new(props(cell(10, 12), tile(64))), now_ms: 2_000 })
        .expect("walk");
    assert_eq!(runtime.state().sprite().in_flight(), Some(MotionKind::Walk));

    let mut commands = runtime.dispatch(touch(TouchEvent::Down, 2_500)).expect("down");
    commands.extend(runtime.dispatch(touch(TouchEvent::Up, 2_520)).expect("up"));
    commands.extend(runtime.dispatch(touch(TouchEvent::Down, 2_600)).expect("second down"));
    assert_eq!(commands, vec![Command::AlterZoom]);

    runtime
        .dispatch(ViewEvent::Props { props: Box::new(props(cell(10, 12), tile(25))), now_ms: 2_650 })
        .expect("zoomed out");
    assert_eq!(runtime.state().sprite().in_flight(), Some(MotionKind::Transport));

    let finished = runtime.dispatch(ViewEvent::Tick { now_ms: 2_651 }).expect("tick");
    assert_eq!(finished, vec![Command::ShowMoves(Actor::Priest)]);
    assert_eq!(runtime.state().sprite().in_flight(), None);
    assert!(!runtime.state().just_zoomed());
}

#[test]
fn malformed_props_keep_the_previous_state() {
    let mut runtime =
        ViewRuntime::mount(props(cell(10, 10), tile(64)), ViewConfig::default(), 0).expect("mount");
    let before = runtime.state().snapshot_hash();
    let mut bad = props(cell(10, 11), tile(64));
    bad.tile_size = tile(40);
    assert!(runtime.dispatch(ViewEvent::Props { props: Box::new(bad), now_ms: 100 }).is_err());
    assert_eq!(runtime.state().snapshot_hash(), before);
    assert_eq!(runtime.state().props().human_cell, cell(10, 10));
}

#[test]
fn trace_replay_matches_live_session() {
    let mut runtime =
        ViewRuntime::mount(props(cell(5, 5), tile(64)), ViewConfig::default(), 0).expect("mount");
    let mut live = Vec::new();
    for event in [
        ViewEvent::Props { props: Box::new(props(cell(6, 5), tile(64))), now_ms: 1_200 },
        touch(TouchEvent::Down, 1_500),
        ViewEvent::Touch(TouchEvent::Move(TouchSample { x: 180.0, y: 120.0, now_ms: 1_520 })),
        ViewEvent::Touch(TouchEvent::Up(TouchSample { x: 200.0, y: 140.0, now_ms: 1_540 })),
        ViewEvent::Tick { now_ms: 4_000 },
    ] {
        live.extend(runtime.dispatch(event).expect("dispatch"));
    }
    assert_eq!(live, vec![Command::ShowMoves(Actor::Priest)]);

    let replayed = replay(runtime.trace()).expect("replay");
    assert_eq!(replayed.commands, live);
    assert_eq!(replayed.snapshot_hash, runtime.state().snapshot_hash());
}
