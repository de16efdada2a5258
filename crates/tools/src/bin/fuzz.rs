use anyhow::{Result, bail};
use clap::Parser;
use log::LevelFilter;
use possession_core::board::{Actor, BoardSnapshot};
use possession_core::command::{BarItem, Command, Direction, FocusTarget, ViewHost};
use possession_core::config::ViewConfig;
use possession_core::controls::ControlAction;
use possession_core::engine::ViewEvent;
use possession_core::gesture::{TouchEvent, TouchSample};
use possession_core::grid::{CellIndex, TileSize};
use possession_core::props::{Counters, FeedbackFlags, ViewProps, ZoomLevels};
use possession_core::runtime::{ViewRuntime, replay};
use possession_core::viewport::max_offset;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1000)]
    steps: u32,
    /// Keep the recorded trace here for the replay tool
    #[arg(short, long)]
    out: Option<PathBuf>,
}

const ZOOMED_IN: u32 = 64;
const ZOOMED_OUT: u32 = 25;

fn pick(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

/// Answers view commands the way a minimal rules engine would.
struct FuzzHost {
    props: ViewProps,
    changed: bool,
}

impl FuzzHost {
    fn new() -> Result<Self> {
        let zoom =
            ZoomLevels { zoomed_in: TileSize::new(ZOOMED_IN)?, zoomed_out: TileSize::new(ZOOMED_OUT)? };
        let props = ViewProps {
            board: BoardSnapshot::blank(),
            human_cell: CellIndex::from_column_row(5, 5)?,
            monster_cell: CellIndex::from_column_row(34, 34)?,
            is_human: true,
            tile_size: zoom.zoomed_in,
            zoom,
            game_active: true,
            out_of_moves: false,
            opponent_visible: false,
            bar_active: true,
            feedback: FeedbackFlags::default(),
            counters: Counters::default(),
        };
        Ok(Self { props, changed: false })
    }

    fn clear_highlights(&mut self) {
        for cell in CellIndex::all() {
            self.props.board.cell_mut(cell).is_highlighted = false;
        }
    }

    fn highlight_neighbours(&mut self) {
        let from = self.props.acting_cell();
        let (column, row) = (from.column(), from.row());
        let candidates = [
            (column.checked_sub(1), Some(row)),
            (column.checked_add(1), Some(row)),
            (Some(column), row.checked_sub(1)),
            (Some(column), row.checked_add(1)),
        ];
        for (c, r) in candidates {
            if let (Some(c), Some(r)) = (c, r)
                && let Ok(cell) = CellIndex::from_column_row(c, r)
            {
                self.props.board.cell_mut(cell).is_highlighted = true;
            }
        }
        self.changed = true;
    }
}

impl ViewHost for FuzzHost {
    fn move_to(&mut self, cell: CellIndex) {
        self.clear_highlights();
        match self.props.actor() {
            Actor::Priest => self.props.human_cell = cell,
            Actor::Monster => self.props.monster_cell = cell,
        }
        self.changed = true;
    }

    fn increment_turn_counter(&mut self) {
        self.props.counters.turn_counter += 1;
        self.changed = true;
    }

    fn echolocate(&mut self, _direction: Direction) {
        let monster = self.props.monster_cell;
        self.props.board.cell_mut(monster).was_echoed = true;
        self.props.feedback = FeedbackFlags {
            highlight_feedback: true,
            human_feedback: false,
            monster_feedback: true,
            feedback_cell: Some(monster),
        };
        self.changed = true;
    }

    fn focus(&mut self, target: FocusTarget) {
        if target == FocusTarget::Human {
            self.props.opponent_visible = true;
            self.changed = true;
        }
    }

    fn alter_zoom(&mut self) {
        let zoom = self.props.zoom;
        self.props.tile_size =
            if self.props.tile_size == zoom.zoomed_in { zoom.zoomed_out } else { zoom.zoomed_in };
        self.changed = true;
    }

    fn reset_highlighted(&mut self) {
        self.clear_highlights();
        self.changed = true;
    }

    fn show_human_moves(&mut self) {
        if self.props.is_human {
            self.highlight_neighbours();
        }
    }

    fn show_monster_moves(&mut self) {
        if !self.props.is_human {
            self.highlight_neighbours();
        }
    }

    fn feedback_presented(&mut self) {
        self.props.feedback = FeedbackFlags::default();
        self.changed = true;
    }

    fn item_selected(&mut self, item: BarItem) {
        if item == BarItem::EndTurn {
            self.props.is_human = !self.props.is_human;
            self.props.opponent_visible = false;
            self.clear_highlights();
            self.changed = true;
        }
    }
}

/// One user gesture as a short burst of view events.
fn gesture_events(rng: &mut ChaCha8Rng, now_ms: &mut u64) -> Vec<ViewEvent> {
    let at = |x: f32, y: f32, now_ms: u64| TouchSample { x, y, now_ms };
    let (x, y) = (pick(rng, 375) as f32, pick(rng, 540) as f32);
    let mut events = Vec::new();
    match pick(rng, 6) {
        0 | 1 => {
            events.push(ViewEvent::Touch(TouchEvent::Down(at(x, y, *now_ms))));
            *now_ms += 40 + pick(rng, 120);
            events.push(ViewEvent::Touch(TouchEvent::Up(at(x, y, *now_ms))));
        }
        2 => {
            let (dx, dy) = (pick(rng, 200) as f32 - 100.0, pick(rng, 200) as f32 - 100.0);
            events.push(ViewEvent::Touch(TouchEvent::Down(at(x, y, *now_ms))));
            for step in 1..=4 {
                *now_ms += 16;
                let t = step as f32 / 4.0;
                events.push(ViewEvent::Touch(TouchEvent::Move(at(x + dx * t, y + dy * t, *now_ms))));
            }
            events.push(ViewEvent::Touch(TouchEvent::Up(at(x + dx, y + dy, *now_ms))));
        }
        3 => {
            for _ in 0..2 {
                events.push(ViewEvent::Touch(TouchEvent::Down(at(x, y, *now_ms))));
                *now_ms += 30;
                events.push(ViewEvent::Touch(TouchEvent::Up(at(x, y, *now_ms))));
                *now_ms += 60;
            }
        }
        4 => {
            let action = match pick(rng, 6) {
                0 => ControlAction::SpriteTapped,
                1 => ControlAction::CenterCamera,
                2 => ControlAction::PickTarget,
                3 => ControlAction::Echo(Direction::Radius),
                4 => ControlAction::TargetPicked(FocusTarget::Human),
                _ => ControlAction::Bar(BarItem::EndTurn),
            };
            events.push(ViewEvent::Control { action, now_ms: *now_ms });
        }
        _ => {}
    }
    *now_ms += pick(rng, 600);
    events.push(ViewEvent::Tick { now_ms: *now_ms });
    events
}

fn dispatch(runtime: &mut ViewRuntime, host: &mut FuzzHost, event: ViewEvent) -> Result<()> {
    let now_ms = event.now_ms();
    let mut pending: Vec<Command> = runtime.dispatch(event)?;
    while !pending.is_empty() {
        for command in &pending {
            command.dispatch(host);
        }
        if !host.changed {
            break;
        }
        host.changed = false;
        let props = Box::new(host.props.clone());
        pending = runtime.dispatch(ViewEvent::Props { props, now_ms })?;
    }
    Ok(())
}

fn check_camera(runtime: &ViewRuntime, now_ms: u64) -> Result<()> {
    let viewport = runtime.state().viewport();
    let offset = viewport.offset(now_ms);
    let max = max_offset(viewport.tile(), viewport.screen());
    if !(0.0..=max.x).contains(&offset.x) || !(0.0..=max.y).contains(&offset.y) {
        bail!("Invariant failed: camera {offset:?} outside 0..={max:?}");
    }
    Ok(())
}

fn run_session(seed: u64, steps: u32) -> Result<ViewRuntime> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut host = FuzzHost::new()?;
    let mut runtime = ViewRuntime::mount(host.props.clone(), ViewConfig::default(), 0)?;
    let mut now_ms = 0;

    for _ in 0..steps {
        for event in gesture_events(&mut rng, &mut now_ms) {
            dispatch(&mut runtime, &mut host, event)?;
            check_camera(&runtime, now_ms)?;
        }
    }

    let replayed = replay(runtime.trace())?;
    if replayed.snapshot_hash != runtime.state().snapshot_hash() {
        bail!("Invariant failed: replay diverged on seed {seed}");
    }
    Ok(runtime)
}

fn main() -> Result<()> {
    env_logger::Builder::new().filter_level(LevelFilter::Warn).parse_default_env().init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} gestures...", args.seed, args.steps);
    let runtime = run_session(args.seed, args.steps)?;
    println!(
        "{} events, snapshot hash 0x{:016x}",
        runtime.trace().events.len(),
        runtime.state().snapshot_hash()
    );
    if let Some(path) = &args.out {
        runtime.trace().write_atomic(path)?;
        println!("Trace written to {}", path.display());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
