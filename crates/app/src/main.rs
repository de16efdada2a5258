mod frame_input;
mod render;
mod ui_text;
mod window_config;

use app::app_loop::AppState;
use app::bar_layout::layout_bar;
use app::sandbox::Sandbox;
use app::{default_trace_path, format_snapshot_hash, view_config_file};
use frame_input::capture_frame_input;
use log::LevelFilter;
use macroquad::prelude::*;
use possession_core::bar::bar_frame;
use possession_core::runtime::{ViewTrace, replay};
use render::{TextureCache, draw_frame};
use std::env;
use std::path::Path;
use window_config::window_conf;

const ASSET_DIR: &str = "assets";

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    builder.parse_default_env();
    builder.init();
}

fn clock_ms() -> u64 {
    (get_time() * 1000.0) as u64
}

fn save_trace(trace: &ViewTrace) {
    let Some(path) = default_trace_path() else {
        log::warn!("no data directory; session trace not saved");
        return;
    };
    match trace.write_atomic(&path) {
        Ok(()) => log::info!("saved session trace to {}", path.display()),
        Err(e) => {
            log::error!("failed to save session trace to {}: {e}", path.display());
            return;
        }
    }
    match replay(trace) {
        Ok(result) => log::info!("trace hash {}", format_snapshot_hash(result.snapshot_hash)),
        Err(e) => log::warn!("saved trace does not replay: {e}"),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let config = view_config_file::load_or_default(&args);
    let bar_layout = match layout_bar(bar_frame(config.screen)) {
        Ok(layout) => layout,
        Err(e) => {
            log::error!("bar layout failed: {e}");
            return;
        }
    };
    let sandbox = match Sandbox::new() {
        Ok(sandbox) => sandbox,
        Err(e) => {
            log::error!("could not build the demo board: {e}");
            return;
        }
    };
    let mut app = match AppState::new(sandbox, config, bar_layout, clock_ms()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("could not mount the view: {e}");
            return;
        }
    };
    let textures = TextureCache::load(Path::new(ASSET_DIR)).await;

    loop {
        let input = capture_frame_input();
        let now_ms = clock_ms();
        if let Err(e) = app.tick(&input.pointer, now_ms) {
            log::error!("view rejected frame input: {e}");
        }

        draw_frame(&app.plan(now_ms), app.bar_layout(), &textures);

        if input.save_trace || input.quit {
            save_trace(app.trace());
        }
        if input.quit {
            break;
        }
        next_frame().await
    }
}
