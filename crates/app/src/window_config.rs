//! Window configuration for the desktop app.

use app::APP_NAME;
use app::view_config_file;
use macroquad::window::Conf;
use possession_core::config::ScreenSize;
use std::env;

pub fn build_window_conf(screen: ScreenSize) -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: screen.width.round() as i32,
        window_height: screen.height.round() as i32,
        high_dpi: true,
        window_resizable: false,
        ..Default::default()
    }
}

/// Sizes the window from the same settings file the view is mounted with.
pub fn window_conf() -> Conf {
    let args: Vec<String> = env::args().collect();
    build_window_conf(view_config_file::load_or_default(&args).screen)
}
