pub mod app_loop;
pub mod bar_layout;
pub mod sandbox;
pub mod view_config_file;

use directories::ProjectDirs;
use std::path::PathBuf;

pub const APP_NAME: &str = "Possession";

/// Where the last session's event trace is kept for the replay tool.
pub fn default_trace_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push("last_session.json");
        path
    })
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}
