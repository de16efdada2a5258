//! TOML settings file for the view tunables.

use directories::ProjectDirs;
use possession_core::config::ViewConfig;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

pub const CONFIG_ENV_VAR: &str = "POSSESSION_CONFIG";
pub const CONFIG_FILE_NAME: &str = "possession.toml";

pub fn get_default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push(CONFIG_FILE_NAME);
        path
    })
}

/// `--config <path>` wins over the environment variable, which wins over the platform default.
pub fn resolve_path(args: &[String], env_override: Option<&str>) -> Option<PathBuf> {
    let flag = args.iter().position(|arg| arg == "--config").and_then(|at| args.get(at + 1));
    flag.map(PathBuf::from)
        .or_else(|| env_override.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or_else(get_default_path)
}

pub fn load(path: &Path) -> io::Result<ViewConfig> {
    let content = fs::read_to_string(path)?;
    let config: ViewConfig =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    config.validate().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(config)
}

pub fn write_atomic(config: &ViewConfig, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    let text = toml::to_string_pretty(config).map_err(io::Error::other)?;
    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Loads the settings for this process. A missing file means defaults; a broken one is logged
/// and also falls back to defaults.
pub fn load_or_default(args: &[String]) -> ViewConfig {
    let env_override = env::var(CONFIG_ENV_VAR).ok();
    let Some(path) = resolve_path(args, env_override.as_deref()) else {
        return ViewConfig::default();
    };
    match load(&path) {
        Ok(config) => {
            log::info!("loaded view settings from {}", path.display());
            config
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => ViewConfig::default(),
        Err(e) => {
            log::warn!("ignoring view settings at {}: {e}", path.display());
            ViewConfig::default()
        }
    }
}
