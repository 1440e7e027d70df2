//! File logging. The terminal belongs to the TUI, so records go to
//! `dashtop.log` in the config dir. Filter from `DASHTOP_LOG` (default `info`).

use std::{fs, path::PathBuf, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::config::config_dir;

pub const LOG_ENV: &str = "DASHTOP_LOG";

pub fn log_path() -> PathBuf {
    config_dir().join("dashtop.log")
}

/// Returns the log file path, or `None` if it could not be opened (logging is
/// then off; the dashboard still runs).
pub fn init() -> Option<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(path)
}
