// src/util/log.rs

//! File-backed tracing setup. The terminal belongs to the UI, so log output
//! goes to `<log_dir>/role-console.log`, truncated on every start.

use std::fs::{create_dir_all, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, RoleConsoleError};

pub const LOG_FILE_NAME: &str = "role-console.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// `DEBUG=true` raises the default level when `RUST_LOG` is unset.
pub fn debug_enabled() -> bool {
    std::env::var("DEBUG").unwrap_or_default() == "true"
}

pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

/// Install the global subscriber. Returns the log file path.
pub fn init_logging(log_dir: &Path) -> Result<PathBuf> {
    create_dir_all(log_dir)?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = File::create(&log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug_enabled())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .try_init()
        .map_err(|e| RoleConsoleError::LoggingError(e.to_string()))?;

    Ok(log_path)
}
