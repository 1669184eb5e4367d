mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DurationsConfig, LoggingConfig, NotificationsConfig};
pub use database::{CompletionRecorder, DailyStats, StatsDb};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the pomotimer data directory, creating it if needed.
///
/// `POMOTIMER_HOME` overrides the location outright. Otherwise it is
/// `~/.config/pomotimer[-dev]/` based on POMOTIMER_ENV (set it to `dev`
/// to use a development data directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOTIMER_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOTIMER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomotimer-dev")
            } else {
                base_dir.join("pomotimer")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
