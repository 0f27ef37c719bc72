mod config;

pub use config::{
    Preset, Settings, LEAD_UP_RANGE, MINIMALIST_SIZE_RANGE, PRESET_SLOTS, REST_RANGE,
    ROUNDS_RANGE, WORK_RANGE,
};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/interval-timer[-dev]/` based on INTERVAL_TIMER_ENV.
///
/// Set INTERVAL_TIMER_ENV=dev to use development data directory, or
/// INTERVAL_TIMER_HOME to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("INTERVAL_TIMER_HOME") {
        let dir = PathBuf::from(home);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    let env = std::env::var("INTERVAL_TIMER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("interval-timer-dev")
    } else {
        base_dir.join("interval-timer")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
