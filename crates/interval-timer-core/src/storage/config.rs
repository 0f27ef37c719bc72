//! TOML-based settings.
//!
//! Stores user preferences including:
//! - Workout durations and round count
//! - Window behaviour toggles (always on top, minimize after completion)
//! - Minimalist indicator size and visibility toggles
//! - Up to three named preset slots
//!
//! Settings are stored at `~/.config/interval-timer/settings.toml`.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::timer::PhaseConfig;

pub const PRESET_SLOTS: usize = 3;

pub const WORK_RANGE: RangeInclusive<u32> = 2..=180;
pub const REST_RANGE: RangeInclusive<u32> = 2..=90;
pub const LEAD_UP_RANGE: RangeInclusive<u32> = 0..=30;
pub const ROUNDS_RANGE: RangeInclusive<u32> = 1..=50;
pub const MINIMALIST_SIZE_RANGE: RangeInclusive<u32> = 20..=500;

/// Saved copy of the four workout values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub work_duration: u32,
    pub rest_duration: u32,
    pub lead_up_duration: u32,
    pub rounds: u32,
    pub saved_at: DateTime<Utc>,
}

impl Preset {
    /// Multi-line summary used for menu tooltips.
    pub fn summary(&self) -> String {
        format!(
            "Workout: {}s\nRest: {}s\nLead-up: {}s\nRounds: {}",
            self.work_duration, self.rest_duration, self.lead_up_duration, self.rounds
        )
    }
}

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/interval-timer/settings.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_work_duration")]
    pub work_duration: u32,
    #[serde(default = "default_rest_duration")]
    pub rest_duration: u32,
    #[serde(default = "default_lead_up_duration")]
    pub lead_up_duration: u32,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_minimalist_mode_size")]
    pub minimalist_mode_size: u32,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default)]
    pub minimize_after_complete: bool,
    #[serde(default)]
    pub minimalist_mode_active: bool,
    #[serde(default)]
    pub minimalist_rounds_active: bool,
    #[serde(default)]
    pub minimalist_time_active: bool,
    #[serde(default)]
    pub minimalist_progressbar_active: bool,
    /// Saved presets keyed by slot number ("1" ..= "3").
    #[serde(default, deserialize_with = "deserialize_presets")]
    pub presets: BTreeMap<String, Preset>,
}

// Default functions
fn default_work_duration() -> u32 {
    60
}
fn default_rest_duration() -> u32 {
    45
}
fn default_lead_up_duration() -> u32 {
    5
}
fn default_rounds() -> u32 {
    10
}
fn default_minimalist_mode_size() -> u32 {
    120
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: default_work_duration(),
            rest_duration: default_rest_duration(),
            lead_up_duration: default_lead_up_duration(),
            rounds: default_rounds(),
            minimalist_mode_size: default_minimalist_mode_size(),
            always_on_top: false,
            minimize_after_complete: false,
            minimalist_mode_active: false,
            minimalist_rounds_active: false,
            minimalist_time_active: false,
            minimalist_progressbar_active: false,
            presets: BTreeMap::new(),
        }
    }
}

/// Keep only the slots `preset list` can show.
fn deserialize_presets<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Preset>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut presets = BTreeMap::<String, Preset>::deserialize(deserializer)?;
    presets.retain(|slot, _| {
        let known = (1..=PRESET_SLOTS).any(|n| n.to_string() == *slot);
        if !known {
            warn!(slot = slot.as_str(), "ignoring preset outside slots 1-{PRESET_SLOTS}");
        }
        known
    });
    Ok(presets)
}

/// Allowed range for range-checked numeric keys.
fn range_for(key: &str) -> Option<RangeInclusive<u32>> {
    match key {
        "work_duration" => Some(WORK_RANGE),
        "rest_duration" => Some(REST_RANGE),
        "lead_up_duration" => Some(LEAD_UP_RANGE),
        "rounds" => Some(ROUNDS_RANGE),
        "minimalist_mode_size" => Some(MINIMALIST_SIZE_RANGE),
        _ => None,
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let obj = root
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(format!("expected true or false: {e}")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u32>()
                    .map_err(|e| invalid(format!("expected a whole number: {e}")))?;
                if let Some(range) = range_for(key) {
                    if !range.contains(&n) {
                        return Err(invalid(format!(
                            "{n} is outside {}..={}",
                            range.start(),
                            range.end()
                        )));
                    }
                }
                serde_json::Value::Number(n.into())
            }
            // Presets are managed through save_preset / load_preset.
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };

        obj.insert(key.to_string(), new_value);
        Ok(())
    }

    /// Default settings file location.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("settings.toml"))
    }

    /// Load from the default location, creating it with defaults if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// default settings cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`.
    ///
    /// A missing or unparsable file is replaced by defaults, which are
    /// written back so the next load succeeds. A file that exists but
    /// cannot be read is left alone and reported as `LoadFailed`.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Settings>(&content) {
                Ok(settings) => {
                    debug!(path = %path.display(), "settings loaded");
                    Ok(settings)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "settings unreadable, restoring defaults");
                    let settings = Self::default();
                    settings.save_to(path)?;
                    Ok(settings)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, writing defaults");
                let settings = Self::default();
                settings.save_to(path)?;
                Ok(settings)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning defaults on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default settings");
            Self::default()
        })
    }

    /// Get a settings value as string by dot-separated key
    /// (e.g. `rounds`, `presets.1.work_duration`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a top-level scalar value by key. Durations and sizes are range-checked.
    ///
    /// Does not save; call [`Settings::save`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Durations as a run config for the state machine.
    pub fn phase_config(&self) -> PhaseConfig {
        PhaseConfig {
            lead_up_secs: self.lead_up_duration,
            work_secs: self.work_duration,
            rest_secs: self.rest_duration,
            total_rounds: self.rounds,
        }
    }

    /// Grow or shrink the minimalist indicator, clamped to its range.
    pub fn adjust_minimalist_size(&mut self, delta: i32) -> u32 {
        let size = i64::from(self.minimalist_mode_size) + i64::from(delta);
        let clamped = size.clamp(
            i64::from(*MINIMALIST_SIZE_RANGE.start()),
            i64::from(*MINIMALIST_SIZE_RANGE.end()),
        );
        // clamped lies within a u32 range
        self.minimalist_mode_size = clamped as u32;
        self.minimalist_mode_size
    }

    pub fn reset_minimalist_size(&mut self) {
        self.minimalist_mode_size = default_minimalist_mode_size();
    }

    // ── Presets ──────────────────────────────────────────────────────

    fn slot_key(slot: usize) -> std::result::Result<String, ConfigError> {
        if (1..=PRESET_SLOTS).contains(&slot) {
            Ok(slot.to_string())
        } else {
            Err(ConfigError::PresetSlot {
                slot,
                max: PRESET_SLOTS,
            })
        }
    }

    /// Capture the current durations into a 1-based slot.
    pub fn save_preset(&mut self, slot: usize) -> Result<&Preset> {
        let key = Self::slot_key(slot)?;
        let preset = Preset {
            work_duration: self.work_duration,
            rest_duration: self.rest_duration,
            lead_up_duration: self.lead_up_duration,
            rounds: self.rounds,
            saved_at: Utc::now(),
        };
        self.presets.insert(key.clone(), preset);
        debug!(slot, "preset saved");
        Ok(&self.presets[&key])
    }

    /// Copy a saved slot back into the current durations.
    pub fn load_preset(&mut self, slot: usize) -> Result<()> {
        let key = Self::slot_key(slot)?;
        let preset = self
            .presets
            .get(&key)
            .cloned()
            .ok_or(ConfigError::EmptyPreset(slot))?;
        self.work_duration = preset.work_duration;
        self.rest_duration = preset.rest_duration;
        self.lead_up_duration = preset.lead_up_duration;
        self.rounds = preset.rounds;
        Ok(())
    }

    pub fn preset(&self, slot: usize) -> Result<Option<&Preset>> {
        let key = Self::slot_key(slot)?;
        Ok(self.presets.get(&key))
    }

    /// Tooltip text for a slot, `"Empty"` if unused.
    pub fn preset_summary(&self, slot: usize) -> Result<String> {
        Ok(self
            .preset(slot)?
            .map_or_else(|| "Empty".to_string(), Preset::summary))
    }
}
