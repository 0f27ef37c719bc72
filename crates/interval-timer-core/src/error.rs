//! Core error types for interval-timer-core.
//!
//! This module defines the error hierarchy using thiserror. Timer errors are
//! the only ones the state machine itself can produce; the rest belong to the
//! collaborators (settings store, audio backend) wrapped by this crate.

use std::path::PathBuf;
use thiserror::Error;

use crate::events::SoundKind;

/// Core error type for interval-timer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state machine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Settings / preset errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Audio backend errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialize errors
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the interval clock and state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// A duration or round count is outside its allowed range.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfiguration { field: &'static str, message: String },

    /// A clock operation was called in a state that does not allow it.
    ///
    /// Unreachable through the state machine, which gates every clock call
    /// on the current phase.
    #[error("Invalid clock state: {0}")]
    InvalidClockState(&'static str),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid settings value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Preset slot outside 1..=3
    #[error("Preset slot {slot} does not exist (valid slots: 1-{max})")]
    PresetSlot { slot: usize, max: usize },

    /// Loading a slot that was never saved
    #[error("Preset slot {0} is empty")]
    EmptyPreset(usize),
}

/// Audio backend errors. Never fatal to the timer.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Playback of a specific cue failed
    #[error("Failed to play {kind:?} cue: {message}")]
    PlaybackFailed { kind: SoundKind, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
