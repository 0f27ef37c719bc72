//! # Interval Timer Core Library
//!
//! This library provides the core logic for a lead-up / work / rest interval
//! timer. Front-ends (the bundled CLI, or a desktop GUI) are thin layers that
//! call commands on a single owned state machine and render its snapshots.
//!
//! ## Architecture
//!
//! - **Timer**: A monotonic-clock state machine that requires the caller to
//!   periodically invoke `tick(now)` for progress updates and transitions
//! - **Events**: Sound and fanfare cues returned from `tick`, never executed
//!   inline
//! - **Audio**: Best-effort dispatch of cues to a pluggable player
//! - **Storage**: TOML-based settings with three preset slots
//! - **Display**: Formatting and progress helpers for front-ends
//!
//! ## Key Components
//!
//! - [`IntervalStateMachine`]: Phase/round sequencer
//! - [`IntervalClock`]: Pause-aware phase clock
//! - [`Settings`]: Persisted preferences and presets
//! - [`CueDispatcher`]: Routes tick events to an [`AudioPlayer`]

pub mod audio;
pub mod display;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use audio::{AudioPlayer, CueDispatcher, DispatchReport, SilentPlayer};
pub use error::{AudioError, ConfigError, CoreError, TimerError};
pub use events::{SoundKind, TickOutcome, TimerEvent};
pub use storage::{Preset, Settings};
pub use timer::{
    ActivePhase, IntervalClock, IntervalStateMachine, Phase, PhaseConfig, RunState, TimerSnapshot,
};
