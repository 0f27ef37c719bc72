//! Interval state machine.
//!
//! A poll-driven sequencer for lead-up, work and rest phases. It owns no
//! thread and never reads the system clock: the caller passes a monotonic
//! `now` into every command and calls `tick()` periodically (100 ms in the
//! bundled CLI; correctness does not depend on the cadence).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> LeadUp -> Work -> Rest -> Work -> ... -> Rest -> Idle
//!           \________^
//!            (lead-up 0)
//! any running phase <-> its paused variant
//! any non-idle phase -> Idle (stop)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = IntervalStateMachine::new(config);
//! timer.start(Instant::now())?;
//! // In a loop:
//! let outcome = timer.tick(Instant::now());
//! dispatcher.dispatch(&outcome);
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::clock::IntervalClock;
use super::phase::{ActivePhase, Phase, PhaseConfig};
use crate::display;
use crate::error::TimerError;
use crate::events::{SoundKind, TickOutcome, TimerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activity {
    Idle,
    Active { phase: ActivePhase, paused: bool },
}

/// Read-only view of the mutable run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    pub phase: Phase,
    /// Zero-based; reset to 0 whenever the machine is idle.
    pub current_round: u32,
    pub remaining_secs: u64,
    /// Set while a phase is running, `None` while paused or idle.
    pub phase_start: Option<Instant>,
    /// Elapsed time banked at the last pause; zero unless paused.
    pub paused_elapsed: Duration,
}

/// Serializable snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub current_round: u32,
    pub total_rounds: u32,
    pub remaining_secs: u64,
    pub phase_duration_secs: u64,
    /// 0.0 .. 1.0 progress within the current phase.
    pub progress: f64,
}

/// Workout phase/round sequencer.
#[derive(Debug, Clone)]
pub struct IntervalStateMachine {
    /// Config used by the next `start`.
    pending: PhaseConfig,
    /// Config captured by the last `start`.
    run: PhaseConfig,
    activity: Activity,
    current_round: u32,
    remaining_secs: u64,
    clock: IntervalClock,
}

impl IntervalStateMachine {
    /// Create an idle machine. The config is only validated at `start`.
    pub fn new(config: PhaseConfig) -> Self {
        Self {
            pending: config,
            run: config,
            activity: Activity::Idle,
            current_round: 0,
            remaining_secs: 0,
            clock: IntervalClock::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        match self.activity {
            Activity::Idle => Phase::Idle,
            Activity::Active { phase, paused } => Phase::from_parts(phase, paused),
        }
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Config of the active run, or of the next run while idle.
    pub fn config(&self) -> &PhaseConfig {
        match self.activity {
            Activity::Idle => &self.pending,
            Activity::Active { .. } => &self.run,
        }
    }

    pub fn snapshot(&self) -> RunState {
        RunState {
            phase: self.phase(),
            current_round: self.current_round,
            remaining_secs: self.remaining_secs,
            phase_start: self.clock.phase_start(),
            paused_elapsed: self.clock.paused_elapsed(),
        }
    }

    pub fn display(&self) -> TimerSnapshot {
        let phase = self.phase();
        let config = self.config();
        TimerSnapshot {
            phase,
            current_round: self.current_round,
            total_rounds: config.total_rounds,
            remaining_secs: self.remaining_secs,
            phase_duration_secs: phase.active().map_or(0, |p| config.duration_of(p)),
            progress: display::progress(phase, self.remaining_secs, config),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the config used by the next `start`. A running workout keeps
    /// the durations it started with.
    pub fn set_config(&mut self, config: PhaseConfig) {
        self.pending = config;
    }

    /// Begin a new run, restarting from round 0 if one is in progress.
    ///
    /// An invalid config is reported and leaves the machine untouched.
    pub fn start(&mut self, now: Instant) -> Result<(), TimerError> {
        self.pending.validate()?;
        self.run = self.pending;
        self.current_round = 0;
        let first = if self.run.lead_up_secs > 0 {
            ActivePhase::LeadUp
        } else {
            ActivePhase::Work
        };
        self.enter(first, now);
        info!(
            lead_up = self.run.lead_up_secs,
            work = self.run.work_secs,
            rest = self.run.rest_secs,
            rounds = self.run.total_rounds,
            "interval run started"
        );
        Ok(())
    }

    /// Freeze the running phase. Returns false if there was nothing to pause.
    pub fn pause(&mut self, now: Instant) -> bool {
        let Activity::Active { phase, paused: false } = self.activity else {
            return false;
        };
        if let Err(e) = self.clock.pause(now) {
            error!(error = %e, ?phase, "clock rejected pause");
            return false;
        }
        self.activity = Activity::Active { phase, paused: true };
        debug!(?phase, remaining = self.remaining_secs, "paused");
        true
    }

    /// Continue a paused phase. Returns false unless the machine was paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        let Activity::Active { phase, paused: true } = self.activity else {
            return false;
        };
        if let Err(e) = self.clock.resume(now) {
            error!(error = %e, ?phase, "clock rejected resume");
            return false;
        }
        self.activity = Activity::Active { phase, paused: false };
        debug!(?phase, remaining = self.remaining_secs, "resumed");
        true
    }

    /// Abort the run. Returns false if already idle.
    pub fn stop(&mut self) -> bool {
        if self.activity == Activity::Idle {
            return false;
        }
        debug!(phase = ?self.phase(), round = self.current_round, "stopped");
        self.go_idle();
        true
    }

    /// Recompute remaining time and apply at most one phase transition.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut events = Vec::new();
        if let Activity::Active { phase, paused: false } = self.activity {
            match self.clock.elapsed(now) {
                Ok(elapsed) => {
                    let duration = self.run.duration_of(phase);
                    self.remaining_secs = duration.saturating_sub(elapsed);
                    if elapsed >= duration {
                        self.advance(phase, now, &mut events);
                    }
                }
                Err(e) => error!(error = %e, ?phase, "clock not running during tick"),
            }
        }
        TickOutcome {
            phase: self.phase(),
            current_round: self.current_round,
            remaining_secs: self.remaining_secs,
            events,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn advance(&mut self, finished: ActivePhase, now: Instant, events: &mut Vec<TimerEvent>) {
        match finished {
            ActivePhase::LeadUp => self.enter(ActivePhase::Work, now),
            ActivePhase::Work => {
                self.enter(ActivePhase::Rest, now);
                events.push(TimerEvent::PlaySound(SoundKind::WorkEnd));
            }
            ActivePhase::Rest if self.current_round + 1 < self.run.total_rounds => {
                self.current_round += 1;
                self.enter(ActivePhase::Work, now);
                events.push(TimerEvent::PlaySound(SoundKind::RestEnd));
            }
            ActivePhase::Rest => {
                self.go_idle();
                events.push(TimerEvent::PlaySound(SoundKind::AllComplete));
                events.push(TimerEvent::FanfareTriggered);
                info!(rounds = self.run.total_rounds, "interval run complete");
            }
        }
    }

    fn enter(&mut self, phase: ActivePhase, now: Instant) {
        self.activity = Activity::Active { phase, paused: false };
        self.remaining_secs = self.run.duration_of(phase);
        self.clock.begin(now);
        debug!(?phase, round = self.current_round, "entered phase");
    }

    fn go_idle(&mut self) {
        self.activity = Activity::Idle;
        self.current_round = 0;
        self.remaining_secs = 0;
        self.clock.clear();
    }
}
