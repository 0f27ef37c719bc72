use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// One of the three timed segments of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePhase {
    LeadUp,
    Work,
    Rest,
}

/// Phase as seen by the presentation layer.
///
/// Internally the state machine tracks `(ActivePhase, paused)`; this flat
/// enumeration only exists at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    LeadUp,
    Work,
    Rest,
    PausedLeadUp,
    PausedWork,
    PausedRest,
}

impl Phase {
    pub(crate) fn from_parts(active: ActivePhase, paused: bool) -> Self {
        match (active, paused) {
            (ActivePhase::LeadUp, false) => Phase::LeadUp,
            (ActivePhase::Work, false) => Phase::Work,
            (ActivePhase::Rest, false) => Phase::Rest,
            (ActivePhase::LeadUp, true) => Phase::PausedLeadUp,
            (ActivePhase::Work, true) => Phase::PausedWork,
            (ActivePhase::Rest, true) => Phase::PausedRest,
        }
    }

    /// The timed segment behind this phase, `None` for `Idle`.
    pub fn active(self) -> Option<ActivePhase> {
        match self {
            Phase::Idle => None,
            Phase::LeadUp | Phase::PausedLeadUp => Some(ActivePhase::LeadUp),
            Phase::Work | Phase::PausedWork => Some(ActivePhase::Work),
            Phase::Rest | Phase::PausedRest => Some(ActivePhase::Rest),
        }
    }

    pub fn is_paused(self) -> bool {
        matches!(
            self,
            Phase::PausedLeadUp | Phase::PausedWork | Phase::PausedRest
        )
    }

    /// True for the three phases whose clock is advancing.
    pub fn is_running(self) -> bool {
        matches!(self, Phase::LeadUp | Phase::Work | Phase::Rest)
    }

    pub fn is_idle(self) -> bool {
        self == Phase::Idle
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::LeadUp => "Lead-up",
            Phase::Work => "Work",
            Phase::Rest => "Rest",
            Phase::PausedLeadUp => "Lead-up (paused)",
            Phase::PausedWork => "Work (paused)",
            Phase::PausedRest => "Rest (paused)",
        }
    }
}

/// Durations and round count for one run.
///
/// Captured by the state machine at `start`; later edits to the host's
/// settings never reach a run already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub lead_up_secs: u32,
    pub work_secs: u32,
    pub rest_secs: u32,
    pub total_rounds: u32,
}

impl PhaseConfig {
    /// Build a config, rejecting out-of-range values.
    pub fn new(
        lead_up_secs: u32,
        work_secs: u32,
        rest_secs: u32,
        total_rounds: u32,
    ) -> Result<Self, TimerError> {
        let config = Self {
            lead_up_secs,
            work_secs,
            rest_secs,
            total_rounds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the minimums: work, rest and rounds must be at least 1.
    ///
    /// Lead-up may be zero, in which case the run starts in `Work`.
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.work_secs < 1 {
            return Err(invalid("work_secs", self.work_secs));
        }
        if self.rest_secs < 1 {
            return Err(invalid("rest_secs", self.rest_secs));
        }
        if self.total_rounds < 1 {
            return Err(invalid("total_rounds", self.total_rounds));
        }
        Ok(())
    }

    pub fn duration_of(&self, phase: ActivePhase) -> u64 {
        u64::from(match phase {
            ActivePhase::LeadUp => self.lead_up_secs,
            ActivePhase::Work => self.work_secs,
            ActivePhase::Rest => self.rest_secs,
        })
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            lead_up_secs: 5,
            work_secs: 60,
            rest_secs: 45,
            total_rounds: 10,
        }
    }
}

fn invalid(field: &'static str, value: u32) -> TimerError {
    TimerError::InvalidConfiguration {
        field,
        message: format!("must be at least 1, got {value}"),
    }
}
