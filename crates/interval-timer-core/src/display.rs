//! Presentation helpers.
//!
//! Pure functions that turn timer state into the strings, colours and
//! fractions a front-end shows. Nothing here touches timer state.

use std::time::{Duration, Instant};

use crate::timer::{ActivePhase, Phase, PhaseConfig};

/// How long the completion banner stays visible.
pub const FANFARE_DURATION: Duration = Duration::from_secs(2);

/// `MM:SS`; minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// "Round: r/N" with a 1-based round number.
pub fn round_label(current_round: u32, total_rounds: u32) -> String {
    format!("Round: {}", compact_round(current_round, total_rounds))
}

/// "r/N" with a 1-based round number, used by the minimalist indicator.
pub fn compact_round(current_round: u32, total_rounds: u32) -> String {
    format!("{}/{}", current_round.saturating_add(1), total_rounds)
}

/// Fraction of the current phase already done, 0.0 ..= 1.0.
pub fn progress(phase: Phase, remaining_secs: u64, config: &PhaseConfig) -> f64 {
    let Some(active) = phase.active() else {
        return 0.0;
    };
    let total = config.duration_of(active);
    if total == 0 {
        // Only the lead-up may be zero-length.
        return 1.0;
    }
    (1.0 - remaining_secs as f64 / total as f64).clamp(0.0, 1.0)
}

/// Accent colour for a phase; paused variants share their active colour.
pub fn phase_color(phase: Phase) -> &'static str {
    match phase.active() {
        Some(ActivePhase::LeadUp) => "#E29A14",
        Some(ActivePhase::Work) => "#16A33E",
        Some(ActivePhase::Rest) => "#1273B5",
        None => "#5A5177",
    }
}

/// Completion banner shown for [`FANFARE_DURATION`] after a run finishes.
#[derive(Debug, Clone, Default)]
pub struct FanfareBanner {
    since: Option<Instant>,
}

impl FanfareBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self, now: Instant) {
        self.since = Some(now);
    }

    /// Banner text while visible; expires the banner once its time is up.
    pub fn message(&mut self, now: Instant, rounds: u32) -> Option<String> {
        let since = self.since?;
        if now.saturating_duration_since(since) < FANFARE_DURATION {
            Some(format!("Congratulations, you completed {rounds} rounds!"))
        } else {
            self.since = None;
            None
        }
    }

    pub fn is_visible(&self) -> bool {
        self.since.is_some()
    }
}
