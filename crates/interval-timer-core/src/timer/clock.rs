//! Phase-relative monotonic clock.
//!
//! Elapsed time is always derived from an absolute phase start instant, never
//! accumulated from tick deltas, so a late or missed tick cannot make the
//! reading drift. Pausing banks the elapsed duration; resuming rebuilds the
//! start instant as `now - banked`, which makes every later reading identical
//! to an uninterrupted run shifted by the paused interval.

use std::time::{Duration, Instant};

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ClockState {
    #[default]
    Stopped,
    Running {
        since: Instant,
    },
    Paused {
        banked: Duration,
    },
}

#[derive(Debug, Clone, Default)]
pub struct IntervalClock {
    state: ClockState,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Start instant of the running phase, `None` while paused or stopped.
    pub fn phase_start(&self) -> Option<Instant> {
        match self.state {
            ClockState::Running { since } => Some(since),
            _ => None,
        }
    }

    /// Elapsed time banked by the last `pause`, zero unless paused.
    pub fn paused_elapsed(&self) -> Duration {
        match self.state {
            ClockState::Paused { banked } => banked,
            _ => Duration::ZERO,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    /// Whole seconds since the phase started, floored.
    pub fn elapsed(&self, now: Instant) -> Result<u64, TimerError> {
        match self.state {
            ClockState::Running { since } => Ok(now.saturating_duration_since(since).as_secs()),
            _ => Err(TimerError::InvalidClockState(
                "elapsed sampled while the clock is not running",
            )),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start timing a new phase at `now`, discarding any banked pause.
    pub fn begin(&mut self, now: Instant) {
        self.state = ClockState::Running { since: now };
    }

    /// Return to the stopped state used while the machine is idle.
    pub fn clear(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Bank the elapsed time and stop the phase clock.
    ///
    /// Fails without touching state if the clock is already paused or stopped.
    pub fn pause(&mut self, now: Instant) -> Result<(), TimerError> {
        match self.state {
            ClockState::Running { since } => {
                self.state = ClockState::Paused {
                    banked: now.saturating_duration_since(since),
                };
                Ok(())
            }
            _ => Err(TimerError::InvalidClockState(
                "pause requested while the clock is not running",
            )),
        }
    }

    /// Restart the phase clock so that `elapsed` continues from the banked value.
    pub fn resume(&mut self, now: Instant) -> Result<(), TimerError> {
        match self.state {
            ClockState::Paused { banked } => {
                let since = now.checked_sub(banked).ok_or(TimerError::InvalidClockState(
                    "resume instant precedes the representable clock range",
                ))?;
                self.state = ClockState::Running { since };
                Ok(())
            }
            _ => Err(TimerError::InvalidClockState(
                "resume requested while the clock is not paused",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn elapsed_floors_to_whole_seconds() {
        let base = Instant::now();
        let mut clock = IntervalClock::new();
        clock.begin(base);
        assert_eq!(clock.elapsed(at(base, 999)).unwrap(), 0);
        assert_eq!(clock.elapsed(at(base, 1_000)).unwrap(), 1);
        assert_eq!(clock.elapsed(at(base, 59_999)).unwrap(), 59);
    }

    #[test]
    fn pause_resume_preserves_elapsed_across_gap() {
        let base = Instant::now();
        let mut clock = IntervalClock::new();
        clock.begin(base);
        clock.pause(at(base, 30_400)).unwrap();
        assert_eq!(clock.paused_elapsed(), Duration::from_millis(30_400));
        assert_eq!(clock.phase_start(), None);

        // 500 s later
        clock.resume(at(base, 530_400)).unwrap();
        assert_eq!(clock.paused_elapsed(), Duration::ZERO);
        assert_eq!(clock.elapsed(at(base, 530_400)).unwrap(), 30);
        // the banked 0.4 s is not lost: 0.6 s later one more second has passed
        assert_eq!(clock.elapsed(at(base, 531_000)).unwrap(), 31);
    }

    #[test]
    fn elapsed_while_paused_is_an_error() {
        let base = Instant::now();
        let mut clock = IntervalClock::new();
        clock.begin(base);
        clock.pause(at(base, 10)).unwrap();
        assert!(matches!(
            clock.elapsed(at(base, 20)),
            Err(TimerError::InvalidClockState(_))
        ));
    }

    #[test]
    fn double_pause_leaves_banked_time_untouched() {
        let base = Instant::now();
        let mut clock = IntervalClock::new();
        clock.begin(base);
        clock.pause(at(base, 5_000)).unwrap();
        assert!(clock.pause(at(base, 9_000)).is_err());
        assert_eq!(clock.paused_elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn stopped_clock_rejects_pause_and_resume() {
        let base = Instant::now();
        let mut clock = IntervalClock::new();
        assert!(clock.pause(base).is_err());
        assert!(clock.resume(base).is_err());
        assert!(!clock.is_running());
    }

    #[test]
    fn begin_discards_banked_time() {
        let base = Instant::now();
        let mut clock = IntervalClock::new();
        clock.begin(base);
        clock.pause(at(base, 3_000)).unwrap();
        clock.begin(at(base, 4_000));
        assert_eq!(clock.paused_elapsed(), Duration::ZERO);
        assert_eq!(clock.elapsed(at(base, 4_000)).unwrap(), 0);
    }
}
