//! Audio cue dispatch.
//!
//! The state machine only returns [`TimerEvent`](crate::TimerEvent)s; this module hands them to
//! an [`AudioPlayer`] after the tick has finished mutating state. Playback is
//! best-effort: a failing backend is logged and the timer keeps going.

use tracing::warn;

use crate::error::AudioError;
use crate::events::{SoundKind, TickOutcome};

/// Fire-and-forget sound output.
pub trait AudioPlayer {
    fn play(&self, kind: SoundKind) -> Result<(), AudioError>;
}

/// Player that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&self, _kind: SoundKind) -> Result<(), AudioError> {
        Ok(())
    }
}

/// What happened while dispatching one tick's sounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub played: usize,
    pub failed: usize,
}

/// Routes tick sound cues to the audio backend.
///
/// The fanfare is a presentation concern; hosts read it from
/// [`TickOutcome::fanfare`].
#[derive(Debug)]
pub struct CueDispatcher<P> {
    player: P,
    failures: usize,
}

impl<P: AudioPlayer> CueDispatcher<P> {
    pub fn new(player: P) -> Self {
        Self { player, failures: 0 }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Total playback failures since creation.
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn dispatch(&mut self, outcome: &TickOutcome) -> DispatchReport {
        let mut report = DispatchReport::default();
        for kind in outcome.sounds() {
            match self.player.play(kind) {
                Ok(()) => report.played += 1,
                Err(e) => {
                    warn!(error = %e, ?kind, "sound cue failed, continuing");
                    report.failed += 1;
                }
            }
        }
        self.failures += report.failed;
        report
    }
}
