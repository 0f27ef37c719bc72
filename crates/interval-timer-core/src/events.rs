use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Audio cues the host can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundKind {
    /// Never emitted by the state machine: the lead-up ends silently.
    LeadUpEnd,
    WorkEnd,
    RestEnd,
    AllComplete,
}

impl SoundKind {
    /// Conventional asset file name for this cue.
    pub fn file_name(self) -> &'static str {
        match self {
            SoundKind::LeadUpEnd => "lead_up_finish.mp3",
            SoundKind::WorkEnd => "work_finish.mp3",
            SoundKind::RestEnd => "rest_finish.mp3",
            SoundKind::AllComplete => "complete_finish.mp3",
        }
    }
}

/// Side effects produced by a phase transition.
///
/// The state machine only returns these; dispatching them to the audio and
/// UI collaborators happens after the mutation is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "sound", rename_all = "snake_case")]
pub enum TimerEvent {
    PlaySound(SoundKind),
    FanfareTriggered,
}

/// Result of one `tick`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub phase: Phase,
    /// Zero-based round index.
    pub current_round: u32,
    pub remaining_secs: u64,
    pub events: Vec<TimerEvent>,
}

impl TickOutcome {
    pub fn fanfare(&self) -> bool {
        self.events.contains(&TimerEvent::FanfareTriggered)
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundKind> + '_ {
        self.events.iter().filter_map(|e| match e {
            TimerEvent::PlaySound(kind) => Some(*kind),
            TimerEvent::FanfareTriggered => None,
        })
    }
}
