//! Terminal bell audio backend.

use std::io::Write;

use interval_timer_core::{AudioError, AudioPlayer, SoundKind};
use tracing::info;

/// Rings the terminal bell once per cue, twice for the final one.
#[derive(Debug, Clone, Copy)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioPlayer for TerminalBell {
    fn play(&self, kind: SoundKind) -> Result<(), AudioError> {
        info!(cue = ?kind, file = kind.file_name(), "sound cue");
        if !self.enabled {
            return Ok(());
        }
        let rings: &[u8] = match kind {
            SoundKind::AllComplete => b"\x07\x07",
            _ => b"\x07",
        };
        let mut err = std::io::stderr();
        err.write_all(rings)
            .and_then(|()| err.flush())
            .map_err(|e| AudioError::PlaybackFailed {
                kind,
                message: e.to_string(),
            })
    }
}
