//! Audio service: fire-and-forget cues plus a mute toggle.

use crate::core::event::Cue;
use std::io::{self, Write};

/// Plays named cues. Muting silences every cue until unmuted.
pub trait AudioService {
    fn play(&mut self, cue: Cue);
    fn toggle_mute(&mut self);
    fn is_muted(&self) -> bool;
}

/// Terminal audio: rings the bell for the loud cues and logs every cue.
#[derive(Debug, Default)]
pub struct TerminalAudio {
    muted: bool,
}

impl TerminalAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    /// Cues loud enough to deserve the terminal bell.
    fn rings_bell(cue: Cue) -> bool {
        matches!(cue, Cue::Whack | Cue::Bounce | Cue::Oink)
    }
}

impl AudioService for TerminalAudio {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            log::trace!("muted cue {}", cue.name());
            return;
        }
        log::debug!("cue {}", cue.name());
        if Self::rings_bell(cue) {
            let mut stdout = io::stdout();
            if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                log::warn!("could not ring bell: {}", e);
            }
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("audio {}", if self.muted { "muted" } else { "unmuted" });
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Records what would have been heard. Used by tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    muted: bool,
    /// Cues played while unmuted, in order.
    pub played: Vec<Cue>,
    /// Cues requested while muted.
    pub suppressed: Vec<Cue>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl AudioService for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            self.suppressed.push(cue);
        } else {
            self.played.push(cue);
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores() {
        for start in [false, true] {
            let mut audio = TerminalAudio::new(start);
            audio.toggle_mute();
            assert_eq!(audio.is_muted(), !start);
            audio.toggle_mute();
            assert_eq!(audio.is_muted(), start);
        }
    }

    #[test]
    fn test_recording_respects_mute() {
        let mut audio = RecordingAudio::new();
        audio.play(Cue::Coin);
        audio.toggle_mute();
        audio.play(Cue::Oink);
        audio.toggle_mute();
        audio.play(Cue::Coin);

        assert_eq!(audio.played, vec![Cue::Coin, Cue::Coin]);
        assert_eq!(audio.suppressed, vec![Cue::Oink]);
        assert_eq!(audio.count(Cue::Coin), 2);
    }

    #[test]
    fn test_bell_cues() {
        assert!(TerminalAudio::rings_bell(Cue::Whack));
        assert!(!TerminalAudio::rings_bell(Cue::Coin));
        assert!(!TerminalAudio::rings_bell(Cue::Falling));
    }
}
