//! Test doubles for the cue collaborator.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::traits::CuePlayer;

/// Records every cue it is asked to play.
pub struct RecordingCues {
    played: Mutex<Vec<bool>>,
}

impl RecordingCues {
    pub fn new() -> Self {
        Self {
            played: Mutex::new(Vec::new()),
        }
    }

    /// Verdicts in the order their cues were requested.
    pub fn played(&self) -> Vec<bool> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.played.lock().map(|p| p.len()).unwrap_or(0)
    }
}

impl Default for RecordingCues {
    fn default() -> Self {
        Self::new()
    }
}

impl CuePlayer for RecordingCues {
    fn name(&self) -> &str {
        "recording"
    }

    fn play_cue(&self, is_correct: bool) -> anyhow::Result<()> {
        self.played
            .lock()
            .map_err(|_| anyhow::anyhow!("cue log poisoned"))?
            .push(is_correct);
        Ok(())
    }
}

/// Fails every call, counting attempts.
pub struct FailingCues {
    attempts: AtomicU32,
}

impl FailingCues {
    pub fn new() -> Self {
        Self {
            attempts: AtomicU32::new(0),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl Default for FailingCues {
    fn default() -> Self {
        Self::new()
    }
}

impl CuePlayer for FailingCues {
    fn name(&self) -> &str {
        "failing"
    }

    fn play_cue(&self, _: bool) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        anyhow::bail!("audio device unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order() {
        let cues = RecordingCues::new();
        cues.play_cue(true).unwrap();
        cues.play_cue(false).unwrap();
        assert_eq!(cues.played(), vec![true, false]);
        assert_eq!(cues.count(), 2);
    }

    #[test]
    fn failing_counts_attempts() {
        let cues = FailingCues::new();
        assert!(cues.play_cue(true).is_err());
        assert!(cues.play_cue(false).is_err());
        assert_eq!(cues.attempts(), 2);
    }
}
