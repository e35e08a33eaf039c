//! Verdict-to-advance delay.
//!
//! After a submission the sequencer is armed for that turn. A one-shot task
//! sends [`SessionEvent::FeedbackElapsed`] once the delay passes; the
//! controller then calls [`FeedbackSequencer::complete`] and advance unlocks.

use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::controller::{EventSender, SessionEvent};

#[derive(Debug)]
enum Phase {
    Idle,
    Pending { turn: usize, handle: JoinHandle<()> },
    Elapsed { turn: usize },
}

/// One-shot deferred unlock of the advance action.
#[derive(Debug)]
pub struct FeedbackSequencer {
    phase: Phase,
}

impl FeedbackSequencer {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    /// Schedule the unlock for `turn`, replacing anything outstanding.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn arm(&mut self, session: Uuid, turn: usize, delay: Duration, events: EventSender) {
        self.cancel();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::FeedbackElapsed { session, turn });
        });
        self.phase = Phase::Pending { turn, handle };
    }

    /// Mark the delay for `turn` as elapsed.
    ///
    /// Returns `false` when nothing is pending for that turn, which is how
    /// late deliveries from a cancelled turn are ignored.
    pub fn complete(&mut self, turn: usize) -> bool {
        let due = matches!(self.phase, Phase::Pending { turn: pending, .. } if pending == turn);
        if due {
            self.phase = Phase::Elapsed { turn };
        }
        due
    }

    pub fn is_elapsed(&self, turn: usize) -> bool {
        matches!(self.phase, Phase::Elapsed { turn: t } if t == turn)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending { .. })
    }

    /// Drop any pending or elapsed state and abort the task.
    pub fn cancel(&mut self) {
        if let Phase::Pending { handle, .. } = std::mem::replace(&mut self.phase, Phase::Idle) {
            handle.abort();
        }
    }
}

impl Default for FeedbackSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FeedbackSequencer {
    fn drop(&mut self) {
        self.cancel();
    }
}
