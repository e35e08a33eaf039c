//! Session data owned by the controller.
//!
//! Nothing outside [`crate::controller`] mutates a [`Session`]; readers get
//! a shared reference or a cloned [`SessionSnapshot`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Question;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Active(Turn),
    Finished,
}

/// Sub-state of an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    /// The current question is shown and accepts an answer.
    AwaitingAnswer,
    /// The verdict is shown; advance unlocks after the feedback delay.
    AwaitingAdvance,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::Active(Turn::AwaitingAnswer) => write!(f, "awaiting an answer"),
            SessionState::Active(Turn::AwaitingAdvance) => write!(f, "showing feedback"),
            SessionState::Finished => write!(f, "finished"),
        }
    }
}

/// Actions the presentation layer may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    UpdateInput,
    Submit,
    Advance,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::UpdateInput => write!(f, "edit the answer"),
            Action::Submit => write!(f, "submit"),
            Action::Advance => write!(f, "advance"),
        }
    }
}

/// Correctness result shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,
    pub message: String,
}

impl Verdict {
    pub fn for_answer(is_correct: bool, expected: f64) -> Self {
        let message = if is_correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. The correct answer is {expected}.")
        };
        Self {
            is_correct,
            message,
        }
    }
}

/// One answered turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: Question,
    /// Raw text as submitted.
    pub given: String,
    pub is_correct: bool,
}

/// One playthrough, from name entry to final result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Fresh per `start`; scheduled events carry it so stale ones are dropped.
    pub id: Uuid,
    /// Trimmed, never empty.
    pub participant_name: String,
    /// Fixed at start, grouped by tier.
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub score: u32,
    pub elapsed_seconds: u64,
    /// Text of the in-progress answer for the current question.
    pub pending_input: String,
    pub last_verdict: Option<Verdict>,
    pub answers: Vec<AnswerRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn new(
        id: Uuid,
        participant_name: String,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            participant_name,
            questions,
            current_index: 0,
            score: 0,
            elapsed_seconds: 0,
            pending_input: String::new(),
            last_verdict: None,
            answers: Vec::new(),
            started_at,
            finished_at: None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// True once the feedback delay for the current turn has elapsed.
    pub can_advance: bool,
    pub session: Option<Session>,
}

impl SessionSnapshot {
    pub(crate) fn not_started() -> Self {
        Self {
            state: SessionState::NotStarted,
            can_advance: false,
            session: None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref().and_then(Session::current_question)
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.elapsed_seconds)
    }

    /// Submit is only meaningful with some text typed.
    pub fn can_submit(&self) -> bool {
        self.state == SessionState::Active(Turn::AwaitingAnswer)
            && self
                .session
                .as_ref()
                .is_some_and(|s| !s.pending_input.trim().is_empty())
    }
}
