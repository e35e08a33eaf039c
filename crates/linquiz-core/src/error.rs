//! Session error types.
//!
//! Every variant is a rejected action: the controller reports it to the
//! caller and leaves the session exactly as it was.

use thiserror::Error;

use crate::model::Difficulty;
use crate::session::{Action, SessionState};

/// Errors returned by session actions and question sampling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The participant name was empty or whitespace-only.
    #[error("participant name must not be empty")]
    InvalidName,

    /// An answer was submitted with no text.
    #[error("answer must not be empty")]
    EmptyAnswer,

    /// Advance was requested while the verdict delay is still running.
    #[error("the next question is not available yet")]
    AdvanceTooEarly,

    /// The bank cannot supply the required number of questions for a tier.
    #[error("{tier} tier has {available} question(s), {required} required")]
    InsufficientQuestions {
        tier: Difficulty,
        available: usize,
        required: usize,
    },

    /// Sampling produced no questions, so the session could never finish.
    #[error("the session has no questions to ask")]
    NoQuestions,

    /// The action is not defined in the current state.
    #[error("cannot {action} while the session is {state}")]
    InvalidTransition {
        action: Action,
        state: SessionState,
    },
}

impl QuizError {
    /// Returns `true` for faults in the question bank rather than user input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            QuizError::InsufficientQuestions { .. } | QuizError::NoQuestions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Turn;

    #[test]
    fn messages_name_the_problem() {
        let err = QuizError::InsufficientQuestions {
            tier: Difficulty::Medium,
            available: 2,
            required: 4,
        };
        assert_eq!(err.to_string(), "medium tier has 2 question(s), 4 required");
        assert!(err.is_configuration());

        let err = QuizError::InvalidTransition {
            action: Action::Advance,
            state: SessionState::Active(Turn::AwaitingAnswer),
        };
        assert_eq!(
            err.to_string(),
            "cannot advance while the session is awaiting an answer"
        );
        assert!(!err.is_configuration());
    }
}
