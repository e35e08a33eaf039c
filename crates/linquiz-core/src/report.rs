//! Final result of a finished session, with JSON and markdown rendering.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Difficulty;
use crate::session::{AnswerRecord, Session};

/// Read-only result of one playthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session identifier.
    pub id: Uuid,
    /// Participant name as entered (trimmed).
    pub participant: String,
    /// Correct answers.
    pub score: u32,
    /// Questions in the session.
    pub total: usize,
    /// Seconds counted while the session was active.
    pub elapsed_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Every answered turn in order.
    pub answers: Vec<AnswerRecord>,
}

/// Correct count for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierScore {
    pub difficulty: Difficulty,
    pub correct: u32,
    pub asked: u32,
}

impl SessionReport {
    /// Build a report from a finished session; `None` while still running.
    pub fn from_session(session: &Session) -> Option<Self> {
        let finished_at = session.finished_at?;
        Some(Self {
            id: session.id,
            participant: session.participant_name.clone(),
            score: session.score,
            total: session.total(),
            elapsed_seconds: session.elapsed_seconds,
            started_at: session.started_at,
            finished_at,
            answers: session.answers.clone(),
        })
    }

    /// Fraction of questions answered correctly.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    /// Per-tier breakdown in canonical order, skipping tiers never asked.
    pub fn by_tier(&self) -> Vec<TierScore> {
        Difficulty::ALL
            .iter()
            .filter_map(|&difficulty| {
                let asked: Vec<&AnswerRecord> = self
                    .answers
                    .iter()
                    .filter(|a| a.question.difficulty == difficulty)
                    .collect();
                if asked.is_empty() {
                    return None;
                }
                Some(TierScore {
                    difficulty,
                    correct: asked.iter().filter(|a| a.is_correct).count() as u32,
                    asked: asked.len() as u32,
                })
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize session report")
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Quiz Result\n\n");
        md.push_str(&format!("- **Name:** {}\n", self.participant));
        md.push_str(&format!("- **Score:** {} of {}\n", self.score, self.total));
        md.push_str(&format!(
            "- **Total time:** {} seconds\n\n",
            self.elapsed_seconds
        ));

        md.push_str("| # | Difficulty | Equation | Answer | Result |\n");
        md.push_str("|---|------------|----------|--------|--------|\n");
        for (i, a) in self.answers.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | `{}` | {} | {} |\n",
                i + 1,
                a.question.difficulty,
                a.question.text,
                a.given.trim(),
                if a.is_correct {
                    "correct".to_string()
                } else {
                    format!("expected {}", a.question.expected_answer)
                }
            ));
        }
        md
    }
}
