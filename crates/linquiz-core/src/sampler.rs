//! Stratified question sampling.
//!
//! Each tier is shuffled independently and truncated, then tiers are
//! concatenated in canonical order, so a session always runs all easy
//! questions first, then medium, then hard.

use rand::Rng;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{Difficulty, Question};

/// Build the ordered question list for a new session.
///
/// Takes `per_tier` questions from every tier in [`Difficulty::ALL`] order.
///
/// # Errors
///
/// Returns [`QuizError::InsufficientQuestions`] for the first tier holding
/// fewer than `per_tier` questions.
pub fn sample<R: Rng + ?Sized>(
    bank: &QuestionBank,
    per_tier: usize,
    rng: &mut R,
) -> Result<Vec<Question>, QuizError> {
    let mut picked = Vec::with_capacity(per_tier * Difficulty::ALL.len());

    for tier in Difficulty::ALL {
        let mut pool: Vec<Question> = bank.by_difficulty(tier).cloned().collect();
        if pool.len() < per_tier {
            return Err(QuizError::InsufficientQuestions {
                tier,
                available: pool.len(),
                required: per_tier,
            });
        }
        shuffle(&mut pool, rng);
        pool.truncate(per_tier);
        picked.extend(pool);
    }

    tracing::debug!(count = picked.len(), per_tier, "sampled session questions");
    Ok(picked)
}

/// Unbiased in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
