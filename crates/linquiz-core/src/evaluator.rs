//! Answer evaluation.
//!
//! Accepted grammar, after trimming surrounding whitespace:
//!
//! ```text
//! answer := sign? ( digits ( "." digits? )? | "." digits )
//! sign   := "+" | "-"
//! ```
//!
//! Anything else evaluates as incorrect. Exponents, `inf`, and `NaN` are
//! rejected even though `f64::from_str` would take them.

use serde::{Deserialize, Serialize};

/// Outcome of comparing a submitted answer with the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_correct: bool,
}

/// Decide whether `raw_input` equals `expected`.
pub fn evaluate(raw_input: &str, expected: f64) -> Evaluation {
    let is_correct = parse_answer(raw_input).is_some_and(|value| value == expected);
    Evaluation { is_correct }
}

/// Parse a decimal answer, returning `None` for malformed text.
pub fn parse_answer(raw_input: &str) -> Option<f64> {
    let text = raw_input.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let has_digits = !whole.is_empty() || fraction.is_some_and(|f| !f.is_empty());

    if !has_digits || !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return None;
    }

    text.parse::<f64>().ok()
}
