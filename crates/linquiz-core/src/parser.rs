//! TOML question bank parser.
//!
//! Loads question banks from TOML files and validates them.
//!
//! ```toml
//! [bank]
//! name = "First-degree equations"
//!
//! [[questions]]
//! text = "2x + 3 = 7"
//! answer = 2
//! difficulty = "easy"
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::bank::QuestionBank;
use crate::controller::QUESTIONS_PER_TIER;
use crate::model::{Difficulty, Question};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    answer: f64,
    difficulty: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let difficulty: Difficulty = q.difficulty.parse().map_err(|e: String| {
                anyhow::anyhow!("question {} ({}): {}", i + 1, q.text, e)
            })?;
            Ok(Question::new(q.text, q.answer, difficulty))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        bank = %parsed.bank.name,
        questions = questions.len(),
        "loaded {}",
        source_path.display()
    );

    Ok(QuestionBank::new(parsed.bank.name, questions).with_description(parsed.bank.description))
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question text (if applicable).
    pub question: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for issues that would break or skew a session.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashSet::new();
    for q in bank.questions() {
        if !seen.insert(q.text.trim()) {
            warnings.push(ValidationWarning {
                question: Some(q.text.clone()),
                message: format!("duplicate question: {}", q.text),
            });
        }
    }

    for q in bank.questions() {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(q.text.clone()),
                message: "question text is empty".into(),
            });
        }
        if !q.expected_answer.is_finite() {
            warnings.push(ValidationWarning {
                question: Some(q.text.clone()),
                message: format!("answer {} is not a finite number", q.expected_answer),
            });
        }
    }

    for tier in Difficulty::ALL {
        let count = bank.count(tier);
        if count < QUESTIONS_PER_TIER {
            warnings.push(ValidationWarning {
                question: None,
                message: format!(
                    "{tier} tier has {count} question(s); a session needs {QUESTIONS_PER_TIER}"
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
name = "Warm-up"
description = "A tiny bank"

[[questions]]
text = "x + 1 = 2"
answer = 1
difficulty = "easy"

[[questions]]
text = "2x = 5"
answer = 2.5
difficulty = "Medium"

[[questions]]
text = "3(x - 1) = 2x"
answer = 3
difficulty = "h"
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("warmup.toml")).unwrap();
        assert_eq!(bank.name, "Warm-up");
        assert_eq!(bank.description, "A tiny bank");
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.questions()[0].expected_answer, 1.0);
        assert_eq!(bank.questions()[1].expected_answer, 2.5);
        assert_eq!(bank.questions()[1].difficulty, Difficulty::Medium);
        assert_eq!(bank.questions()[2].difficulty, Difficulty::Hard);
    }

    #[test]
    fn parse_unknown_difficulty() {
        let toml = r#"
[bank]
name = "Bad"

[[questions]]
text = "x = 1"
answer = 1
difficulty = "brutal"
"#;
        let err = parse_bank_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown difficulty"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_missing_file() {
        assert!(parse_bank(&PathBuf::from("definitely/not/here.toml")).is_err());
    }

    #[test]
    fn builtin_bank_validates_clean() {
        assert!(validate_bank(&QuestionBank::builtin()).is_empty());
    }

    #[test]
    fn validate_reports_short_tiers_and_duplicates() {
        let toml = r#"
[bank]
name = "Dupes"

[[questions]]
text = "x = 1"
answer = 1
difficulty = "easy"

[[questions]]
text = "x = 1"
answer = 1
difficulty = "easy"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("dupes.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings
            .iter()
            .any(|w| w.message.starts_with("hard tier has 0")));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warmup.toml");
        std::fs::write(&path, VALID_TOML).unwrap();

        let bank = parse_bank(&path).unwrap();
        assert_eq!(bank.count(Difficulty::Easy), 1);
    }
}
