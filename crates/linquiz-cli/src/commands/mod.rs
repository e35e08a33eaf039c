pub mod init;
pub mod play;
pub mod questions;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use linquiz_core::config::LinquizConfig;
use linquiz_core::parser::{parse_bank, validate_bank};
use linquiz_core::QuestionBank;

/// Resolve the bank to use: the `--bank` flag, then the config, then the built-in bank.
pub fn load_bank(flag: Option<PathBuf>, config: &LinquizConfig) -> Result<QuestionBank> {
    let Some(path) = flag.or_else(|| config.bank.clone()) else {
        return Ok(QuestionBank::builtin());
    };

    let bank = parse_bank(&path)?;
    for w in validate_bank(&bank) {
        tracing::warn!("{}: {}", path.display(), w.message);
    }
    Ok(bank)
}
