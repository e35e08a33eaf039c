//! Player configuration.
//!
//! Only presentation choices live here. Session timing and the per-tier
//! question count are fixed constants in [`crate::controller`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level linquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinquizConfig {
    /// Question bank file; the built-in bank is used when unset.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Play correct/incorrect cues.
    #[serde(default = "default_cues")]
    pub cues: bool,
    /// Fixed sampling seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_cues() -> bool {
    true
}

impl Default for LinquizConfig {
    fn default() -> Self {
        Self {
            bank: None,
            cues: default_cues(),
            seed: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `linquiz.toml` in the current directory
/// 2. `~/.config/linquiz/config.toml`
///
/// Environment variable overrides: `LINQUIZ_BANK`, `LINQUIZ_SEED`.
pub fn load_config() -> Result<LinquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LinquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("linquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<LinquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            config
        }
        None => LinquizConfig::default(),
    };

    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply `LINQUIZ_*` overrides and expand `${VAR}` in the bank path.
fn apply_overrides(
    mut config: LinquizConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<LinquizConfig> {
    if let Some(bank) = var("LINQUIZ_BANK") {
        config.bank = Some(PathBuf::from(bank));
    }

    if let Some(seed) = var("LINQUIZ_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("LINQUIZ_SEED must be an unsigned integer, got {seed:?}"))?;
        config.seed = Some(seed);
    }

    config.bank = config
        .bank
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("linquiz"))
}
