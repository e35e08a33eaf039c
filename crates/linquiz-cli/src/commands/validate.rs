//! The `linquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use linquiz_core::Difficulty;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let bank = linquiz_core::parser::parse_bank(&bank_path)?;

    println!("Bank: {} ({} questions)", bank.name, bank.len());
    for tier in Difficulty::ALL {
        println!("  {tier}: {}", bank.count(tier));
    }

    let warnings = linquiz_core::parser::validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question
            .as_ref()
            .map(|text| format!("  [{text}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
