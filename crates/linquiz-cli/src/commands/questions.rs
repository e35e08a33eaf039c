//! The `linquiz questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use linquiz_core::config::load_config_from;
use linquiz_core::Difficulty;

pub fn execute(
    bank_path: Option<PathBuf>,
    difficulty: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let tier = difficulty
        .map(|d| d.parse::<Difficulty>().map_err(anyhow::Error::msg))
        .transpose()?;

    let config = load_config_from(config_path.as_deref())?;
    let bank = super::load_bank(bank_path, &config)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Difficulty", "Equation", "x"]);

    let mut shown = 0;
    for q in bank.questions() {
        if tier.is_some_and(|t| t != q.difficulty) {
            continue;
        }
        shown += 1;
        table.add_row(vec![
            Cell::new(shown),
            Cell::new(q.difficulty),
            Cell::new(&q.text),
            Cell::new(q.expected_answer),
        ]);
    }

    println!("{}: {shown} question(s)", bank.name);
    if shown > 0 {
        println!("{table}");
    }

    Ok(())
}
