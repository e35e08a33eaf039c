//! The `linquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    if Path::new("linquiz.toml").exists() {
        println!("linquiz.toml already exists, skipping.");
    } else {
        std::fs::write("linquiz.toml", SAMPLE_CONFIG).context("failed to write linquiz.toml")?;
        println!("Created linquiz.toml");
    }

    std::fs::create_dir_all("banks").context("failed to create banks/")?;
    let example_path = Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)
            .context("failed to write banks/example.toml")?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own equations to banks/example.toml");
    println!("  2. Run: linquiz validate --bank banks/example.toml");
    println!("  3. Run: linquiz play --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# linquiz configuration

# Question bank to play; the built-in bank is used when unset.
# bank = "banks/example.toml"

# Ring the terminal bell after each answer.
cues = true

# Fix the question selection (useful for classrooms).
# seed = 42
"#;

const EXAMPLE_BANK: &str = r#"[bank]
name = "Example bank"
description = "Four equations per tier, enough for one session"

[[questions]]
text = "x + 4 = 9"
answer = 5
difficulty = "easy"

[[questions]]
text = "2x = 14"
answer = 7
difficulty = "easy"

[[questions]]
text = "x - 3 = 8"
answer = 11
difficulty = "easy"

[[questions]]
text = "5x = 20"
answer = 4
difficulty = "easy"

[[questions]]
text = "3x + 1 = x + 9"
answer = 4
difficulty = "medium"

[[questions]]
text = "7x - 2 = 5x + 6"
answer = 4
difficulty = "medium"

[[questions]]
text = "4x + 3 = 2x + 4"
answer = 0.5
difficulty = "medium"

[[questions]]
text = "9x - 5 = 6x + 7"
answer = 4
difficulty = "medium"

[[questions]]
text = "2(x + 3) = x + 10"
answer = 4
difficulty = "hard"

[[questions]]
text = "3(x - 2) = 2(x + 1)"
answer = 8
difficulty = "hard"

[[questions]]
text = "4(x + 1) = 2(x + 7)"
answer = 5
difficulty = "hard"

[[questions]]
text = "5(x - 1) = 3(x + 3)"
answer = 7
difficulty = "hard"
"#;
