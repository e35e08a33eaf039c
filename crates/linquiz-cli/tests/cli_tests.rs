//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn linquiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("linquiz").unwrap();
    cmd.env_remove("LINQUIZ_BANK").env_remove("LINQUIZ_SEED");
    cmd
}

const SHORT_BANK: &str = r#"
[bank]
name = "Short"

[[questions]]
text = "x + 1 = 2"
answer = 1
difficulty = "easy"

[[questions]]
text = "x + 1 = 2"
answer = 1
difficulty = "easy"
"#;

#[test]
fn help_lists_commands() {
    linquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("questions"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    linquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linquiz"));
}

#[test]
fn init_creates_then_skips() {
    let dir = TempDir::new().unwrap();

    linquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created linquiz.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"));

    assert!(dir.path().join("linquiz.toml").exists());
    assert!(dir.path().join("banks/example.toml").exists());

    linquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn validate_initialised_bank() {
    let dir = TempDir::new().unwrap();
    linquiz().current_dir(dir.path()).arg("init").assert().success();

    linquiz()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example bank (12 questions)"))
        .stdout(predicate::str::contains("Bank valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.toml");
    std::fs::write(&path, SHORT_BANK).unwrap();

    linquiz()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate question"))
        .stdout(predicate::str::contains("hard tier has 0 question(s)"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    linquiz()
        .arg("validate")
        .arg("--bank")
        .arg("does-not-exist.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn questions_lists_builtin_bank() {
    let dir = TempDir::new().unwrap();
    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("12 question(s)"))
        .stdout(predicate::str::contains("2x + 3 = 7"));
}

#[test]
fn questions_filters_by_difficulty() {
    let dir = TempDir::new().unwrap();
    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["questions", "--difficulty", "hard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 question(s)"))
        .stdout(predicate::str::contains("5(x - 2) = 3(x + 4)"))
        .stdout(predicate::str::contains("2x + 3 = 7").not());
}

#[test]
fn questions_rejects_unknown_difficulty() {
    linquiz()
        .args(["questions", "--difficulty", "brutal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn play_rejects_blank_name() {
    let dir = TempDir::new().unwrap();
    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["play", "--no-sound", "--name", "   "])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("participant name must not be empty"));
}

#[test]
fn play_rejects_short_bank() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.toml");
    std::fs::write(&path, SHORT_BANK).unwrap();

    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["play", "--no-sound", "--name", "Ana", "--bank"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("easy tier has 2 question(s), 4 required"));
}

#[test]
fn play_rejects_unknown_format() {
    linquiz()
        .args(["play", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn play_ends_cleanly_on_closed_input() {
    let dir = TempDir::new().unwrap();
    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["play", "--no-sound", "--name", "Ana", "--seed", "7"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 12 (easy)"))
        .stdout(predicate::str::contains("session ended early"));
}

#[test]
fn play_prompts_for_name_until_input_closes() {
    let dir = TempDir::new().unwrap();
    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["play", "--no-sound"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter your name."))
        .stdout(predicate::str::contains("Session ended before it started."));
}

#[test]
fn play_scores_a_submitted_answer() {
    let dir = TempDir::new().unwrap();
    linquiz()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["play", "--no-sound", "--name", "Ana", "--seed", "7"])
        .write_stdin("not a number\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect. The correct answer is"));
}
