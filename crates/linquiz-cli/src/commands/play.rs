//! The `linquiz play` command.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use linquiz_core::config::load_config_from;
use linquiz_core::controller::EventReceiver;
use linquiz_core::report::SessionReport;
use linquiz_core::traits::{CuePlayer, SilentCues};
use linquiz_core::{QuizError, SessionConfig, SessionController, SessionState, Turn};

use crate::cues::TerminalBell;

type Input = Lines<BufReader<Stdin>>;

pub async fn execute(
    name: Option<String>,
    bank_path: Option<PathBuf>,
    seed: Option<u64>,
    no_sound: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "md"),
        "unknown format: {format} (expected text, json, or markdown)"
    );

    let config = load_config_from(config_path.as_deref())?;
    let bank = super::load_bank(bank_path, &config)?;

    let cues: Arc<dyn CuePlayer> = if no_sound || !config.cues {
        Arc::new(SilentCues)
    } else {
        Arc::new(TerminalBell)
    };

    let (mut controller, mut events) = match seed.or(config.seed) {
        Some(seed) => SessionController::seeded(bank, SessionConfig::default(), cues, seed),
        None => SessionController::new(bank, SessionConfig::default(), cues),
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    match name {
        Some(name) => controller.start(&name)?,
        None => {
            if !prompt_for_name(&mut controller, &mut input).await? {
                println!("\nSession ended before it started.");
                return Ok(());
            }
        }
    }

    if !run_session(&mut controller, &mut events, &mut input).await? {
        println!("\nInput closed; session ended early.");
        return Ok(());
    }

    match controller.report() {
        Some(report) => print_report(&report, &format),
        None => anyhow::bail!("session did not finish"),
    }
}

/// Ask until a usable name is entered. Returns `false` on end of input.
async fn prompt_for_name(controller: &mut SessionController, input: &mut Input) -> Result<bool> {
    loop {
        prompt("Your name: ")?;
        let Some(line) = input.next_line().await? else {
            return Ok(false);
        };
        match controller.start(&line) {
            Ok(()) => return Ok(true),
            Err(QuizError::InvalidName) => println!("Please enter your name."),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Drive the session to the finished state. Returns `false` on end of input.
async fn run_session(
    controller: &mut SessionController,
    events: &mut EventReceiver,
    input: &mut Input,
) -> Result<bool> {
    show_question(controller)?;

    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let was_locked = !controller.can_advance();
                if controller.handle_event(event) && was_locked && controller.can_advance() {
                    println!("Press Enter for the next question.");
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(false);
                };
                // Ticks queued while the line was read land before it.
                controller.drain(events);
                match controller.state() {
                    SessionState::Active(Turn::AwaitingAnswer) => submit_line(controller, &line)?,
                    SessionState::Active(Turn::AwaitingAdvance) => match controller.advance() {
                        Ok(SessionState::Finished) => return Ok(true),
                        Ok(_) => show_question(controller)?,
                        Err(QuizError::AdvanceTooEarly) => {
                            println!("Take a moment with the feedback...");
                        }
                        Err(e) => return Err(e.into()),
                    },
                    SessionState::Finished => return Ok(true),
                    SessionState::NotStarted => anyhow::bail!("session was not started"),
                }
            }
        }
    }
}

fn submit_line(controller: &mut SessionController, line: &str) -> Result<()> {
    controller.update_input(line)?;
    match controller.submit(line) {
        Ok(verdict) => {
            let elapsed = controller.session().map_or(0, |s| s.elapsed_seconds);
            println!("{}  [{elapsed}s]", verdict.message);
            Ok(())
        }
        Err(QuizError::EmptyAnswer) => {
            println!("Please type an answer.");
            prompt("x = ")
        }
        Err(e) => Err(e.into()),
    }
}

fn show_question(controller: &SessionController) -> Result<()> {
    let Some(session) = controller.session() else {
        return Ok(());
    };
    let Some(question) = session.current_question() else {
        return Ok(());
    };
    println!(
        "\nQuestion {} of {} ({})   score {}   time {}s",
        session.current_index + 1,
        session.total(),
        question.difficulty,
        session.score,
        session.elapsed_seconds
    );
    println!("  {}", question.text);
    prompt("x = ")
}

fn prompt(text: &str) -> Result<()> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_report(report: &SessionReport, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", report.to_json()?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => {
            println!("\nName: {}", report.participant);
            println!("Score: {} of {}", report.score, report.total);
            println!("Total time: {} seconds", report.elapsed_seconds);
            print_turns(report);
        }
    }
    Ok(())
}

fn print_turns(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Difficulty", "Equation", "Answer", "Result"]);

    for (i, a) in report.answers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(a.question.difficulty),
            Cell::new(&a.question.text),
            Cell::new(a.given.trim()),
            Cell::new(if a.is_correct {
                "correct".to_string()
            } else {
                format!("expected {}", a.question.expected_answer)
            }),
        ]);
    }

    println!("\n{table}");

    let tiers: Vec<String> = report
        .by_tier()
        .iter()
        .map(|t| format!("{} {}/{}", t.difficulty, t.correct, t.asked))
        .collect();
    println!("By tier: {}", tiers.join("   "));
}
