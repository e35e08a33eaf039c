//! Terminal bell cue player.

use std::io::Write;

use linquiz_core::traits::CuePlayer;

/// Rings the terminal bell: once for a correct answer, twice for a wrong one.
pub struct TerminalBell;

impl CuePlayer for TerminalBell {
    fn name(&self) -> &str {
        "bell"
    }

    fn play_cue(&self, is_correct: bool) -> anyhow::Result<()> {
        let bells = if is_correct { "\x07" } else { "\x07\x07" };
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(bells.as_bytes())?;
        stderr.flush()?;
        Ok(())
    }
}
