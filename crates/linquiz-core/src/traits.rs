//! Collaborator traits the core calls out to.

// ---------------------------------------------------------------------------
// Audio cues
// ---------------------------------------------------------------------------

/// Plays the correct/incorrect cue after each answered question.
///
/// Called exactly once per submission, fire-and-forget. An `Err` is logged
/// by the controller and otherwise ignored; it never changes session state.
pub trait CuePlayer: Send + Sync {
    /// Human-readable player name (e.g. "bell").
    fn name(&self) -> &str;

    /// Play the cue for a verdict.
    fn play_cue(&self, is_correct: bool) -> anyhow::Result<()>;
}

/// Cue player that does nothing.
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn name(&self) -> &str {
        "silent"
    }

    fn play_cue(&self, _: bool) -> anyhow::Result<()> {
        Ok(())
    }
}
