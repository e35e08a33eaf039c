//! Session controller.
//!
//! The controller is the single writer of session state. User actions
//! (`start`, `update_input`, `submit`, `advance`) are synchronous method
//! calls. Scheduled work (the elapsed ticker and the feedback delay) runs in
//! Tokio tasks that only send [`SessionEvent`]s; whoever owns the controller
//! feeds them back through [`SessionController::handle_event`], so actions
//! and timer events are applied one at a time in arrival order.
//!
//! ```no_run
//! # async fn demo() -> Result<(), linquiz_core::QuizError> {
//! use std::sync::Arc;
//! use linquiz_core::{QuestionBank, SessionConfig, SessionController};
//! use linquiz_core::traits::SilentCues;
//!
//! let (mut controller, mut events) =
//!     SessionController::new(QuestionBank::builtin(), SessionConfig::default(), Arc::new(SilentCues));
//! controller.start("Ana")?;
//! controller.submit("2")?;
//! while let Some(event) = events.recv().await {
//!     controller.handle_event(event);
//!     if controller.can_advance() {
//!         break;
//!     }
//! }
//! controller.advance()?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::evaluator::evaluate;
use crate::feedback::FeedbackSequencer;
use crate::report::SessionReport;
use crate::sampler::sample;
use crate::session::{
    Action, AnswerRecord, Session, SessionSnapshot, SessionState, Turn, Verdict,
};
use crate::timer::ElapsedTimer;
use crate::traits::CuePlayer;

/// Questions drawn from each difficulty tier.
pub const QUESTIONS_PER_TIER: usize = 4;

/// Time between a verdict and the advance action unlocking.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(3);

/// Elapsed-time resolution.
pub const TIMER_TICK: Duration = Duration::from_secs(1);

/// Fixed session parameters.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub questions_per_tier: usize,
    pub feedback_delay: Duration,
    pub tick: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            questions_per_tier: QUESTIONS_PER_TIER,
            feedback_delay: FEEDBACK_DELAY,
            tick: TIMER_TICK,
        }
    }
}

/// Internal scheduled event, tagged with the session that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One tick of elapsed time.
    Tick { session: Uuid },
    /// The feedback delay for `turn` has passed.
    FeedbackElapsed { session: Uuid, turn: usize },
}

impl SessionEvent {
    pub fn session(&self) -> Uuid {
        match self {
            SessionEvent::Tick { session } | SessionEvent::FeedbackElapsed { session, .. } => {
                *session
            }
        }
    }
}

pub type EventSender = mpsc::UnboundedSender<SessionEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// The session state machine.
pub struct SessionController {
    bank: QuestionBank,
    config: SessionConfig,
    rng: StdRng,
    cues: Arc<dyn CuePlayer>,
    events: EventSender,
    state: SessionState,
    session: Option<Session>,
    timer: Option<ElapsedTimer>,
    feedback: FeedbackSequencer,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    /// Create a controller seeded from the operating system.
    ///
    /// Returns the receiving end of the scheduled-event channel; feed every
    /// event it yields into [`handle_event`](Self::handle_event).
    pub fn new(
        bank: QuestionBank,
        config: SessionConfig,
        cues: Arc<dyn CuePlayer>,
    ) -> (Self, EventReceiver) {
        Self::with_rng(bank, config, cues, StdRng::from_os_rng())
    }

    /// Create a controller with an explicit random source.
    pub fn with_rng(
        bank: QuestionBank,
        config: SessionConfig,
        cues: Arc<dyn CuePlayer>,
        rng: StdRng,
    ) -> (Self, EventReceiver) {
        let (events, receiver) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(SessionSnapshot::not_started());
        let controller = Self {
            bank,
            config,
            rng,
            cues,
            events,
            state: SessionState::NotStarted,
            session: None,
            timer: None,
            feedback: FeedbackSequencer::new(),
            snapshots,
        };
        (controller, receiver)
    }

    /// Create a controller with a deterministic seed.
    pub fn seeded(
        bank: QuestionBank,
        config: SessionConfig,
        cues: Arc<dyn CuePlayer>,
        seed: u64,
    ) -> (Self, EventReceiver) {
        Self::with_rng(bank, config, cues, StdRng::seed_from_u64(seed))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True once the feedback delay for the current turn has elapsed.
    pub fn can_advance(&self) -> bool {
        self.state == SessionState::Active(Turn::AwaitingAdvance)
            && self
                .session
                .as_ref()
                .is_some_and(|s| self.feedback.is_elapsed(s.current_index))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            can_advance: self.can_advance(),
            session: self.session.clone(),
        }
    }

    /// Subscribe to snapshots published after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Result report, available once the session is finished.
    pub fn report(&self) -> Option<SessionReport> {
        match self.state {
            SessionState::Finished => self.session.as_ref().and_then(SessionReport::from_session),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Begin a new session, discarding any current one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self, name: &str) -> Result<(), QuizError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::InvalidName);
        }
        let questions = sample(&self.bank, self.config.questions_per_tier, &mut self.rng)?;
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        self.stop_scheduled();

        let id = Uuid::new_v4();
        let count = questions.len();
        self.session = Some(Session::new(id, name.to_string(), questions, Utc::now()));
        self.state = SessionState::Active(Turn::AwaitingAnswer);
        self.timer = Some(ElapsedTimer::start(id, self.config.tick, self.events.clone()));

        tracing::info!(session = %id, participant = name, questions = count, "session started");
        self.publish();
        Ok(())
    }

    /// Replace the in-progress answer text.
    pub fn update_input(&mut self, text: &str) -> Result<(), QuizError> {
        self.ensure(Action::UpdateInput, Turn::AwaitingAnswer)?;
        let state = self.state;
        let Some(session) = self.session.as_mut() else {
            return Err(QuizError::InvalidTransition {
                action: Action::UpdateInput,
                state,
            });
        };
        session.pending_input = text.to_string();
        self.publish();
        Ok(())
    }

    /// Submit an answer for the current question.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self, raw_input: &str) -> Result<Verdict, QuizError> {
        self.ensure(Action::Submit, Turn::AwaitingAnswer)?;
        if raw_input.trim().is_empty() {
            return Err(QuizError::EmptyAnswer);
        }
        let state = self.state;
        let Some(session) = self.session.as_mut() else {
            return Err(QuizError::InvalidTransition {
                action: Action::Submit,
                state,
            });
        };
        let Some(question) = session.current_question().cloned() else {
            return Err(QuizError::InvalidTransition {
                action: Action::Submit,
                state,
            });
        };

        let evaluation = evaluate(raw_input, question.expected_answer);
        let verdict = Verdict::for_answer(evaluation.is_correct, question.expected_answer);

        session.pending_input = raw_input.to_string();
        if evaluation.is_correct {
            session.score += 1;
        }
        session.last_verdict = Some(verdict.clone());
        session.answers.push(AnswerRecord {
            question,
            given: raw_input.to_string(),
            is_correct: evaluation.is_correct,
        });

        let id = session.id;
        let turn = session.current_index;
        let score = session.score;
        self.state = SessionState::Active(Turn::AwaitingAdvance);
        self.feedback
            .arm(id, turn, self.config.feedback_delay, self.events.clone());

        tracing::debug!(session = %id, turn, correct = evaluation.is_correct, score, "answer submitted");

        if let Err(e) = self.cues.play_cue(evaluation.is_correct) {
            tracing::warn!("cue player '{}' failed: {e:#}", self.cues.name());
        }

        self.publish();
        Ok(verdict)
    }

    /// Move past the current verdict. Returns the resulting state.
    pub fn advance(&mut self) -> Result<SessionState, QuizError> {
        self.ensure(Action::Advance, Turn::AwaitingAdvance)?;
        if !self.can_advance() {
            return Err(QuizError::AdvanceTooEarly);
        }
        let state = self.state;
        let Some(session) = self.session.as_mut() else {
            return Err(QuizError::InvalidTransition {
                action: Action::Advance,
                state,
            });
        };

        self.feedback.cancel();

        if session.is_last_question() {
            if let Some(mut timer) = self.timer.take() {
                timer.cancel();
            }
            session.finished_at = Some(Utc::now());
            self.state = SessionState::Finished;
            tracing::info!(
                session = %session.id,
                score = session.score,
                total = session.total(),
                elapsed_seconds = session.elapsed_seconds,
                "session finished"
            );
        } else {
            session.current_index += 1;
            session.pending_input.clear();
            session.last_verdict = None;
            self.state = SessionState::Active(Turn::AwaitingAnswer);
            tracing::debug!(session = %session.id, turn = session.current_index, "advanced");
        }

        self.publish();
        Ok(self.state)
    }

    // -----------------------------------------------------------------------
    // Scheduled events
    // -----------------------------------------------------------------------

    /// Apply one scheduled event. Returns `true` if it changed state.
    ///
    /// Events from a replaced session, a past turn, or arriving after the
    /// session finished are ignored.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if event.session() != session.id || !self.state.is_active() {
            tracing::debug!(?event, "ignoring stale event");
            return false;
        }

        let changed = match event {
            SessionEvent::Tick { .. } => {
                session.elapsed_seconds += 1;
                true
            }
            SessionEvent::FeedbackElapsed { turn, .. } => {
                self.state == SessionState::Active(Turn::AwaitingAdvance)
                    && turn == session.current_index
                    && self.feedback.complete(turn)
            }
        };

        if changed {
            self.publish();
        }
        changed
    }

    /// Apply every event already queued on `events`. Returns how many changed state.
    pub fn drain(&mut self, events: &mut EventReceiver) -> usize {
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn ensure(&self, action: Action, turn: Turn) -> Result<(), QuizError> {
        if self.state == SessionState::Active(turn) {
            Ok(())
        } else {
            Err(self.rejected(action))
        }
    }

    fn rejected(&self, action: Action) -> QuizError {
        QuizError::InvalidTransition {
            action,
            state: self.state,
        }
    }

    fn stop_scheduled(&mut self) {
        self.feedback.cancel();
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.stop_scheduled();
    }
}
