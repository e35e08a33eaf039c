//! linquiz-core: session state machine, question bank, and scoring.
//!
//! This crate owns everything with real invariants: stratified sampling of
//! questions, answer evaluation, the elapsed-time ticker, the feedback delay,
//! and the controller that sequences a session from name entry to result.
//! Rendering and audio live outside and talk to the core through
//! [`controller::SessionController`] and [`traits::CuePlayer`].

pub mod bank;
pub mod config;
pub mod controller;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod mock;
pub mod model;
pub mod parser;
pub mod report;
pub mod sampler;
pub mod session;
pub mod timer;
pub mod traits;

pub use bank::QuestionBank;
pub use controller::{SessionConfig, SessionController};
pub use error::QuizError;
pub use model::{Difficulty, Question};
pub use session::{Session, SessionSnapshot, SessionState, Turn, Verdict};
