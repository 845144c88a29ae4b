//! quizrace-core — Question loading, answer scoring, and the timed session
//! engine.
//!
//! A session presents questions one at a time, scores each response, and
//! races the respondent against a single wall-clock deadline.

pub mod cancel;
pub mod error;
pub mod model;
pub mod normalize;
pub mod runner;
pub mod score;
pub mod session;
pub mod source;
pub mod traits;

pub use error::LoadError;
pub use model::{DeadlinePolicy, QuestionRecord, QuestionSet, SessionOutcome};
pub use session::{SessionConfig, SessionController};
