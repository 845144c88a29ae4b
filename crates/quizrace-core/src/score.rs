//! Correct-answer counter shared between the runner and the controller.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing count of correct answers.
///
/// Written by the runner task, read by the session controller. The value
/// only ever grows, and every read observes a value the counter actually
/// held.
#[derive(Debug, Default)]
pub struct ScoreTracker {
    correct: AtomicU64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more correct answer.
    pub fn increment(&self) {
        self.correct.fetch_add(1, Ordering::AcqRel);
    }

    /// Current number of correct answers.
    pub fn read(&self) -> u64 {
        self.correct.load(Ordering::Acquire)
    }
}
