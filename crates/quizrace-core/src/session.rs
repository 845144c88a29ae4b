//! Timed session orchestrator.
//!
//! Spawns the quiz runner as its own task and races its completion signal
//! against a single session-wide deadline.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::model::{DeadlinePolicy, QuestionSet, SessionOutcome};
use crate::runner::QuizRunner;
use crate::score::ScoreTracker;
use crate::traits::{PromptSink, ResponseSource};

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Wall-clock limit for the whole session.
    pub deadline: Duration,
    /// What to do with a runner still waiting for input at the deadline.
    pub deadline_policy: DeadlinePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(30),
            deadline_policy: DeadlinePolicy::Cancel,
        }
    }
}

/// Runs one quiz against a deadline and reports the outcome.
pub struct SessionController {
    config: SessionConfig,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Run a session with a fresh score tracker.
    pub async fn run_session<I, O>(
        &self,
        questions: QuestionSet,
        input: I,
        output: O,
    ) -> SessionOutcome
    where
        I: ResponseSource + 'static,
        O: PromptSink + Clone + 'static,
    {
        self.run_session_with_tracker(questions, input, output, Arc::new(ScoreTracker::new()))
            .await
    }

    /// Run a session that counts into a caller-owned tracker.
    ///
    /// With [`DeadlinePolicy::Abandon`] the runner outlives a timed-out
    /// session and may keep incrementing `tracker`.
    pub async fn run_session_with_tracker<I, O>(
        &self,
        questions: QuestionSet,
        input: I,
        output: O,
        tracker: Arc<ScoreTracker>,
    ) -> SessionOutcome
    where
        I: ResponseSource + 'static,
        O: PromptSink + Clone + 'static,
    {
        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("session", %session_id);
        self.race(questions, input, output, tracker)
            .instrument(span)
            .await
    }

    async fn race<I, O>(
        &self,
        questions: QuestionSet,
        input: I,
        output: O,
        tracker: Arc<ScoreTracker>,
    ) -> SessionOutcome
    where
        I: ResponseSource + 'static,
        O: PromptSink + Clone + 'static,
    {
        let start = Instant::now();
        let total = questions.len();
        tracing::info!(
            questions = total,
            deadline_ms = self.config.deadline.as_millis() as u64,
            policy = %self.config.deadline_policy,
            "session started"
        );

        let cancel = CancelToken::new();
        let runner = QuizRunner::new(input, output.clone(), Arc::clone(&tracker), cancel.clone());
        let answered = runner.answered_counter();

        let completed_normally = if questions.is_empty() {
            true
        } else {
            let (done_tx, done_rx) = oneshot::channel();
            let questions = Arc::new(questions);
            tokio::spawn(
                async move { runner.run(&questions, Some(done_tx)).await }
                    .instrument(tracing::Span::current()),
            );

            tokio::select! {
                biased;
                done = done_rx => match done {
                    Ok(()) => true,
                    Err(_) => {
                        tracing::warn!("runner stopped without completing");
                        false
                    }
                },
                _ = tokio::time::sleep(self.config.deadline) => false,
            }
        };

        if !completed_normally {
            output.emit("Time's up!");
            match self.config.deadline_policy {
                DeadlinePolicy::Cancel => cancel.cancel(),
                DeadlinePolicy::Abandon => {
                    tracing::debug!("leaving runner in place after deadline");
                }
            }
        }

        let final_score = tracker.read();
        output.emit(&format!("Correct answers: {final_score}/{total}"));

        let outcome = SessionOutcome {
            final_score,
            completed_normally,
            total_questions: total,
            answered: answered.load(Ordering::Acquire),
            elapsed: start.elapsed(),
        };
        tracing::info!(
            final_score,
            completed_normally,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "session finished"
        );
        outcome
    }
}
