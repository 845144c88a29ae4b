//! Sequential question presentation and scoring.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::cancel::CancelToken;
use crate::model::QuestionSet;
use crate::normalize::is_correct;
use crate::score::ScoreTracker;
use crate::traits::{PromptSink, ResponseSource};

/// How a runner stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Every question was presented and answered.
    Completed,
    /// The cancellation token fired while waiting for a response.
    Cancelled,
}

/// Drives one pass over a question set: present, await response, score,
/// advance.
pub struct QuizRunner<I, O> {
    input: I,
    output: O,
    tracker: Arc<ScoreTracker>,
    cancel: CancelToken,
    answered: Arc<AtomicUsize>,
}

impl<I, O> QuizRunner<I, O>
where
    I: ResponseSource,
    O: PromptSink,
{
    pub fn new(input: I, output: O, tracker: Arc<ScoreTracker>, cancel: CancelToken) -> Self {
        Self {
            input,
            output,
            tracker,
            cancel,
            answered: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Counter of responses read so far, observable while the runner is
    /// still going.
    pub fn answered_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.answered)
    }

    /// Run through every question in order.
    ///
    /// Blocks on input for each question; only the cancellation token can
    /// stop it early. Presenting and scoring are skipped once the token has
    /// fired, even for a read that was already under way. If `done` is given
    /// it is signalled once, on completion only.
    pub async fn run(
        mut self,
        questions: &QuestionSet,
        done: Option<oneshot::Sender<()>>,
    ) -> RunEnd {
        let total = questions.len();

        for (idx, question) in questions.iter().enumerate() {
            let prompt = format!("Question {}/{}: {}", idx + 1, total, question.prompt);
            if self.cancel.unless_cancelled(|| self.output.emit(&prompt)).is_none() {
                tracing::debug!(question = idx + 1, "runner cancelled before presenting");
                return RunEnd::Cancelled;
            }

            let response = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    tracing::debug!(question = idx + 1, "runner cancelled while awaiting response");
                    return RunEnd::Cancelled;
                }
                read = self.input.next_response() => read,
            };

            let response = match response {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!(question = idx + 1, "input exhausted, scoring as empty");
                    String::new()
                }
                Err(e) => {
                    tracing::warn!(question = idx + 1, "failed to read response: {e:#}");
                    String::new()
                }
            };
            // A read that resolved as the deadline fired must not score.
            let correct = is_correct(&response, &question.expected_answer);
            let scored = self.cancel.unless_cancelled(|| {
                self.answered.fetch_add(1, Ordering::AcqRel);
                if correct {
                    self.tracker.increment();
                }
            });
            if scored.is_none() {
                tracing::debug!(question = idx + 1, "runner cancelled before scoring");
                return RunEnd::Cancelled;
            }
            tracing::debug!(question = idx + 1, correct, "scored response");
        }

        if let Some(done) = done {
            // The controller may have stopped listening after the deadline.
            let _ = done.send(());
        }
        RunEnd::Completed
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::model::QuestionRecord;

    struct Answers(VecDeque<String>);

    #[async_trait]
    impl ResponseSource for Answers {
        async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    struct Broken;

    #[async_trait]
    impl ResponseSource for Broken {
        async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
            anyhow::bail!("stdin closed unexpectedly")
        }
    }

    struct Never;

    #[async_trait]
    impl ResponseSource for Never {
        async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
            futures::future::pending().await
        }
    }

    /// Fires the token while its read is in flight, then answers anyway.
    struct AnswersAsCancelled {
        cancel: CancelToken,
        answer: String,
    }

    #[async_trait]
    impl ResponseSource for AnswersAsCancelled {
        async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
            self.cancel.cancel();
            Ok(Some(self.answer.clone()))
        }
    }

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl PromptSink for Lines {
        fn emit(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    fn answers(lines: &[&str]) -> Answers {
        Answers(lines.iter().map(|s| s.to_string()).collect())
    }

    fn capitals() -> QuestionSet {
        QuestionSet::new(vec![
            QuestionRecord::new("France", "Paris"),
            QuestionRecord::new("Italy", "Rome"),
            QuestionRecord::new("Spain", "Madrid"),
        ])
    }

    #[tokio::test]
    async fn scores_correct_answers_and_signals_done() {
        let tracker = Arc::new(ScoreTracker::new());
        let output = Arc::new(Lines::default());
        let (tx, rx) = oneshot::channel();

        let runner = QuizRunner::new(
            answers(&["paris", "Milan", " MADRID. "]),
            Arc::clone(&output),
            Arc::clone(&tracker),
            CancelToken::new(),
        );
        let answered = runner.answered_counter();
        let end = runner.run(&capitals(), Some(tx)).await;

        assert_eq!(end, RunEnd::Completed);
        assert_eq!(tracker.read(), 2);
        assert_eq!(answered.load(Ordering::Acquire), 3);
        rx.await.expect("completion should be signalled");

        let lines = output.0.lock().unwrap();
        assert_eq!(
            *lines,
            vec![
                "Question 1/3: France",
                "Question 2/3: Italy",
                "Question 3/3: Spain",
            ]
        );
    }

    #[tokio::test]
    async fn exhausted_input_scores_remaining_as_wrong() {
        let tracker = Arc::new(ScoreTracker::new());
        let runner = QuizRunner::new(
            answers(&["Paris"]),
            Lines::default(),
            Arc::clone(&tracker),
            CancelToken::new(),
        );
        assert_eq!(runner.run(&capitals(), None).await, RunEnd::Completed);
        assert_eq!(tracker.read(), 1);
    }

    #[tokio::test]
    async fn read_errors_are_scored_as_wrong() {
        let tracker = Arc::new(ScoreTracker::new());
        let runner = QuizRunner::new(
            Broken,
            Lines::default(),
            Arc::clone(&tracker),
            CancelToken::new(),
        );
        assert_eq!(runner.run(&capitals(), None).await, RunEnd::Completed);
        assert_eq!(tracker.read(), 0);
    }

    #[tokio::test]
    async fn empty_set_completes_immediately() {
        let (tx, rx) = oneshot::channel();
        let output = Arc::new(Lines::default());
        let runner = QuizRunner::new(
            Never,
            Arc::clone(&output),
            Arc::new(ScoreTracker::new()),
            CancelToken::new(),
        );
        let end = runner.run(&QuestionSet::default(), Some(tx)).await;
        assert_eq!(end, RunEnd::Completed);
        rx.await.unwrap();
        assert!(output.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cancel_stops_a_blocked_runner_without_signalling() {
        let cancel = CancelToken::new();
        let (tx, rx) = oneshot::channel();
        let runner = QuizRunner::new(
            Never,
            Lines::default(),
            Arc::new(ScoreTracker::new()),
            cancel.clone(),
        );
        let handle = tokio::spawn(async move { runner.run(&capitals(), Some(tx)).await });

        tokio::task::yield_now().await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), RunEnd::Cancelled);
        assert!(rx.await.is_err(), "cancelled runner must not signal completion");
    }

    #[tokio::test]
    async fn read_resolving_after_cancel_is_not_scored() {
        let cancel = CancelToken::new();
        let tracker = Arc::new(ScoreTracker::new());
        let output = Arc::new(Lines::default());
        let (tx, rx) = oneshot::channel();
        let input = AnswersAsCancelled {
            cancel: cancel.clone(),
            answer: "Paris".to_string(),
        };

        let runner = QuizRunner::new(input, Arc::clone(&output), Arc::clone(&tracker), cancel);
        let answered = runner.answered_counter();
        let end = runner.run(&capitals(), Some(tx)).await;

        assert_eq!(end, RunEnd::Cancelled);
        assert_eq!(tracker.read(), 0);
        assert_eq!(answered.load(Ordering::Acquire), 0);
        assert!(rx.await.is_err());
        assert_eq!(*output.0.lock().unwrap(), vec!["Question 1/3: France"]);
    }
}
