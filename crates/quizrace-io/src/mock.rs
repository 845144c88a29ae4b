//! Scripted collaborators for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use quizrace_core::traits::{PromptSink, ResponseSource};

/// A respondent that replays a fixed list of answers.
///
/// Each answer can be delayed to simulate thinking time. Once the script runs
/// out the input either reports end of input or waits forever.
pub struct ScriptedInput {
    /// Answers still to give.
    answers: VecDeque<String>,
    /// Delay before each answer.
    delay: Duration,
    /// Wait forever instead of reporting end of input once exhausted.
    hang_when_exhausted: bool,
    /// Number of reads made.
    reads: Arc<AtomicU32>,
}

impl ScriptedInput {
    /// Create an input that gives `answers` in order, then reports end of
    /// input.
    pub fn new<S: AsRef<str>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|a| a.as_ref().to_string())
                .collect(),
            delay: Duration::ZERO,
            hang_when_exhausted: false,
            reads: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Wait `delay` before each answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Block forever once the script is exhausted, like a silent terminal.
    pub fn hang_when_exhausted(mut self) -> Self {
        self.hang_when_exhausted = true;
        self
    }

    /// Shared counter of reads, still readable after the input has been
    /// moved into a session.
    pub fn read_counter(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.reads)
    }
}

#[async_trait]
impl ResponseSource for ScriptedInput {
    async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        match self.answers.pop_front() {
            Some(answer) => {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                Ok(Some(answer))
            }
            None if self.hang_when_exhausted => std::future::pending().await,
            None => Ok(None),
        }
    }
}

/// A respondent that never answers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentInput;

#[async_trait]
impl ResponseSource for SilentInput {
    async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
        std::future::pending().await
    }
}

/// An output sink that records every emitted line.
///
/// Clones share the same transcript.
#[derive(Debug, Default, Clone)]
pub struct RecordingOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether any emitted line equals `line`.
    pub fn contains(&self, line: &str) -> bool {
        self.lines().iter().any(|l| l == line)
    }
}

impl PromptSink for RecordingOutput {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_answers_then_end_of_input() {
        let mut input = ScriptedInput::new(["Paris", "Rome"]);
        let reads = input.read_counter();

        assert_eq!(input.next_response().await.unwrap().as_deref(), Some("Paris"));
        assert_eq!(input.next_response().await.unwrap().as_deref(), Some("Rome"));
        assert_eq!(input.next_response().await.unwrap(), None);
        assert_eq!(reads.load(Ordering::Relaxed), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied_per_answer() {
        let mut input = ScriptedInput::new(["a", "b"]).with_delay(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        input.next_response().await.unwrap();
        input.next_response().await.unwrap();

        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(4));
        assert!(waited < Duration::from_millis(4100));
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_input_never_returns_when_exhausted() {
        let mut input = ScriptedInput::new(Vec::<String>::new()).hang_when_exhausted();
        let result =
            tokio::time::timeout(Duration::from_secs(60), input.next_response()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_input_never_returns() {
        let mut input = SilentInput;
        let result =
            tokio::time::timeout(Duration::from_secs(60), input.next_response()).await;
        assert!(result.is_err());
    }

    #[test]
    fn recording_output_is_shared_between_clones() {
        let output = RecordingOutput::new();
        let clone = output.clone();
        clone.emit("Question 1/1: 2+2");
        output.emit("Correct answers: 1/1");

        assert_eq!(
            output.lines(),
            vec!["Question 1/1: 2+2", "Correct answers: 1/1"]
        );
        assert!(clone.contains("Correct answers: 1/1"));
    }
}
