//! Input and output collaborator traits.
//!
//! These are implemented by the `quizrace-io` crate for the terminal and for
//! tests.

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Line-oriented source of respondent answers.
#[async_trait]
pub trait ResponseSource: Send {
    /// Wait for the next line of input.
    ///
    /// Returns `Ok(None)` once the input is exhausted. May wait forever; the
    /// session deadline bounds the total time, not the source.
    async fn next_response(&mut self) -> anyhow::Result<Option<String>>;
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Line-oriented sink for prompts and the final report.
///
/// Shared between the runner task and the session controller, so lines are
/// emitted through `&self`.
pub trait PromptSink: Send + Sync {
    /// Emit one line of text.
    fn emit(&self, line: &str);
}

impl<T: PromptSink + ?Sized> PromptSink for std::sync::Arc<T> {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}
