//! Line-oriented terminal collaborators.

use std::io::{BufRead, BufReader, Write};

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::mpsc;

use quizrace_core::traits::{PromptSink, ResponseSource};

/// Reads one response per line from a blocking reader.
///
/// The reader is drained on a dedicated OS thread that forwards lines over a
/// channel. A blocking read that outlives the session (the respondent never
/// pressed Enter) then holds up neither the runtime's shutdown nor the
/// process exit.
pub struct TerminalInput {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

impl TerminalInput {
    /// Read responses from standard input.
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()))
    }

    /// Read responses from any buffered reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self { lines: rx }
    }
}

#[async_trait]
impl ResponseSource for TerminalInput {
    async fn next_response(&mut self) -> anyhow::Result<Option<String>> {
        match self.lines.recv().await {
            Some(line) => line
                .map(Some)
                .context("failed to read a line of input"),
            None => Ok(None),
        }
    }
}

/// Prints prompts and reports to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl PromptSink for ConsoleOutput {
    fn emit(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}").and_then(|_| stdout.flush()) {
            tracing::warn!("failed to write to stdout: {e}");
        }
    }
}
