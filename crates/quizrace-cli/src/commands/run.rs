//! The `quizrace run` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use quizrace_core::source::{self, QuestionOrder};
use quizrace_core::traits::{PromptSink, ResponseSource};
use quizrace_core::{SessionConfig, SessionController};
use quizrace_io::{ConsoleOutput, TerminalInput};

use crate::config::{load_config_from, Overrides};

pub struct RunOptions {
    pub overrides: Overrides,
    pub no_intro: bool,
    pub format: String,
    pub config_path: Option<PathBuf>,
}

pub async fn execute(options: RunOptions) -> Result<()> {
    anyhow::ensure!(
        matches!(options.format.as_str(), "text" | "json"),
        "unknown format '{}', expected text or json",
        options.format
    );

    let config =
        load_config_from(options.config_path.as_deref())?.with_overrides(options.overrides);
    anyhow::ensure!(
        config.time_limit_secs >= 1,
        "time limit must be at least 1 second"
    );

    // A load failure ends the run cleanly before anything is asked.
    let order = QuestionOrder::from_flag(config.randomize);
    let questions = match source::load(&config.problems, order) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::debug!(path = %e.path().display(), "question file failed to load");
            eprintln!("Error: {e}");
            return Ok(());
        }
    };

    let mut input = TerminalInput::stdin();
    let output = ConsoleOutput;

    if !options.no_intro {
        output.emit("Press Enter to start the quiz.");
        if let Err(e) = input.next_response().await {
            tracing::warn!("failed to read start confirmation: {e:#}");
        }
    }

    let controller = SessionController::new(SessionConfig {
        deadline: Duration::from_secs(config.time_limit_secs),
        deadline_policy: config.deadline_policy,
    });
    let outcome = controller.run_session(questions, input, output).await;

    if options.format == "json" {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
