//! quizrace CLI — timed quizzes from a CSV file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizrace_core::DeadlinePolicy;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "quizrace", version, about = "Timed quizzes from a CSV file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz
    Run {
        /// CSV file of `question,answer` rows (default: problems.csv)
        #[arg(long)]
        problems: Option<PathBuf>,

        /// Time limit for the whole quiz in seconds (default: 30)
        #[arg(long)]
        time_limit: Option<u64>,

        /// Shuffle the questions
        #[arg(long)]
        random: bool,

        /// What happens to an unanswered question when time runs out: cancel, abandon
        #[arg(long)]
        deadline_policy: Option<DeadlinePolicy>,

        /// Start immediately instead of waiting for Enter
        #[arg(long)]
        no_intro: bool,

        /// Final report format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question file
    Validate {
        /// CSV file of `question,answer` rows
        #[arg(long, default_value = "problems.csv")]
        problems: PathBuf,
    },

    /// Create a starter config and question file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizrace=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            problems,
            time_limit,
            random,
            deadline_policy,
            no_intro,
            format,
            config,
        } => {
            commands::run::execute(commands::run::RunOptions {
                overrides: config::Overrides {
                    problems,
                    time_limit_secs: time_limit,
                    randomize: random,
                    deadline_policy,
                },
                no_intro,
                format,
                config_path: config,
            })
            .await
        }
        Commands::Validate { problems } => commands::validate::execute(problems),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
