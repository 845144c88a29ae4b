//! quizrace configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizrace_core::DeadlinePolicy;

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE: &str = "quizrace.toml";

/// Top-level quizrace configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// CSV file of `prompt,answer` rows.
    #[serde(default = "default_problems")]
    pub problems: PathBuf,
    /// Time limit for the whole quiz, in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Shuffle the questions once at load time.
    #[serde(default)]
    pub randomize: bool,
    /// What happens to a pending answer when time runs out.
    #[serde(default)]
    pub deadline_policy: DeadlinePolicy,
}

fn default_problems() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_time_limit() -> u64 {
    30
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            problems: default_problems(),
            time_limit_secs: default_time_limit(),
            randomize: false,
            deadline_policy: DeadlinePolicy::default(),
        }
    }
}

/// Flags given on the command line; `Some` values win over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub problems: Option<PathBuf>,
    pub time_limit_secs: Option<u64>,
    pub randomize: bool,
    pub deadline_policy: Option<DeadlinePolicy>,
}

impl QuizConfig {
    /// Apply command-line overrides. `randomize` can only be switched on.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(problems) = overrides.problems {
            self.problems = problems;
        }
        if let Some(secs) = overrides.time_limit_secs {
            self.time_limit_secs = secs;
        }
        if overrides.randomize {
            self.randomize = true;
        }
        if let Some(policy) = overrides.deadline_policy {
            self.deadline_policy = policy;
        }
        self
    }
}

/// Load config from an explicit path, or from `quizrace.toml` in the current
/// directory if present. Without either, defaults are used.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            local.exists().then_some(local)
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), ?config, "loaded config");
            Ok(config)
        }
        None => Ok(QuizConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.time_limit_secs, 30);
        assert!(!config.randomize);
        assert_eq!(config.problems, PathBuf::from("problems.csv"));
        assert_eq!(config.deadline_policy, DeadlinePolicy::Cancel);
    }

    #[test]
    fn parse_partial_config() {
        let config: QuizConfig = toml::from_str(
            r#"
time_limit_secs = 10
deadline_policy = "abandon"
"#,
        )
        .unwrap();
        assert_eq!(config.time_limit_secs, 10);
        assert_eq!(config.deadline_policy, DeadlinePolicy::Abandon);
        assert_eq!(config.problems, PathBuf::from("problems.csv"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = QuizConfig {
            time_limit_secs: 10,
            ..Default::default()
        }
        .with_overrides(Overrides {
            problems: Some(PathBuf::from("capitals.csv")),
            time_limit_secs: Some(5),
            randomize: true,
            deadline_policy: None,
        });
        assert_eq!(config.time_limit_secs, 5);
        assert!(config.randomize);
        assert_eq!(config.problems, PathBuf::from("capitals.csv"));
        assert_eq!(config.deadline_policy, DeadlinePolicy::Cancel);
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "randomize = true\nproblems = \"q.csv\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.randomize);
        assert_eq!(config.problems, PathBuf::from("q.csv"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("no/such/quizrace.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "time_limit_secs = \"soon\"").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
