//! The `quizrace init` command.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new(CONFIG_FILE), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("problems.csv"), SAMPLE_PROBLEMS)?;

    println!("\nNext steps:");
    println!("  1. Edit problems.csv with your own questions");
    println!("  2. Run: quizrace validate --problems problems.csv");
    println!("  3. Run: quizrace run");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrace configuration

problems = "problems.csv"
time_limit_secs = 30
randomize = false
# "cancel" drops an unanswered question at the deadline; "abandon" leaves it waiting.
deadline_policy = "cancel"
"#;

const SAMPLE_PROBLEMS: &str = "5+5,10
1+1,2
8+3,11
1+2,3
8+6,14
3+1,4
1+4,5
5+1,6
2+3,5
3+3,6
2+4,6
5+2,7
what 2+2 sums to,4
capital of France,Paris
";
