//! The `quizrace validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizrace_core::source;

pub fn execute(problems: PathBuf) -> Result<()> {
    let summary = source::inspect(&problems)?;

    println!(
        "Question file: {} ({} questions)",
        problems.display(),
        summary.questions.len()
    );

    if !summary.skipped_lines.is_empty() {
        let lines: Vec<String> = summary
            .skipped_lines
            .iter()
            .map(|l| l.to_string())
            .collect();
        println!(
            "  Skipped {} row(s) with fewer than two fields (lines {})",
            lines.len(),
            lines.join(", ")
        );
    }

    let warnings = source::validate_question_set(&summary.questions);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [#{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if !summary.questions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["#", "Question", "Answer"]);
        for (idx, q) in summary.questions.iter().enumerate() {
            table.add_row(vec![
                Cell::new(idx + 1),
                Cell::new(&q.prompt),
                Cell::new(&q.expected_answer),
            ]);
        }
        println!("{table}");
    }

    if warnings.is_empty() {
        println!("Question file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
