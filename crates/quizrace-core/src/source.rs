//! CSV question loader.
//!
//! Loads question sets from headerless CSV files of `prompt,answer` rows,
//! optionally shuffles them, and validates them.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::LoadError;
use crate::model::{QuestionRecord, QuestionSet};

/// Order in which loaded questions are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOrder {
    /// Keep the file's row order.
    AsWritten,
    /// A permutation fixed by `seed`, computed once at load time.
    Shuffled { seed: u64 },
}

impl QuestionOrder {
    /// Map the `randomize` flag to an order. A shuffle is seeded from the
    /// wall clock, so it differs between runs.
    pub fn from_flag(randomize: bool) -> Self {
        if randomize {
            QuestionOrder::Shuffled {
                seed: clock_seed(),
            }
        } else {
            QuestionOrder::AsWritten
        }
    }

    fn apply(self, questions: &mut [QuestionRecord]) {
        if let QuestionOrder::Shuffled { seed } = self {
            let mut rng = StdRng::seed_from_u64(seed);
            questions.shuffle(&mut rng);
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Everything learned while reading a question file.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    /// Questions in file order.
    pub questions: QuestionSet,
    /// 1-based line numbers of rows skipped for having fewer than two fields.
    pub skipped_lines: Vec<u64>,
}

/// Load a question file.
pub fn load(path: &Path, order: QuestionOrder) -> Result<QuestionSet, LoadError> {
    let file = open(path)?;
    load_from_reader(file, path, order)
}

/// Load questions from any reader (useful for testing). `source` names the
/// input in errors.
pub fn load_from_reader<R: Read>(
    reader: R,
    source: &Path,
    order: QuestionOrder,
) -> Result<QuestionSet, LoadError> {
    let summary = read_rows(reader, source)?;
    let mut questions = summary.questions.questions().to_vec();
    order.apply(&mut questions);

    tracing::debug!(
        path = %source.display(),
        loaded = questions.len(),
        skipped = summary.skipped_lines.len(),
        ?order,
        "loaded question set"
    );
    Ok(QuestionSet::new(questions))
}

/// Read a question file without reordering it, keeping track of skipped rows.
pub fn inspect(path: &Path) -> Result<SourceSummary, LoadError> {
    let file = open(path)?;
    read_rows(file, path)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows<R: Read>(reader: R, source: &Path) -> Result<SourceSummary, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut questions = Vec::new();
    let mut skipped_lines = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(|source_err| LoadError::Parse {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        match (record.get(0), record.get(1)) {
            (Some(prompt), Some(answer)) => {
                questions.push(QuestionRecord::new(prompt, answer));
            }
            _ => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                tracing::debug!(line, "skipping row with fewer than two fields");
                skipped_lines.push(line);
            }
        }
    }

    Ok(SourceSummary {
        questions: QuestionSet::new(questions),
        skipped_lines,
    })
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the question in the set (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for common authoring mistakes.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "no questions found".into(),
        });
    }

    let mut seen_prompts = HashSet::new();
    for (idx, question) in set.iter().enumerate() {
        let number = Some(idx + 1);

        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "prompt is empty".into(),
            });
        }

        if question.expected_answer.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "expected answer is empty".into(),
            });
        } else if question.expected_answer.chars().any(char::is_whitespace) {
            // Responses lose all whitespace before comparison.
            warnings.push(ValidationWarning {
                question: number,
                message: format!(
                    "expected answer '{}' contains whitespace and can never match",
                    question.expected_answer
                ),
            });
        }

        if !seen_prompts.insert(question.prompt.as_str()) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("duplicate prompt: {}", question.prompt),
            });
        }
    }

    warnings
}
