//! Core data model types for quizrace.
//!
//! Questions are loaded once per session and never mutated; the session
//! produces exactly one [`SessionOutcome`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single question and the answer it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Text shown to the respondent.
    pub prompt: String,
    /// Answer the response is compared against.
    pub expected_answer: String,
}

impl QuestionRecord {
    pub fn new(prompt: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            expected_answer: expected_answer.into(),
        }
    }
}

/// An ordered, immutable collection of questions.
///
/// An empty set is valid: it yields a session that completes immediately
/// with a score of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<QuestionRecord>,
}

impl QuestionSet {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestionRecord> {
        self.questions.iter()
    }
}

impl FromIterator<QuestionRecord> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = QuestionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// The result of one session, produced exactly once after the race between
/// completion and the deadline resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Correct answers counted when the session ended.
    pub final_score: u64,
    /// `true` if every question was answered before the deadline.
    pub completed_normally: bool,
    /// Number of questions in the set.
    pub total_questions: usize,
    /// Questions whose responses were read before the session ended.
    pub answered: usize,
    /// Wall-clock time from session start to the end of the race.
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// What happens to a runner still waiting for input when the deadline wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlinePolicy {
    /// Fire the runner's cancellation token; the pending read is dropped.
    #[default]
    Cancel,
    /// Leave the runner unawaited. It may still count answers after the
    /// session has reported its outcome.
    Abandon,
}

impl fmt::Display for DeadlinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlinePolicy::Cancel => write!(f, "cancel"),
            DeadlinePolicy::Abandon => write!(f, "abandon"),
        }
    }
}

impl FromStr for DeadlinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cancel" => Ok(DeadlinePolicy::Cancel),
            "abandon" => Ok(DeadlinePolicy::Abandon),
            other => Err(format!("unknown deadline policy: {other}")),
        }
    }
}
