//! Question loading errors.
//!
//! `LoadError` is the only error that crosses the session boundary. Every
//! other anomaly (short rows, wrong or unreadable answers, the deadline) is
//! absorbed into scoring state.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a question file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The question file could not be opened.
    #[error("can't open question file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The question file was opened but is not valid CSV.
    #[error("can't parse question file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Open { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }
}
