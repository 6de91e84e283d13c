//! Error types for mapping operations.

use thiserror::Error;

/// Errors from loading or applying a mapping set.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A row has fewer than two columns.
    #[error("Line {line} does not have at least two columns")]
    MalformedRow { line: u64, columns: usize },

    /// A row's original name is blank after trimming.
    #[error("Line {line} has an empty original name")]
    EmptyOriginal { line: u64 },

    /// No usable rules.
    #[error("mapping set empty")]
    Empty,

    /// The source could not be read as CSV.
    #[error("failed to read mapping CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl MappingError {
    /// Line number of the offending row, for row-level errors.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRow { line, .. } | Self::EmptyOriginal { line } => Some(*line),
            Self::Empty | Self::Csv(_) => None,
        }
    }
}
