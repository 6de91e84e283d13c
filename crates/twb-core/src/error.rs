//! Operation error model.
//!
//! Every failure is terminal for the call that raised it. Only
//! [`OperationError::MissingArgument`] is a hard failure; everything else is
//! meant to be shown to the user as text.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use twb_map::MappingError;
use twb_xml::DocumentError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OperationError {
    /// A required input was not supplied.
    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    /// The path does not carry the expected extension.
    #[error("File must be a {expected} file. Got {}", path.display())]
    InvalidFileType {
        expected: &'static str,
        path: PathBuf,
    },

    /// A mapping row could not form a rule (validation only).
    #[error("{detail}")]
    MalformedMappingRow { line: u64, detail: String },

    /// The mapping source has no usable rules.
    #[error("Mapping file is empty")]
    EmptyMappingSet,

    /// The remap target is the input workbook itself.
    #[error("Output file must differ from the input workbook. Got {}", path.display())]
    OutputOverwritesInput { path: PathBuf },

    /// The workbook is not well-formed or not rooted at `<workbook>`.
    #[error("File does not appear to be a valid Tableau workbook ({reason})")]
    DocumentNotWellFormed { reason: String },

    /// Reading or writing a file failed.
    #[error("Failed to {operation} {}: {source}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OperationError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Convert a mapping error raised while reading `path`.
    pub(crate) fn from_mapping(error: MappingError, path: &Path) -> Self {
        match error {
            MappingError::MalformedRow { line, .. } | MappingError::EmptyOriginal { line } => {
                Self::MalformedMappingRow {
                    line,
                    detail: error.to_string(),
                }
            }
            MappingError::Empty => Self::EmptyMappingSet,
            MappingError::Csv(source) => Self::io("parse", path, io::Error::from(source)),
        }
    }

    /// True for integration errors that should not be reported as text.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }

    /// Message suitable for showing to a user.
    pub fn user_message(&self) -> String {
        format!("Error: {self}")
    }
}

impl From<DocumentError> for OperationError {
    fn from(error: DocumentError) -> Self {
        Self::DocumentNotWellFormed {
            reason: error.to_string(),
        }
    }
}
