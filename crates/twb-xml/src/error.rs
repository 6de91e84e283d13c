use thiserror::Error;

/// Errors from building or validating a workbook tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// The root element is missing or is not `<workbook>`.
    #[error("not a workbook")]
    NotAWorkbook,
}

impl DocumentError {
    pub(crate) fn syntax(position: u64, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}
