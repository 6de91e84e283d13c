//! Workbook well-formedness check.

use tracing::debug;
use twb_model::{UNKNOWN_VERSION, WorkbookSummary};

use crate::error::DocumentError;
use crate::labels::{DATASOURCE, WORKBOOK, WORKSHEET};
use crate::tree::DocumentTree;

/// Check that the tree is rooted at `<workbook>` and summarize it.
///
/// Datasources and worksheets are counted at any depth.
pub fn validate(tree: &DocumentTree) -> Result<WorkbookSummary, DocumentError> {
    let root = tree
        .root()
        .filter(|root| root.label() == WORKBOOK)
        .ok_or(DocumentError::NotAWorkbook)?;

    let summary = WorkbookSummary {
        version: root
            .attribute("version")
            .unwrap_or(UNKNOWN_VERSION)
            .to_string(),
        datasource_count: tree.count(DATASOURCE),
        worksheet_count: tree.count(WORKSHEET),
    };
    debug!(?summary, "workbook validated");
    Ok(summary)
}
