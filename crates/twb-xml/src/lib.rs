//! Workbook XML as a labeled tree, plus the analyses run over it.
//!
//! - [`DocumentTree`] parses workbook text into nodes with a label, an
//!   attribute map and ordered children.
//! - [`analyze`] walks the tree and collects fields, calculated-field
//!   formulas, worksheets and naming clusters.
//! - [`validate`] checks the workbook root and counts datasources and
//!   worksheets.
//! - [`AnalysisMarkdown`] renders an analysis as a Markdown report.
//!
//! None of this understands Tableau semantics; labels and attributes are
//! read as plain strings.

mod analyze;
mod error;
mod render;
mod tree;
mod validate;

pub use analyze::{analyze, prefix_clusters};
pub use error::DocumentError;
pub use render::AnalysisMarkdown;
pub use tree::{Descendants, DocumentTree, Node, NodeId};
pub use validate::validate;

/// Element labels the analyzer and validator look for.
pub mod labels {
    pub const WORKBOOK: &str = "workbook";
    pub const DATASOURCE: &str = "datasource";
    pub const WORKSHEET: &str = "worksheet";
    pub const COLUMN: &str = "column";
    pub const CALCULATION: &str = "calculation";
}
