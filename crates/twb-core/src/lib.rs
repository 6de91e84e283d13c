//! Operations exposed to callers of the Tableau dimension mapper.
//!
//! Each operation reads its inputs from disk, runs one of the pipelines and
//! returns a serializable outcome whose `Display` is the message shown to a
//! user:
//!
//! - [`remap`]: mapping CSV + workbook → rewritten workbook + per-rule report
//! - [`load_mapping_preview`]: raw text of a TOML mapping definition
//! - [`validate_mapping`]: strict row-shape check of a mapping CSV
//! - [`validate_workbook`]: root element and node counts of a `.twb`
//! - [`analyze_workbook`]: fields, formulas, worksheets and naming clusters
//! - [`write_file`]: write text, creating parent directories
//!
//! Operations are independent and keep no state between calls.

mod error;
pub mod fs;
mod operations;
mod outcome;

pub use error::OperationError;
pub use operations::{
    analyze_workbook, default_output_path, load_mapping_preview, remap, validate_mapping,
    validate_workbook, write_file,
};
pub use outcome::{
    MappingValidation, RemapOutcome, WorkbookAnalysis, WorkbookValidation, WriteOutcome,
};
