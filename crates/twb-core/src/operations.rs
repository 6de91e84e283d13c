//! The caller-facing operations.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{info, info_span};
use twb_map::{Remapped, RowPolicy, apply, parse_mapping_set};
use twb_xml::{DocumentTree, analyze, validate};

use crate::error::OperationError;
use crate::fs::{read_text, require_extension, write_text};
use crate::outcome::{
    MappingValidation, RemapOutcome, WorkbookAnalysis, WorkbookValidation, WriteOutcome,
};

const WORKBOOK_EXTENSION: &str = "twb";
const MAPPING_EXTENSION: &str = "csv";

/// Apply a mapping CSV to a workbook and write the result to `output_path`.
///
/// Short and blank rows in the mapping file are skipped. Nothing is written
/// when the mapping set turns out empty or when `output_path` names the input
/// workbook.
pub fn remap(
    mapping_path: &Path,
    workbook_path: &Path,
    output_path: &Path,
) -> Result<RemapOutcome, OperationError> {
    require_argument(mapping_path, "mapping_file_path")?;
    require_argument(workbook_path, "workbook_file_path")?;
    require_argument(output_path, "output_file_path")?;
    require_distinct_output(workbook_path, output_path)?;
    let _guard = info_span!("remap", workbook = %workbook_path.display()).entered();

    let mapping_text = read_text(mapping_path)?;
    let rules = parse_mapping_set(&mapping_text, RowPolicy::Lenient)
        .map_err(|error| OperationError::from_mapping(error, mapping_path))?;
    let workbook = read_text(workbook_path)?;
    let Remapped { text, report } =
        apply(&workbook, &rules).map_err(|error| OperationError::from_mapping(error, mapping_path))?;
    write_text(output_path, &text)?;

    info!(
        rules = rules.len(),
        total_replacements = report.total_replacements(),
        output = %output_path.display(),
        "remapped workbook written"
    );
    Ok(RemapOutcome {
        output_path: output_path.to_path_buf(),
        rule_count: rules.len(),
        total_replacements: report.total_replacements(),
        per_rule: report,
    })
}

/// Return the raw text of a TOML mapping definition.
///
/// No parsing happens here; turning the key/value pairs into mapping rows is
/// left to the caller.
pub fn load_mapping_preview(toml_path: &Path) -> Result<String, OperationError> {
    require_argument(toml_path, "toml_file_path")?;
    read_text(toml_path)
}

/// Check that every row of a mapping CSV has at least two columns.
pub fn validate_mapping(mapping_path: &Path) -> Result<MappingValidation, OperationError> {
    require_argument(mapping_path, "mapping_file_path")?;
    require_extension(mapping_path, MAPPING_EXTENSION, "CSV")?;
    let _guard = info_span!("validate_mapping", path = %mapping_path.display()).entered();

    let text = read_text(mapping_path)?;
    let rules = parse_mapping_set(&text, RowPolicy::Strict)
        .map_err(|error| OperationError::from_mapping(error, mapping_path))?;
    info!(rules = rules.len(), "mapping file valid");
    Ok(MappingValidation { valid: true, rules })
}

/// Check that a `.twb` file is rooted at `<workbook>` and count its parts.
pub fn validate_workbook(workbook_path: &Path) -> Result<WorkbookValidation, OperationError> {
    require_argument(workbook_path, "workbook_file_path")?;
    require_extension(
        workbook_path,
        WORKBOOK_EXTENSION,
        "Tableau workbook (.twb)",
    )?;
    let _guard = info_span!("validate_workbook", path = %workbook_path.display()).entered();

    let text = read_text(workbook_path)?;
    let tree = DocumentTree::parse(&text)?;
    let summary = validate(&tree)?;
    info!(
        version = %summary.version,
        datasources = summary.datasource_count,
        worksheets = summary.worksheet_count,
        "workbook valid"
    );
    Ok(WorkbookValidation {
        valid: true,
        summary,
    })
}

/// Collect fields, formulas, worksheets and naming clusters from a workbook.
pub fn analyze_workbook(workbook_path: &Path) -> Result<WorkbookAnalysis, OperationError> {
    require_argument(workbook_path, "workbook_file_path")?;
    let _guard = info_span!("analyze_workbook", path = %workbook_path.display()).entered();

    let text = read_text(workbook_path)?;
    let tree = DocumentTree::parse(&text)?;
    let report = analyze(&tree);
    let file_name = workbook_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(WorkbookAnalysis { file_name, report })
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<WriteOutcome, OperationError> {
    require_argument(path, "file_path")?;
    write_text(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "file written");
    Ok(WriteOutcome {
        path: path.to_path_buf(),
        bytes: content.len(),
    })
}

/// Output path used when the caller does not name one:
/// `<dir>/<stem>_remapped_<YYYYMMDD_HHMMSS>.twb`.
pub fn default_output_path(workbook_path: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let stem = workbook_path
        .file_stem()
        .map_or_else(|| "workbook".into(), |stem| stem.to_string_lossy());
    workbook_path.with_file_name(format!(
        "{stem}_remapped_{}.{WORKBOOK_EXTENSION}",
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}

fn require_distinct_output(workbook_path: &Path, output_path: &Path) -> Result<(), OperationError> {
    let same_file = match (fs::canonicalize(workbook_path), fs::canonicalize(output_path)) {
        (Ok(workbook), Ok(output)) => workbook == output,
        _ => workbook_path == output_path,
    };
    if same_file {
        return Err(OperationError::OutputOverwritesInput {
            path: output_path.to_path_buf(),
        });
    }
    Ok(())
}

fn require_argument(path: &Path, name: &'static str) -> Result<(), OperationError> {
    if path.as_os_str().is_empty() {
        return Err(OperationError::MissingArgument { name });
    }
    Ok(())
}
