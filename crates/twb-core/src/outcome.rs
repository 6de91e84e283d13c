//! Operation results and their user-facing messages.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use twb_model::{AnalysisReport, MappingSet, ReplacementReport, WorkbookSummary};
use twb_xml::AnalysisMarkdown;

/// Result of [`remap`](crate::remap).
#[derive(Debug, Clone, Serialize)]
pub struct RemapOutcome {
    pub output_path: PathBuf,
    pub rule_count: usize,
    pub total_replacements: usize,
    pub per_rule: ReplacementReport,
}

impl fmt::Display for RemapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✅ Successfully remapped dimensions in the Tableau workbook.")?;
        writeln!(f)?;
        writeln!(
            f,
            "Made {} replacements using {} mapping rules.",
            self.total_replacements, self.rule_count
        )?;
        writeln!(f)?;
        writeln!(f, "Replacement details:")?;
        for entry in self.per_rule.entries() {
            writeln!(
                f,
                "• \"{}\" → \"{}\": {} replacements",
                entry.original, entry.replacement, entry.occurrences
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Analysis of Changes:")?;
        write!(f, "The dimension remapping has been applied successfully. ")?;
        if self.total_replacements > 0 {
            writeln!(
                f,
                "A total of {} replacements were made across {} different mappings. \
                 These changes may affect calculated fields, visualizations, and filters \
                 that reference the renamed dimensions. \
                 Make sure to validate the workbook after opening it in Tableau.",
                self.total_replacements,
                self.per_rule.matched_originals()
            )?;
        } else {
            writeln!(
                f,
                "No replacements were made. This could indicate that the mapping file \
                 contains dimension names that don't exist in the workbook."
            )?;
        }
        writeln!(f)?;
        write!(f, "Modified workbook saved to: {}", self.output_path.display())
    }
}

/// Result of [`validate_mapping`](crate::validate_mapping).
#[derive(Debug, Clone, Serialize)]
pub struct MappingValidation {
    pub valid: bool,
    pub rules: MappingSet,
}

impl fmt::Display for MappingValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "✅ Mapping file is valid with {} mappings:", self.rules.len())?;
        for rule in &self.rules {
            write!(f, "\n• \"{}\" → \"{}\"", rule.original, rule.replacement)?;
        }
        Ok(())
    }
}

/// Result of [`validate_workbook`](crate::validate_workbook).
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookValidation {
    pub valid: bool,
    #[serde(flatten)]
    pub summary: WorkbookSummary,
}

impl fmt::Display for WorkbookValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✅ Tableau workbook is valid (version {}) with {} datasources and {} worksheets",
            self.summary.version, self.summary.datasource_count, self.summary.worksheet_count
        )
    }
}

/// Result of [`analyze_workbook`](crate::analyze_workbook).
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookAnalysis {
    pub file_name: String,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

impl fmt::Display for WorkbookAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&AnalysisMarkdown::new(&self.file_name, &self.report), f)
    }
}

/// Result of [`write_file`](crate::write_file).
#[derive(Debug, Clone, Serialize)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub bytes: usize,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✅ Successfully wrote content to file: {}",
            self.path.display()
        )
    }
}
