//! Markdown rendering of an [`AnalysisReport`].

use std::fmt;

use twb_model::AnalysisReport;

/// Human-readable analysis report for a named workbook file.
///
/// Fields and worksheets are listed alphabetically, formulas and clusters in
/// document order.
pub struct AnalysisMarkdown<'a> {
    pub file_name: &'a str,
    pub report: &'a AnalysisReport,
}

impl<'a> AnalysisMarkdown<'a> {
    pub fn new(file_name: &'a str, report: &'a AnalysisReport) -> Self {
        Self { file_name, report }
    }
}

impl fmt::Display for AnalysisMarkdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "# Tableau Workbook Analysis")?;
        writeln!(f)?;
        writeln!(f, "## Overview")?;
        writeln!(f, "- **File:** {}", self.file_name)?;
        writeln!(f, "- **Version:** {}", report.workbook_version)?;
        writeln!(f, "- **Worksheets:** {}", report.worksheet_count())?;
        writeln!(f, "- **Fields:** {}", report.field_count())?;
        writeln!(f)?;

        writeln!(f, "## Fields Found")?;
        if report.fields.is_empty() {
            writeln!(f, "No fields were found in the workbook.")?;
        } else {
            writeln!(f, "The following fields were found in the workbook:")?;
            writeln!(f)?;
            for field in sorted(&report.fields) {
                writeln!(f, "- `{field}`")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Worksheets")?;
        if report.worksheets.is_empty() {
            writeln!(f, "No worksheets were found in the workbook.")?;
        } else {
            for worksheet in sorted(&report.worksheets) {
                writeln!(f, "- {worksheet}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Calculated Fields")?;
        if report.calculated_fields.is_empty() {
            writeln!(f, "No calculated fields were found in the workbook.")?;
        } else {
            writeln!(
                f,
                "{} calculated field formulas were found:",
                report.calculated_fields.len()
            )?;
            writeln!(f)?;
            for formula in &report.calculated_fields {
                writeln!(f, "- `{formula}`")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "## Potential Naming Patterns")?;
        if report.clusters.is_empty() {
            return writeln!(f, "No clear naming patterns were detected.");
        }
        writeln!(f, "The following potential naming patterns were detected:")?;
        for cluster in &report.clusters {
            writeln!(f)?;
            writeln!(f, "### Fields with prefix '{}':", cluster.prefix)?;
            for field in &cluster.fields {
                writeln!(f, "- `{field}`")?;
            }
        }
        Ok(())
    }
}

fn sorted(values: &[String]) -> Vec<&str> {
    let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
}
