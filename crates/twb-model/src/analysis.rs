//! Workbook analysis and validation results.

use serde::{Deserialize, Serialize};

/// Version reported when the workbook root carries no `version` attribute.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Field names sharing the same first whitespace-delimited token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixCluster {
    pub prefix: String,
    /// Members in first-seen order. Always at least two.
    pub fields: Vec<String>,
}

/// Structural metadata collected from a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub workbook_version: String,
    /// Distinct `column` names in first-seen document order.
    pub fields: Vec<String>,
    /// Every non-empty `calculation` formula, duplicates kept.
    pub calculated_fields: Vec<String>,
    /// Distinct `worksheet` names in first-seen document order.
    pub worksheets: Vec<String>,
    /// Clusters in order of first prefix occurrence.
    pub clusters: Vec<PrefixCluster>,
}

impl AnalysisReport {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn cluster(&self, prefix: &str) -> Option<&PrefixCluster> {
        self.clusters.iter().find(|cluster| cluster.prefix == prefix)
    }
}

/// Coarse well-formedness facts about a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookSummary {
    pub version: String,
    pub datasource_count: usize,
    pub worksheet_count: usize,
}
