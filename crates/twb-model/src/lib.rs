//! Data model shared by the Tableau dimension mapper crates.
//!
//! Two families of types live here:
//!
//! - mapping types ([`MappingRule`], [`MappingSet`], [`ReplacementReport`])
//!   produced by the mapping loader and consumed by the remap engine;
//! - workbook types ([`AnalysisReport`], [`PrefixCluster`], [`WorkbookSummary`])
//!   produced by the structural analyzer and validator.

pub mod analysis;
pub mod mapping;

pub use analysis::{AnalysisReport, PrefixCluster, UNKNOWN_VERSION, WorkbookSummary};
pub use mapping::{MappingRule, MappingSet, ReplacementReport, RuleOutcome};
