//! Tableau Dimension Mapper MCP Server Library
//!
//! Exposes the workbook operations of `twb-core` as MCP tools:
//! - remap_dimensions
//! - extract_toml_mappings
//! - validate_mapping_file
//! - validate_tableau_workbook
//! - analyze_workbook
//! - write_file

pub mod server;

pub use server::TwbMapperServer;
