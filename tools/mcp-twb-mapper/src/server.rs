//! MCP tool surface over the `twb-core` operations.

use std::fmt;
use std::path::PathBuf;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
        ToolsCapability,
    },
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::warn;

use twb_core::{
    OperationError, analyze_workbook, load_mapping_preview, remap, validate_mapping,
    validate_workbook, write_file,
};

const INSTRUCTIONS: &str = "Tableau dimension mapper. Renames dimensions and fields in \
    Tableau workbooks (.twb) using a two-column CSV of original,new names. \
    Typical workflow: validate_tableau_workbook, then analyze_workbook to see the fields, \
    worksheets and naming patterns, then write_file (or extract_toml_mappings followed by \
    write_file) to produce a mapping CSV, validate_mapping_file, and finally \
    remap_dimensions. Mapping rules are applied in file order and each rule sees the \
    output of the previous one.";

// Parameter structs for tools

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemapDimensionsParams {
    /// Path to the CSV mapping file containing the dimension mappings
    pub mapping_file_path: PathBuf,
    /// Path to the Tableau workbook file (.twb) to modify
    pub workbook_file_path: PathBuf,
    /// Path where the modified workbook file should be saved
    pub output_file_path: PathBuf,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractTomlMappingsParams {
    /// Path to the TOML configuration file to analyze
    pub toml_file_path: PathBuf,
    /// Path where the CSV mapping file should be saved
    pub output_csv_path: PathBuf,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MappingFileParams {
    /// Path to the CSV mapping file to validate
    pub mapping_file_path: PathBuf,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WorkbookFileParams {
    /// Path to the Tableau workbook file (.twb)
    pub workbook_file_path: PathBuf,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    /// Path where the file should be written
    pub file_path: PathBuf,
    /// Content to write to the file
    pub content: String,
}

/// Tableau Dimension Mapper MCP Server
#[derive(Clone)]
pub struct TwbMapperServer {
    tool_router: ToolRouter<Self>,
}

impl Default for TwbMapperServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TwbMapperServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Remap dimensions in a Tableau workbook using a CSV mapping file. Every occurrence of each original name is replaced with the new name, rule by rule in file order, and the result is saved to a new workbook file. Returns the number of replacements per rule."
    )]
    pub async fn remap_dimensions(
        &self,
        params: Parameters<RemapDimensionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let RemapDimensionsParams {
            mapping_file_path,
            workbook_file_path,
            output_file_path,
        } = params.0;
        run_blocking(move || remap(&mapping_file_path, &workbook_file_path, &output_file_path))
            .await
    }

    #[tool(
        description = "Read a TOML configuration file that contains dimension renames (for example a [columns.other_renames] table) and return its raw text. Turn each `original = \"new\"` pair into a CSV line `original,new` without headers, quotes or trailing whitespace, then save it to output_csv_path with write_file."
    )]
    pub async fn extract_toml_mappings(
        &self,
        params: Parameters<ExtractTomlMappingsParams>,
    ) -> Result<CallToolResult, McpError> {
        let ExtractTomlMappingsParams {
            toml_file_path,
            output_csv_path,
        } = params.0;
        if output_csv_path.as_os_str().is_empty() {
            return tool_result::<String>(Err(OperationError::MissingArgument {
                name: "output_csv_path",
            }));
        }
        run_blocking(move || load_mapping_preview(&toml_file_path)).await
    }

    #[tool(
        description = "Validate a CSV mapping file. Each line must have at least two columns: the original field name and the new field name. Returns the mappings the file contains."
    )]
    pub async fn validate_mapping_file(
        &self,
        params: Parameters<MappingFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let MappingFileParams { mapping_file_path } = params.0;
        run_blocking(move || validate_mapping(&mapping_file_path)).await
    }

    #[tool(
        description = "Validate that a file is a well-formed Tableau workbook (.twb). Returns the workbook version and the number of datasources and worksheets."
    )]
    pub async fn validate_tableau_workbook(
        &self,
        params: Parameters<WorkbookFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let WorkbookFileParams { workbook_file_path } = params.0;
        run_blocking(move || validate_workbook(&workbook_file_path)).await
    }

    #[tool(
        description = "Analyze a Tableau workbook before remapping. Returns a markdown report of field names, calculated field formulas, worksheets and groups of fields sharing a leading word."
    )]
    pub async fn analyze_workbook(
        &self,
        params: Parameters<WorkbookFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let WorkbookFileParams { workbook_file_path } = params.0;
        run_blocking(move || analyze_workbook(&workbook_file_path)).await
    }

    #[tool(
        description = "Write text content to a file, creating parent directories as needed. Use it to save a mapping CSV built from a workbook analysis."
    )]
    pub async fn write_file(
        &self,
        params: Parameters<WriteFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let WriteFileParams { file_path, content } = params.0;
        run_blocking(move || write_file(&file_path, &content)).await
    }
}

#[tool_handler]
impl ServerHandler for TwbMapperServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "tableau-dimension-mapper".to_string(),
                title: Some("Tableau Dimension Mapper".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run a file-bound operation off the async runtime.
async fn run_blocking<T, F>(operation: F) -> Result<CallToolResult, McpError>
where
    F: FnOnce() -> Result<T, OperationError> + Send + 'static,
    T: fmt::Display + Send + 'static,
{
    let result = tokio::task::spawn_blocking(operation)
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    tool_result(result)
}

/// Convert an operation result into a tool response.
///
/// Missing arguments are protocol errors; every other failure is reported to
/// the client as an error message in the tool output.
pub fn tool_result<T: fmt::Display>(
    result: Result<T, OperationError>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(outcome) => Ok(CallToolResult::success(vec![Content::text(
            outcome.to_string(),
        )])),
        Err(error) if error.is_hard() => Err(McpError::invalid_params(error.to_string(), None)),
        Err(error) => {
            warn!(%error, "tool call failed");
            Ok(CallToolResult::error(vec![Content::text(
                error.user_message(),
            )]))
        }
    }
}
