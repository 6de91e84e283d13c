//! Tableau Dimension Mapper MCP Server
//!
//! Serves the dimension remapping tools over the stdio transport.

use mcp_twb_mapper::TwbMapperServer;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "mcp_twb_mapper=info,twb_core=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Starting Tableau Dimension Mapper MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let running = TwbMapperServer::new().serve(stdio()).await?;

    tracing::info!("Server ready, waiting for requests on stdio...");

    running.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
