//! Serper MCP Server
//!
//! Google search through the Serper API.
//!
//! # Configuration
//! Set `SERPER_API_KEY` (env or `.env`) or configure in `~/.binks/serper.toml`

use rmcp::{transport::stdio, ServiceExt};

use serper_mcp::{Config, SerperMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mcp_common::init_tracing("serper_mcp")?;

    tracing::info!("Starting Serper MCP Server");

    let config = Config::load()?;
    tracing::info!("Serper base URL: {}", config.serper.base_url);
    if !config.serper.has_api_key() {
        tracing::warn!("SERPER_API_KEY is not set; upstream will reject requests");
    }
    tracing::debug!("Gemini key configured: {}", config.gemini.api_key.is_some());

    let server = SerperMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
