//! yfinance MCP server binary

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use yfinance_data::{ArcFinanceProvider, YahooProvider};
use yfinance_mcp::config::DEFAULT_INSTRUCTIONS;
use yfinance_mcp::{McpServer, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "yfinance-mcp-server", version)]
#[command(about = DEFAULT_INSTRUCTIONS, long_about = None)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _args = Args::parse();

    // Stdout is the protocol channel; logs go to stderr
    yfinance_utils::init_tracing();

    let provider: ArcFinanceProvider =
        Arc::new(YahooProvider::new().context("Failed to create Yahoo Finance provider")?);
    let registry = yfinance_tools::finance_registry(&provider);

    info!("Starting yfinance MCP server with {} tools", registry.len());

    McpServer::new(ServerConfig::default(), Arc::new(registry))
        .serve_stdio()
        .await
        .context("MCP transport failed")?;

    Ok(())
}
