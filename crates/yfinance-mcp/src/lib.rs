//! Model Context Protocol (MCP) server for yfinance-mcp
//!
//! Serves the tools of a [`ToolRegistry`](yfinance_tools::ToolRegistry) to an
//! MCP client over newline-delimited JSON-RPC 2.0 on stdio.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use yfinance_data::{ArcFinanceProvider, YahooProvider};
//! use yfinance_mcp::{McpServer, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider: ArcFinanceProvider = Arc::new(YahooProvider::new()?);
//! let registry = yfinance_tools::finance_registry(&provider);
//!
//! McpServer::new(ServerConfig::default(), Arc::new(registry))
//!     .serve_stdio()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;

pub use config::ServerConfig;
pub use error::McpError;
pub use server::McpServer;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;
