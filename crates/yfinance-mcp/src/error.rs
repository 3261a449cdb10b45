//! Error types for the MCP transport

use thiserror::Error;

/// Errors that stop the server loop
///
/// Failures inside a single request never surface here; they are answered
/// with a JSON-RPC error or an `isError` tool result instead.
#[derive(Error, Debug)]
pub enum McpError {
    /// Reading requests or writing responses failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A response could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response writer task panicked or was cancelled
    #[error("Writer task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
