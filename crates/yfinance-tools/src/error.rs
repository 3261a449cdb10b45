//! Error types for tool execution

use thiserror::Error;
use yfinance_data::ProviderError;

/// Errors returned by [`Tool::execute`](crate::Tool::execute)
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The provider call failed; its message is passed through untouched
    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
