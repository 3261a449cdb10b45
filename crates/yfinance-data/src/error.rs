//! Error types for provider operations

use thiserror::Error;

/// Upstream accessor failure
///
/// Every way a provider call can fail. Tools never translate these; they reach
/// the protocol runtime as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP client could not be built
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Chart connector error
    #[error("Yahoo Finance error: {0}")]
    Connector(#[from] yahoo_finance_api::YahooError),

    /// Profile, fundamentals or options client error
    #[error("Yahoo Finance error: {0}")]
    Client(#[from] yfinance_rs::YfError),

    /// Provider does not know the symbol
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Requested option expiration is not listed for the symbol
    #[error("Expiration `{expiration}` cannot be found. Available expirations are: [{}]", .available.join(", "))]
    ExpirationNotFound {
        expiration: String,
        available: Vec<String>,
    },
}

impl ProviderError {
    /// Map a client error for `symbol`, reporting unknown symbols as such
    pub fn from_client(err: yfinance_rs::YfError, symbol: &str) -> Self {
        match err {
            yfinance_rs::YfError::NotFound { .. } => Self::SymbolNotFound(symbol.to_string()),
            other => Self::Client(other),
        }
    }
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::SymbolNotFound("NOPE".to_string());
        assert_eq!(err.to_string(), "Symbol not found: NOPE");
    }

    #[test]
    fn test_expiration_not_found_lists_available() {
        let err = ProviderError::ExpirationNotFound {
            expiration: "2030-01-01".to_string(),
            available: vec!["2025-07-03".to_string(), "2025-07-11".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Expiration `2030-01-01` cannot be found. Available expirations are: [2025-07-03, 2025-07-11]"
        );
    }
}
