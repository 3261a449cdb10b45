//! Server identity reported during `initialize`

use serde::{Deserialize, Serialize};

/// Default server name
pub const DEFAULT_SERVER_NAME: &str = "yfinance MCP Server";

/// Default instructions handed to clients
pub const DEFAULT_INSTRUCTIONS: &str = "Provides a set of tools to interact with Yahoo Finance API \
     through yfinance to retrieve stock market data.";

/// Server configuration
///
/// # Example
///
/// ```
/// use yfinance_mcp::ServerConfig;
///
/// let config = ServerConfig::default().with_name("market-data");
/// assert_eq!(config.name, "market-data");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Name reported in `serverInfo`
    pub name: String,

    /// Version reported in `serverInfo`
    pub version: String,

    /// Usage hint returned from `initialize`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Some(DEFAULT_INSTRUCTIONS.to_string()),
        }
    }
}

impl ServerConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn without_instructions(mut self) -> Self {
        self.instructions = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.name, "yfinance MCP Server");
        assert_eq!(config.version, "0.1.0");
        assert!(config.instructions.unwrap().contains("Yahoo Finance"));
    }

    #[test]
    fn test_setters() {
        let config = ServerConfig::default()
            .with_name("custom")
            .with_version("9.9.9")
            .without_instructions();

        assert_eq!(config.name, "custom");
        assert_eq!(config.version, "9.9.9");
        assert!(config.instructions.is_none());
    }

    #[test]
    fn test_deserialize_without_instructions() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"name": "x", "version": "1.0.0"}"#).unwrap();
        assert_eq!(config.instructions, None);
    }
}
