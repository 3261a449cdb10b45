//! Tool trait definition

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use yfinance_data::DataValue;

use crate::error::{Result, ToolError};

/// Trait for tools exposed to calling agents
///
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as a plain mapping or sequence
    async fn execute(&self, params: Value) -> Result<DataValue>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the caller understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Schema for a tool taking a ticker and an optional period:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string", "title": "Ticker" },
    ///         "period": { "type": "string", "title": "Period", "default": "1mo" }
    ///     },
    ///     "required": ["ticker"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}

/// Decode tool arguments into a typed parameter struct
///
/// Missing arguments (`null`) decode like an empty object so that defaults
/// still apply.
pub fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    let params = if params.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}
