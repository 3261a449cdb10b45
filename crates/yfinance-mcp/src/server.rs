//! Stdio transport MCP server
//!
//! Reads newline-delimited JSON-RPC 2.0 messages, answers each request from a
//! spawned task and funnels every response through a single writer task, so
//! one slow tool call never blocks the others.

use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use yfinance_data::DataValue;
use yfinance_tools::{ToolError, ToolRegistry};

use crate::Result;
use crate::config::ServerConfig;
use crate::protocol::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities,
    ToolDefinition, negotiate_protocol_version,
};

type MethodResult = std::result::Result<Value, JsonRpcError>;

/// MCP server exposing the tools of a [`ToolRegistry`]
#[derive(Clone)]
pub struct McpServer {
    config: ServerConfig,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(config: ServerConfig, registry: Arc<ToolRegistry>) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process's stdin and stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one connection until the reader reaches end of input
    ///
    /// A line that is not UTF-8 is answered with a parse error like any other
    /// malformed message. Requests still in flight when input ends are
    /// answered before this returns.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!(
            "Serving {} v{} ({} tools)",
            self.config.name,
            self.config.version,
            self.registry.len()
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_responses(writer, rx));

        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            if tx.is_closed() {
                warn!("Response writer closed, no longer reading requests");
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => line.to_string(),
                Err(e) => {
                    warn!("Message is not valid UTF-8: {}", e);
                    let response = JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e));
                    if tx.send(response).is_err() {
                        warn!("Dropping response, writer is closed");
                    }
                    continue;
                }
            };

            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    if tx.send(response).is_err() {
                        warn!("Dropping response, writer is closed");
                    }
                }
            });
        }

        debug!("Input closed, waiting for in-flight requests");
        drop(tx);
        writer_task.await??;

        info!("MCP server stopped");
        Ok(())
    }

    /// Answer one raw message
    ///
    /// Returns `None` for notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(e),
                ));
            }
        };

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(e),
                ));
            }
        };

        let Some(id) = request.id.clone() else {
            debug!("Received notification: {}", request.method);
            return None;
        };

        debug!("Handling request: {}", request.method);
        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Value) -> MethodResult {
        match method {
            "initialize" => self.initialize(params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: Value) -> MethodResult {
        let params: InitializeParams = if params.is_null() {
            InitializeParams::default()
        } else {
            serde_json::from_value(params)
                .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?
        };
        let protocol_version = negotiate_protocol_version(params.protocol_version.as_deref());
        info!("Client initialized with protocol {}", protocol_version);

        to_result(&InitializeResult {
            protocol_version: protocol_version.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: Implementation {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
            instructions: self.config.instructions.clone(),
        })
    }

    fn list_tools(&self) -> MethodResult {
        let tools = self
            .registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect();

        to_result(&ListToolsResult { tools })
    }

    async fn call_tool(&self, params: Value) -> MethodResult {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")))?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = params
            .arguments
            .unwrap_or_else(|| Value::Object(Map::new()));

        debug!("Calling tool: {}", params.name);
        let result = match tool.execute(arguments).await {
            Ok(output) => tool_output(output).map_err(JsonRpcError::internal_error)?,
            Err(ToolError::InvalidParameters(message)) => {
                return Err(JsonRpcError::invalid_params(message));
            }
            Err(e) => {
                warn!("Tool {} failed: {}", params.name, e);
                CallToolResult::error(e.to_string())
            }
        };

        to_result(&result)
    }
}

fn to_result<T: Serialize>(value: &T) -> MethodResult {
    serde_json::to_value(value).map_err(JsonRpcError::internal_error)
}

/// Text block and structured content carry the same value, keys in output order
fn tool_output(output: DataValue) -> serde_json::Result<CallToolResult> {
    let text = serde_json::to_string(&output)?;
    Ok(CallToolResult::success(text, output.into_json()))
}

async fn write_responses<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{INVALID_PARAMS, LATEST_PROTOCOL_VERSION, METHOD_NOT_FOUND, PARSE_ERROR};
    use async_trait::async_trait;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use yfinance_data::{ProviderError, Record};
    use yfinance_tools::Tool;

    /// Echoes a fixed history-like output, or fails like an unknown symbol
    struct HistoryStub;

    #[async_trait]
    impl Tool for HistoryStub {
        async fn execute(&self, params: Value) -> yfinance_tools::Result<DataValue> {
            let ticker = params["ticker"]
                .as_str()
                .ok_or_else(|| ToolError::InvalidParameters("missing field `ticker`".into()))?;
            if ticker == "NOTREAL" {
                return Err(ProviderError::SymbolNotFound(ticker.to_string()).into());
            }
            Ok(DataValue::List(vec![
                Record::new()
                    .with("Date", "2024-01-02")
                    .with("Open", 187.15)
                    .with("Close", 185.64)
                    .into(),
                Record::new()
                    .with("Date", "2024-01-03")
                    .with("Open", 184.22)
                    .with("Close", 184.25)
                    .into(),
            ]))
        }

        fn name(&self) -> &str {
            "get_history"
        }

        fn description(&self) -> &str {
            "Get historical stock price data."
        }

        fn input_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"ticker": {"type": "string", "title": "Ticker"}},
                "required": ["ticker"]
            })
        }
    }

    struct InfoStub;

    #[async_trait]
    impl Tool for InfoStub {
        async fn execute(&self, _params: Value) -> yfinance_tools::Result<DataValue> {
            Ok(Record::new().with("longName", "Apple Inc.").into())
        }

        fn name(&self) -> &str {
            "get_company_info"
        }

        fn description(&self) -> &str {
            "Company info."
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {}, "required": []})
        }
    }

    fn server() -> McpServer {
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(HistoryStub))
            .with_tool(Arc::new(InfoStub));
        McpServer::new(ServerConfig::default(), Arc::new(registry))
    }

    async fn request(server: &McpServer, message: Value) -> JsonRpcResponse {
        server
            .handle_message(&message.to_string())
            .await
            .expect("requests get a response")
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = request(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "test", "version": "0.0.1"}
                }
            }),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(response.id, json!(1));
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(result["serverInfo"]["name"], "yfinance MCP Server");
        assert_eq!(result["serverInfo"]["version"], "0.1.0");
        assert!(result["instructions"].as_str().unwrap().contains("Yahoo Finance"));
    }

    #[tokio::test]
    async fn test_initialize_unknown_version_gets_latest() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": "a", "method": "initialize",
                   "params": {"protocolVersion": "2000-01-01"}}),
        )
        .await;

        assert_eq!(response.result.unwrap()["protocolVersion"], LATEST_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server();
        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","method":"tools/list"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let response =
            request(&server(), json!({"jsonrpc": "2.0", "id": 7, "method": "ping"})).await;
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_list_in_registration_order() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        )
        .await;

        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools[0]["name"], "get_history");
        assert_eq!(tools[1]["name"], "get_company_info");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["ticker"]));
        assert_eq!(tools[0]["description"], "Get historical stock price data.");
    }

    #[tokio::test]
    async fn test_tools_call_list_output() {
        let response = request(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "get_history",
                           "arguments": {"ticker": "AAPL", "period": "5d", "interval": "1d"}}
            }),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);

        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with(r#"[{"Date":"2024-01-02","Open":187.15,"Close":185.64}"#));

        let rows = result["structuredContent"]["result"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["Date"], "2024-01-03");
    }

    #[tokio::test]
    async fn test_tools_call_structured_content_keeps_key_order() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "get_history", "arguments": {"ticker": "AAPL"}}}),
        )
        .await;

        let result = response.result.unwrap();
        let first_row = result["structuredContent"]["result"][0].as_object().unwrap();
        assert_eq!(first_row.keys().collect::<Vec<_>>(), vec!["Date", "Open", "Close"]);

        let line = serde_json::to_string(&result["structuredContent"]).unwrap();
        assert!(line.starts_with(r#"{"result":[{"Date":"2024-01-02","Open":187.15,"Close":185.64}"#));
    }

    #[tokio::test]
    async fn test_tools_call_mapping_output_is_structured_as_is() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "get_company_info", "arguments": {"ticker": "AAPL"}}}),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["structuredContent"], json!({"longName": "Apple Inc."}));
    }

    #[tokio::test]
    async fn test_tool_failure_is_reported_in_band() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call",
                   "params": {"name": "get_history", "arguments": {"ticker": "NOTREAL"}}}),
        )
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Symbol not found: NOTREAL");
    }

    #[tokio::test]
    async fn test_tools_call_invalid_arguments() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call",
                   "params": {"name": "get_history"}}),
        )
        .await;

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call",
                   "params": {"name": "get_weather", "arguments": {}}}),
        )
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert_eq!(error.message, "Unknown tool: get_weather");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = request(
            &server(),
            json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"}),
        )
        .await;

        assert_eq!(response.id, json!(9));
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle_message("{not json").await.unwrap();

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_serve_over_duplex() {
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let (client_read, mut client_write) = tokio::io::split(client);

        let server = server();
        let serving = tokio::spawn(async move { server.serve(server_read, server_write).await });

        let messages = [
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2025-06-18"}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "get_history", "arguments": {"ticker": "AAPL"}}}),
        ];
        for message in messages {
            client_write
                .write_all(format!("{message}\n").as_bytes())
                .await
                .unwrap();
        }
        client_write.shutdown().await.unwrap();

        let mut lines = BufReader::new(client_read).lines();
        let mut responses = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            responses.push(serde_json::from_str::<JsonRpcResponse>(&line).unwrap());
        }

        serving.await.unwrap().unwrap();

        let mut ids: Vec<_> = responses
            .iter()
            .map(|response| response.id.as_i64().unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(responses.iter().all(|response| response.error.is_none()));
    }

    #[tokio::test]
    async fn test_serve_survives_invalid_utf8_line() {
        let (client, server_io) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server_io);
        let (client_read, mut client_write) = tokio::io::split(client);

        let server = server();
        let serving = tokio::spawn(async move { server.serve(server_read, server_write).await });

        client_write.write_all(b"\xff\xfe\n").await.unwrap();
        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n")
            .await
            .unwrap();
        client_write.shutdown().await.unwrap();

        let mut lines = BufReader::new(client_read).lines();
        let mut responses = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            responses.push(serde_json::from_str::<JsonRpcResponse>(&line).unwrap());
        }

        serving.await.unwrap().unwrap();

        assert_eq!(responses.len(), 2);
        let parse_error = responses.iter().find(|r| r.id.is_null()).unwrap();
        assert_eq!(parse_error.error.as_ref().unwrap().code, PARSE_ERROR);

        let ping = responses.iter().find(|r| r.id == json!(7)).unwrap();
        assert_eq!(ping.result, Some(json!({})));
    }
}
