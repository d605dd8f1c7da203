//! stdio protocol host: a JSON-RPC 2.0 loop speaking the Model Context
//! Protocol (revision 2024-11-05). Requests arrive one per line on
//! stdin; responses leave as single-line JSON on stdout. Logging stays
//! on stderr so the wire channel carries nothing but protocol frames.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::tools::ToolRegistry;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "zendesk-mcp";

const PARSE_ERROR: i64 = -32700;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve requests from stdin until EOF.
    pub async fn run(&self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!(tools = self.registry.len(), "MCP server listening on stdio");

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(line).await {
                let mut frame = serde_json::to_string(&response)
                    .unwrap_or_else(|_| r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#.into());
                frame.push('\n');
                stdout.write_all(frame.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(err) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {err}"),
                ));
            }
        };
        self.handle_request(request).await
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "request");

        let outcome = match request.method.as_str() {
            "initialize" => Ok(initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(&request.params).await,
            "resources/list" => Ok(json!({"resources": []})),
            "resources/read" => {
                let uri = request
                    .params
                    .get("uri")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Err((INVALID_PARAMS, format!("Resource not found: {uri}")))
            }
            method if method.starts_with("notifications/") => return None,
            method => Err((METHOD_NOT_FOUND, format!("Method not found: {method}"))),
        };

        // Notifications never get a response, success or failure.
        let id = request.id?;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err((code, message)) => JsonRpcResponse::failure(id, code, message),
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .tools()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                })
            })
            .collect();
        json!({"tools": tools})
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, (i64, String)> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or((INVALID_PARAMS, "Missing tool name".to_string()))?;
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        match self.registry.call(name, args).await {
            Some(result) => Ok(result),
            None => Err((METHOD_NOT_FOUND, format!("Unknown tool: {name}"))),
        }
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Tool, ToolRegistry};

    fn test_server() -> McpServer {
        let mut registry = ToolRegistry::empty();
        registry.register(Tool::new(
            "echo",
            "Echo the arguments back",
            json!({"type": "object", "properties": {}}),
            |args| async move { Ok(args) },
        ));
        McpServer::new(registry)
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .expect("requests get responses");

        let result = response.result.expect("success");
        assert_eq!(result["protocolVersion"], json!(PROTOCOL_VERSION));
        assert_eq!(result["serverInfo"]["name"], json!(SERVER_NAME));
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .expect("requests get responses");

        let tools = response.result.expect("success")["tools"].clone();
        assert_eq!(tools[0]["name"], json!("echo"));
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_dispatches() {
        let server = test_server();
        let response = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo","arguments":{"a":1}}}"#,
            )
            .await
            .expect("requests get responses");

        let result = response.result.expect("success");
        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_method_not_found() {
        let server = test_server();
        let response = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope"}}"#,
            )
            .await
            .expect("requests get responses");

        let error = response.error.expect("failure");
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"bogus/thing"}"#)
            .await
            .expect("requests get responses");

        assert_eq!(response.error.expect("failure").code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = test_server();
        let response = server.handle_line("{not json").await.expect("parse errors respond");
        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.expect("failure").code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_notifications_are_silent() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_resources_list_is_empty() {
        let server = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#)
            .await
            .expect("requests get responses");
        assert_eq!(response.result.expect("success"), json!({"resources": []}));
    }
}
