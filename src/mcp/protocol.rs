//! JSON-RPC 2.0 envelope and MCP method routing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::error::{codes, ToolError};
use super::service::ToolService;
use super::widget::WidgetCatalog;
use crate::table::TableStore;

/// Protocol revision announced when the client does not ask for one.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// Server name reported by `initialize` and the health route.
pub const SERVER_NAME: &str = "zava-insurance-mcp";

pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An incoming JSON-RPC message. Without an `id` it is a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<ToolError> for JsonRpcError {
    fn from(err: ToolError) -> Self {
        Self::new(err.rpc_code(), err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Routes MCP methods to the tool registry and the widget catalog.
///
/// Stateless: every message is handled on its own.
pub struct McpServer<T> {
    tools: ToolService<T>,
    widgets: WidgetCatalog,
}

impl<T: TableStore> McpServer<T> {
    pub fn new(tools: ToolService<T>, widgets: WidgetCatalog) -> Self {
        Self { tools, widgets }
    }

    pub fn tools(&self) -> &ToolService<T> {
        &self.tools
    }

    pub fn widgets(&self) -> &WidgetCatalog {
        &self.widgets
    }

    /// Handle one decoded JSON body.
    ///
    /// Anything that is not a request object is answered with an
    /// invalid-request error. Notifications produce no response.
    pub async fn handle_message(&self, message: Value) -> Option<JsonRpcResponse> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        if !message.is_object() {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(codes::INVALID_REQUEST, "expected a JSON-RPC request object"),
            ));
        }
        match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(codes::INVALID_REQUEST, format!("invalid request: {e}")),
            )),
        }
    }

    /// Handle one request.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc.as_deref() != Some("2.0") {
            return Some(JsonRpcResponse::failure(
                request.id.unwrap_or(Value::Null),
                JsonRpcError::new(codes::INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        let Some(id) = request.id else {
            debug!(method = %request.method, "notification received");
            return None;
        };

        debug!(method = %request.method, "request received");
        Some(match self.call(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => Ok(initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tools.definitions() })),
            "tools/call" => {
                let params: CallToolParams = decode_params(params)?;
                let output = self.tools.dispatch(&params.name, params.arguments).await?;
                serde_json::to_value(output)
                    .map_err(|e| JsonRpcError::new(codes::INTERNAL_ERROR, e.to_string()))
            }
            "resources/list" => Ok(json!({ "resources": self.widgets.resources() })),
            "resources/templates/list" => {
                Ok(json!({ "resourceTemplates": self.widgets.templates() }))
            }
            "resources/read" => {
                let params: ReadResourceParams = decode_params(params)?;
                self.widgets.read(&params.uri).await.ok_or_else(|| {
                    JsonRpcError::new(
                        codes::INVALID_PARAMS,
                        format!("Resource not found: {}", params.uri),
                    )
                })
            }
            other => Err(JsonRpcError::new(
                codes::METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        }
    }
}

fn initialize(params: &Value) -> Value {
    let version = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": {}, "resources": {} },
        "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
    })
}

fn decode_params<P: serde::de::DeserializeOwned>(params: Value) -> Result<P, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::new(codes::INVALID_PARAMS, format!("invalid params: {e}")))
}
