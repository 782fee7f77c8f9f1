//! Error types for tool handlers.

use thiserror::Error;

use crate::store::StoreError;

/// JSON-RPC error codes used by the MCP endpoint.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Error type for tool invocations.
///
/// Business-level misses (an unknown claim id) are not errors; handlers
/// answer them with a text result. These variants fail the invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool registered under this name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Required arguments are missing.
    #[error("missing required arguments for tool: {0}")]
    GuardRejected(String),
    /// Arguments did not deserialize into the tool's input type.
    #[error("invalid arguments: {0}")]
    DecodeFailed(String),
    /// The entity store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::DecodeFailed(err.to_string())
    }
}

impl ToolError {
    /// Map this error to a JSON-RPC error code.
    pub fn rpc_code(&self) -> i64 {
        match self {
            ToolError::UnknownTool(_) => codes::INVALID_PARAMS,
            ToolError::GuardRejected(_) => codes::INVALID_PARAMS,
            ToolError::DecodeFailed(_) => codes::INVALID_PARAMS,
            ToolError::Store(_) => codes::INTERNAL_ERROR,
        }
    }
}
