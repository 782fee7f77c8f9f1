//! HTTP transport - stateless streamable-HTTP MCP endpoint.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` - health check returning `{ "name": ..., "status": "ok" }`.
//! - `POST /mcp` - one JSON-RPC message in, one JSON response out.
//!   Notifications are acknowledged with `202 Accepted` and no body.
//! - `GET /mcp`, `DELETE /mcp` - `405`; there are no sessions to stream
//!   to or tear down.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use zava_claims_mcp::mcp;
//!
//! let server = Arc::new(mcp::McpServer::new(tools, widgets));
//!
//! // Get the router to compose with other axum routes
//! let app = mcp::router(server.clone());
//!
//! // Or serve directly
//! mcp::serve(server, "0.0.0.0:3001").await?;
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use super::error::codes;
use super::protocol::{JsonRpcError, JsonRpcResponse, McpServer, SERVER_NAME};
use crate::table::TableStore;

/// Build an axum `Router` serving the MCP endpoint for the given server.
pub fn router<T: TableStore>(server: Arc<McpServer<T>>) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route(
            "/mcp",
            axum::routing::post(mcp_handler::<T>)
                .get(method_not_allowed)
                .delete(method_not_allowed),
        )
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Serve the MCP endpoint at the given address (e.g. `"0.0.0.0:3001"`)
/// until Ctrl-C.
pub async fn serve<T: TableStore>(
    server: Arc<McpServer<T>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(server);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "MCP endpoint listening on /mcp");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "could not listen for shutdown signal"),
    }
}

/// `GET /` - returns `{ "name": "zava-insurance-mcp", "status": "ok" }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "name": SERVER_NAME, "status": "ok" }))
}

/// `POST /mcp` - decode one JSON-RPC message and answer it.
async fn mcp_handler<T: TableStore>(
    State(server): State<Arc<McpServer<T>>>,
    body: Bytes,
) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            let error = JsonRpcError::new(codes::PARSE_ERROR, format!("Parse error: {e}"));
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::failure(Value::Null, error)),
            )
                .into_response();
        }
    };

    match server.handle_message(message).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// `GET /mcp` and `DELETE /mcp` - the endpoint keeps no sessions.
async fn method_not_allowed() -> Response {
    let error = JsonRpcError::new(codes::INVALID_REQUEST, "Method not allowed.");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(JsonRpcResponse::failure(Value::Null, error)),
    )
        .into_response()
}
