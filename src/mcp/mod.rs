//! mcp - Convention-based MCP tool server.
//!
//! Build a server by registering tool handlers on a `ToolService`. Each
//! handler receives a `ToolContext<T>` with the call's arguments and the
//! entity store, and resolves to a `ToolOutput`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use zava_claims_mcp::mcp::{self, McpServer, ToolService, WidgetCatalog};
//! use zava_claims_mcp::store::EntityStore;
//! use zava_claims_mcp::table::InMemoryTableStore;
//!
//! let store = EntityStore::new(InMemoryTableStore::new());
//! let tools = zava_claims_mcp::register_tools!(
//!     ToolService::new(store),
//!     tools::show_claim_detail,
//!     tools::list_inspectors,
//! );
//!
//! let server = Arc::new(McpServer::new(tools, WidgetCatalog::new("assets")));
//!
//! // HTTP transport (requires "http" feature)
//! mcp::serve(server, "0.0.0.0:3001").await?;
//! ```
//!
//! ## Tool Convention
//!
//! Each tool file follows this convention:
//!
//! ```ignore
//! // src/tools/get_claim_summary.rs
//!
//! pub const NAME: &str = "get-claim-summary";
//!
//! pub fn definition() -> ToolDefinition { /* title, description, schema */ }
//!
//! pub fn guard<T>(ctx: &ToolContext<T>) -> bool {
//!     ctx.has_field("claimId")
//! }
//!
//! pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
//!     let input = ctx.input::<Input>()?;
//!     // ...
//! }
//! ```

mod context;
mod error;
mod protocol;
mod service;
mod tool;
pub mod widget;

pub use context::ToolContext;
pub use error::{codes, ToolError};
pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, PROTOCOL_VERSION, SERVER_NAME,
    SERVER_VERSION,
};
pub use service::{HandlerFuture, ToolService};
pub use tool::{Content, ToolAnnotations, ToolDefinition, ToolOutput};
pub use widget::{Widget, WidgetCatalog};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register tool modules with a service using the convention pattern.
///
/// Each tool module must export:
/// - `definition() -> ToolDefinition` - the catalog entry
/// - `guard(ctx) -> bool` - required-argument check
/// - `async handle(ctx) -> Result<ToolOutput, ToolError>` - the handler
///
/// # Example
/// ```ignore
/// let service = zava_claims_mcp::register_tools!(
///     mcp::ToolService::new(store),
///     tools::update_claim_status,
///     tools::update_inspection,
/// );
/// ```
#[macro_export]
macro_rules! register_tools {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .tool_guarded(
                $($seg)::+::definition(),
                $($seg)::+::guard,
                |ctx| -> $crate::mcp::HandlerFuture { ::std::boxed::Box::pin($($seg)::+::handle(ctx)) },
            )
        )+
    };
}
