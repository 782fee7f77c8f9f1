//! ToolService - tool handler registry and dispatch.
//!
//! `ToolService<T>` holds an entity store and a set of named tool handlers.
//! Each handler receives a `ToolContext<T>` and resolves to
//! `Result<ToolOutput, ToolError>`.
//!
//! ## Example
//!
//! ```ignore
//! use zava_claims_mcp::mcp::{ToolDefinition, ToolOutput, ToolService};
//! use serde_json::json;
//!
//! let service = ToolService::new(store).tool(
//!     ToolDefinition::new("ping", "Ping", "Answer pong.", json!({ "type": "object" })),
//!     |_ctx| Box::pin(async { Ok(ToolOutput::text("pong")) }),
//! );
//!
//! let output = service.dispatch("ping", json!({})).await?;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::context::ToolContext;
use super::error::ToolError;
use super::tool::{ToolDefinition, ToolOutput};
use crate::store::EntityStore;
use crate::table::TableStore;

/// The boxed future every tool handler returns.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<ToolOutput, ToolError>> + Send>>;

type Guard<T> = Box<dyn Fn(&ToolContext<T>) -> bool + Send + Sync>;
type Handler<T> = Box<dyn Fn(ToolContext<T>) -> HandlerFuture + Send + Sync>;

/// A registered tool with optional guard.
struct ToolHandler<T> {
    definition: ToolDefinition,
    guard: Option<Guard<T>>,
    handle: Handler<T>,
}

/// Routes tool invocations to handler functions.
///
/// Generic over `T`, the table backend. Handlers reach the collections
/// through `ctx.store()`.
pub struct ToolService<T> {
    store: EntityStore<T>,
    handlers: HashMap<String, ToolHandler<T>>,
    order: Vec<String>,
}

impl<T: TableStore> ToolService<T> {
    /// Create a new service over the given store.
    pub fn new(store: EntityStore<T>) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool handler.
    pub fn tool<F>(self, definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(ToolContext<T>) -> HandlerFuture + Send + Sync + 'static,
    {
        self.insert(ToolHandler {
            definition,
            guard: None,
            handle: Box::new(handler),
        })
    }

    /// Register a tool handler with a guard function.
    ///
    /// The guard runs before the handler. If it returns `false`, the call is
    /// rejected with `ToolError::GuardRejected`.
    pub fn tool_guarded<G, F>(self, definition: ToolDefinition, guard: G, handler: F) -> Self
    where
        G: Fn(&ToolContext<T>) -> bool + Send + Sync + 'static,
        F: Fn(ToolContext<T>) -> HandlerFuture + Send + Sync + 'static,
    {
        self.insert(ToolHandler {
            definition,
            guard: Some(Box::new(guard)),
            handle: Box::new(handler),
        })
    }

    fn insert(mut self, handler: ToolHandler<T>) -> Self {
        let name = handler.definition.name.clone();
        if self.handlers.insert(name.clone(), handler).is_none() {
            self.order.push(name);
        }
        self
    }

    /// Invoke a tool by name.
    ///
    /// Missing or null arguments are treated as an empty object.
    pub async fn dispatch(&self, name: &str, input: Value) -> Result<ToolOutput, ToolError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let input = match input {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        let ctx = ToolContext::new(name.to_string(), input, self.store.clone());

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(ToolError::GuardRejected(name.to_string()));
            }
        }

        debug!(tool = name, "dispatching tool call");
        let result = (handler.handle)(ctx).await;
        if let Err(e) = &result {
            warn!(tool = name, error = %e, "tool call failed");
        }
        result
    }

    /// Catalog entries in registration order.
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.handlers.get(name))
            .map(|handler| &handler.definition)
            .collect()
    }

    /// Registered tool names in registration order.
    pub fn tools(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Get a reference to the entity store.
    pub fn store(&self) -> &EntityStore<T> {
        &self.store
    }
}
