//! Context passed to tool handlers.
//!
//! Carries the invocation's arguments and the entity store. Every
//! invocation gets a fresh context; nothing survives between calls.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ToolError;
use crate::store::EntityStore;

/// The context passed to every tool handler.
///
/// Owns its arguments and a handle to the store so handler futures are
/// `'static` and can run on any runtime thread.
///
/// ## Example
///
/// ```ignore
/// pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
///     let input = ctx.input::<Input>()?;
///     let claim = ctx.store().get_by_key::<ClaimRecord>(&input.claim_id).await?;
///     // ...
/// }
/// ```
pub struct ToolContext<T> {
    tool_name: String,
    input: Value,
    store: EntityStore<T>,
}

impl<T> ToolContext<T> {
    pub(crate) fn new(tool_name: String, input: Value, store: EntityStore<T>) -> Self {
        Self {
            tool_name,
            input,
            store,
        }
    }

    /// Deserialize the arguments into a typed struct.
    pub fn input<I: DeserializeOwned>(&self) -> Result<I, ToolError> {
        serde_json::from_value(self.input.clone()).map_err(|e| ToolError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON arguments.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// Get the tool name.
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Get the entity store.
    pub fn store(&self) -> &EntityStore<T> {
        &self.store
    }

    /// Check if the arguments carry a non-null field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|value| !value.is_null())
    }

    /// Check if the arguments carry every listed field.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
