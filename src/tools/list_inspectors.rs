use serde_json::json;

use crate::entity::{Entity, Inspector, InspectorRecord};
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::table::TableStore;

pub const NAME: &str = "list-inspectors";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "List Inspectors",
        "Lists all available inspectors with their specializations.",
        json!({ "type": "object", "properties": {} }),
    )
    .read_only()
}

pub fn guard<T>(_ctx: &ToolContext<T>) -> bool {
    true
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let inspectors: Vec<Inspector> = ctx
        .store()
        .list_all::<InspectorRecord>()
        .await?
        .iter()
        .map(Entity::to_view)
        .collect();
    Ok(ToolOutput::text(roster(&inspectors)))
}

/// Header line then one bullet per inspector.
pub fn roster(inspectors: &[Inspector]) -> String {
    let lines: Vec<String> = inspectors
        .iter()
        .map(|inspector| {
            format!(
                "• {} ({}) — {} — {}",
                inspector.name,
                inspector.id,
                inspector.specializations.joined(", "),
                inspector.email
            )
        })
        .collect();
    format!("👷 {} Inspectors:\n{}", inspectors.len(), lines.join("\n"))
}
