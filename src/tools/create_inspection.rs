use serde::Deserialize;
use serde_json::json;

use super::non_empty;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::store::NewInspection;
use crate::table::TableStore;

pub const NAME: &str = "create-inspection";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub claim_number: String,
    #[serde(default)]
    pub claim_id: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub inspector_id: Option<String>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Create Inspection",
        "Creates a new inspection record. Only claimNumber is required. ID is auto-generated, \
         status defaults to 'open'. claimId is optional.",
        json!({
            "type": "object",
            "properties": {
                "claimNumber": { "type": "string", "description": "The claim number (e.g. 'CN202504990')" },
                "claimId": { "type": "string", "description": "Optional claim ID" },
                "taskType": {
                    "type": "string",
                    "description": "Type of inspection: 'initial', 're-inspection', 'final'. Defaults to 'initial'"
                },
                "priority": {
                    "type": "string",
                    "description": "Priority: 'low', 'medium', 'high'. Defaults to 'medium'"
                },
                "status": { "type": "string", "description": "Status. Defaults to 'open'" },
                "scheduledDate": { "type": "string", "description": "Scheduled date (ISO string)" },
                "inspectorId": { "type": "string", "description": "Inspector ID to assign" },
                "property": { "type": "string", "description": "Property address" },
                "instructions": { "type": "string", "description": "Inspection instructions" }
            },
            "required": ["claimNumber"]
        }),
    )
}

pub fn guard<T>(ctx: &ToolContext<T>) -> bool {
    ctx.has_field("claimNumber")
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;
    let store = ctx.store();

    let mut claim_id = non_empty(input.claim_id);
    let mut property = non_empty(input.property);
    if claim_id.is_none() || property.is_none() {
        if let Some(claim) = store.claim_by_number(&input.claim_number).await? {
            claim_id = claim_id.or(Some(claim.key));
            property = property.or(Some(claim.property));
        }
    }

    let created = store
        .create_inspection(NewInspection {
            claim_id,
            claim_number: Some(input.claim_number.clone()),
            task_type: input.task_type,
            priority: input.priority,
            status: input.status,
            scheduled_date: input.scheduled_date,
            inspector_id: input.inspector_id,
            property,
            instructions: input.instructions,
            ..Default::default()
        })
        .await?;

    Ok(ToolOutput::text(format!(
        "✅ Inspection {} created for claim {}. Status: {}",
        created.key, input.claim_number, created.status
    )))
}
