use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{append_note, non_empty, not_found};
use crate::entity::ClaimRecord;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::store::now_timestamp;
use crate::table::TableStore;

pub const NAME: &str = "update-claim-status";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub claim_id: String,
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Update Claim Status",
        "Updates the status of an insurance claim. Use claim ID (e.g. '1', '2').",
        json!({
            "type": "object",
            "properties": {
                "claimId": { "type": "string", "description": "The claim ID" },
                "status": {
                    "type": "string",
                    "description": "New status (e.g. 'Approved', 'Denied', 'Closed', 'Open - Under Investigation')"
                },
                "note": { "type": "string", "description": "Optional note to add to the claim" }
            },
            "required": ["claimId", "status"]
        }),
    )
}

pub fn guard<T>(ctx: &ToolContext<T>) -> bool {
    ctx.has_fields(&["claimId", "status"])
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;
    let store = ctx.store();

    // Looked up by key only; claim numbers are not accepted here.
    let Some(existing) = store.get_by_key::<ClaimRecord>(&input.claim_id).await? else {
        return Ok(not_found("Claim", &input.claim_id));
    };

    let mut fields = Map::new();
    fields.insert("status".into(), Value::String(input.status.clone()));
    fields.insert("updatedAt".into(), Value::String(now_timestamp()));
    if let Some(note) = non_empty(input.note) {
        fields.insert("notes".into(), Value::Array(append_note(&existing.notes, &note)));
    }

    if store
        .merge_update::<ClaimRecord>(&input.claim_id, fields)
        .await?
        .is_none()
    {
        return Ok(not_found("Claim", &input.claim_id));
    }

    Ok(ToolOutput::text(format!(
        "✅ Claim {} status updated to \"{}\".",
        existing.claim_number, input.status
    )))
}
