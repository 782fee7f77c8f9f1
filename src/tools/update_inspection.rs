use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{non_empty, not_found};
use crate::entity::InspectionRecord;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::store::now_timestamp;
use crate::table::TableStore;

pub const NAME: &str = "update-inspection";

/// Status that also stamps `completedDate`.
const COMPLETED: &str = "completed";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub inspection_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub findings: Option<String>,
    #[serde(default)]
    pub recommended_actions: Option<Vec<String>>,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub inspector_id: Option<String>,
}

impl Input {
    /// The fields this call changes. `updatedAt` is always bumped; empty
    /// strings leave their field alone.
    pub fn into_fields(self, now: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("updatedAt".into(), Value::String(now.to_string()));

        if let Some(status) = non_empty(self.status) {
            if status == COMPLETED {
                fields.insert("completedDate".into(), Value::String(now.to_string()));
            }
            fields.insert("status".into(), Value::String(status));
        }
        if let Some(findings) = non_empty(self.findings) {
            fields.insert("findings".into(), Value::String(findings));
        }
        if let Some(actions) = self.recommended_actions {
            fields.insert("recommendedActions".into(), Value::from(actions));
        }
        if let Some(property) = non_empty(self.property) {
            fields.insert("property".into(), Value::String(property));
        }
        if let Some(inspector_id) = non_empty(self.inspector_id) {
            fields.insert("inspectorId".into(), Value::String(inspector_id));
        }
        fields
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Update Inspection",
        "Updates an inspection record: status, findings, recommended actions, property, or \
         inspector assignment.",
        json!({
            "type": "object",
            "properties": {
                "inspectionId": { "type": "string", "description": "The inspection ID (e.g. 'insp-001')" },
                "status": {
                    "type": "string",
                    "description": "New status (e.g. 'completed', 'scheduled', 'in-progress', 'cancelled')"
                },
                "findings": { "type": "string", "description": "Updated findings text" },
                "recommendedActions": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Updated recommended actions"
                },
                "property": { "type": "string", "description": "Updated property address" },
                "inspectorId": {
                    "type": "string",
                    "description": "Inspector ID to assign (e.g. 'inspector-003')"
                }
            },
            "required": ["inspectionId"]
        }),
    )
}

pub fn guard<T>(ctx: &ToolContext<T>) -> bool {
    ctx.has_field("inspectionId")
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;
    let inspection_id = input.inspection_id.clone();

    let updated = ctx
        .store()
        .merge_update::<InspectionRecord>(&inspection_id, input.into_fields(&now_timestamp()))
        .await?;

    Ok(match updated {
        Some(_) => ToolOutput::text(format!("✅ Inspection {inspection_id} updated.")),
        None => not_found("Inspection", &inspection_id),
    })
}
