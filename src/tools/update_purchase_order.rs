use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{append_note, non_empty, not_found};
use crate::entity::PurchaseOrderRecord;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::table::TableStore;

pub const NAME: &str = "update-purchase-order";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub purchase_order_id: String,
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Update Purchase Order",
        "Updates a purchase order status (e.g. approve, reject, complete).",
        json!({
            "type": "object",
            "properties": {
                "purchaseOrderId": { "type": "string", "description": "The purchase order ID (e.g. 'po-001')" },
                "status": {
                    "type": "string",
                    "description": "New status (e.g. 'approved', 'rejected', 'completed', 'in-progress')"
                },
                "note": { "type": "string", "description": "Optional note to add" }
            },
            "required": ["purchaseOrderId", "status"]
        }),
    )
}

pub fn guard<T>(ctx: &ToolContext<T>) -> bool {
    ctx.has_fields(&["purchaseOrderId", "status"])
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;
    let store = ctx.store();

    let Some(existing) = store
        .get_by_key::<PurchaseOrderRecord>(&input.purchase_order_id)
        .await?
    else {
        return Ok(not_found("Purchase order", &input.purchase_order_id));
    };

    let mut fields = Map::new();
    fields.insert("status".into(), Value::String(input.status.clone()));
    if let Some(note) = non_empty(input.note) {
        fields.insert("notes".into(), Value::Array(append_note(&existing.notes, &note)));
    }

    if store
        .merge_update::<PurchaseOrderRecord>(&input.purchase_order_id, fields)
        .await?
        .is_none()
    {
        return Ok(not_found("Purchase order", &input.purchase_order_id));
    }

    Ok(ToolOutput::text(format!(
        "✅ Purchase order {} status updated to \"{}\".",
        existing.po_number, input.status
    )))
}
