use serde::{Deserialize, Serialize};
use serde_json::json;

use super::not_found;
use crate::entity::{
    Claim, Contractor, ContractorRecord, Entity, Inspection, Inspector, InspectorRecord,
    PurchaseOrder,
};
use crate::mcp::widget::CLAIM_DETAIL;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::store::ById;
use crate::table::TableStore;

pub const NAME: &str = "show-claim-detail";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// A claim key or a claim number.
    pub claim_id: String,
}

/// One claim with its inspections, purchase orders and the people on them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDetail {
    pub claim: Claim,
    pub inspections: Vec<Inspection>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub contractors: ById<Contractor>,
    pub inspectors: ById<Inspector>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Show Claim Detail",
        "Displays detailed information about a specific insurance claim including related \
         inspections, purchase orders, and contractor assignments. Use claim ID (e.g. '1', '2') \
         or claim number (e.g. 'CN202504990').",
        json!({
            "type": "object",
            "properties": {
                "claimId": { "type": "string", "description": "The claim ID or claim number to look up" }
            },
            "required": ["claimId"]
        }),
    )
    .read_only()
    .with_widget(&CLAIM_DETAIL)
}

pub fn guard<T>(ctx: &ToolContext<T>) -> bool {
    ctx.has_field("claimId")
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;
    let store = ctx.store();

    let Some(claim) = store.resolve_claim(&input.claim_id).await? else {
        return Ok(not_found("Claim", &input.claim_id));
    };

    let inspections = store.inspections_for_claim(&claim.key).await?;
    let purchase_orders = store.purchase_orders_for_claim(&claim.key).await?;

    let contractors = store
        .fetch_by_ids::<ContractorRecord, _>(purchase_orders.iter().map(|po| po.contractor_id.as_str()))
        .await?;
    let inspectors = store
        .fetch_by_ids::<InspectorRecord, _>(inspections.iter().map(|i| i.inspector_id.as_str()))
        .await?;

    let detail = ClaimDetail {
        claim: claim.to_view(),
        inspections: inspections.iter().map(Entity::to_view).collect(),
        purchase_orders: purchase_orders.iter().map(Entity::to_view).collect(),
        contractors,
        inspectors,
    };

    ToolOutput::text(format!(
        "Claim {} - {}",
        claim.claim_number, claim.policy_holder_name
    ))
    .with_structured(&detail)
    .map(|output| output.with_widget(&CLAIM_DETAIL))
}
