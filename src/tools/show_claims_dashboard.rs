use serde::{Deserialize, Serialize};
use serde_json::json;

use super::contains_ignore_case;
use crate::entity::{
    Claim, ClaimRecord, Contractor, ContractorRecord, Entity, Inspection, InspectionRecord,
    Inspector, InspectorRecord, PurchaseOrder, PurchaseOrderRecord,
};
use crate::mcp::widget::CLAIMS_DASHBOARD;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::store::ById;
use crate::table::TableStore;

pub const NAME: &str = "show-claims-dashboard";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub status: Option<String>,
    pub policy_holder_name: Option<String>,
}

impl Input {
    /// Both filters are case-insensitive substrings and must both match.
    pub fn matches(&self, claim: &ClaimRecord) -> bool {
        contains_ignore_case(&claim.status, self.status.as_deref())
            && contains_ignore_case(&claim.policy_holder_name, self.policy_holder_name.as_deref())
    }
}

/// Everything the dashboard widget needs for client-side master/detail.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsDashboard {
    pub claims: Vec<Claim>,
    pub inspections: Vec<Inspection>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub contractors: ById<Contractor>,
    pub inspectors: ById<Inspector>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Show Claims Dashboard",
        "Displays the Zava Insurance claims dashboard showing all claims with status overview, \
         filters, and summary metrics. Supports filtering by status and/or policy holder name. \
         When the user mentions a person's name, first name, last name, or partial name, always \
         pass it as the policyHolderName parameter. The name filter is case-insensitive and \
         supports partial matches (e.g. 'kim' will match 'Kimberly King' and 'Kimberly Williams').",
        json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "description": "Filter claims by status keyword (e.g. 'Open', 'Approved', 'Pending', 'Denied', 'Closed')"
                },
                "policyHolderName": {
                    "type": "string",
                    "description": "Filter claims by policy holder name. Supports partial, case-insensitive matching: pass the first name, last name, or any part of the name (e.g. 'Kimberly', 'king', 'kim'). When the user asks about a specific person's claims, always use this parameter."
                }
            }
        }),
    )
    .read_only()
    .with_widget(&CLAIMS_DASHBOARD)
}

pub fn guard<T>(_ctx: &ToolContext<T>) -> bool {
    true
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;
    let store = ctx.store();

    let claims: Vec<Claim> = store
        .list_all::<ClaimRecord>()
        .await?
        .iter()
        .filter(|claim| input.matches(claim))
        .map(Entity::to_view)
        .collect();

    // Inspections and purchase orders are not narrowed by the claim filter.
    let inspections = store.list_all::<InspectionRecord>().await?;
    let purchase_orders = store.list_all::<PurchaseOrderRecord>().await?;

    let contractors = store
        .fetch_by_ids::<ContractorRecord, _>(purchase_orders.iter().map(|po| po.contractor_id.as_str()))
        .await?;
    let inspectors = store
        .fetch_by_ids::<InspectorRecord, _>(inspections.iter().map(|i| i.inspector_id.as_str()))
        .await?;

    let dashboard = ClaimsDashboard {
        claims,
        inspections: inspections.iter().map(Entity::to_view).collect(),
        purchase_orders: purchase_orders.iter().map(Entity::to_view).collect(),
        contractors,
        inspectors,
    };

    ToolOutput::text(format!("Loaded {} claims.", dashboard.claims.len()))
        .with_structured(&dashboard)
        .map(|output| output.with_widget(&CLAIMS_DASHBOARD))
}
