use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;

use super::not_found;
use crate::entity::{Claim, Entity};
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::table::TableStore;

pub const NAME: &str = "get-claim-summary";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// A claim key or a claim number.
    pub claim_id: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Get Claim Summary",
        "Returns a text summary for a specific claim with key details. Use claim ID or claim number.",
        json!({
            "type": "object",
            "properties": {
                "claimId": { "type": "string", "description": "Claim ID or claim number" }
            },
            "required": ["claimId"]
        }),
    )
    .read_only()
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

    let inspections = store.inspections_for_claim(&claim.key).await?.len();
    let purchase_orders = store.purchase_orders_for_claim(&claim.key).await?.len();

    Ok(ToolOutput::text(summary(
        &claim.to_view(),
        inspections,
        purchase_orders,
    )))
}

/// The multi-line claim summary.
pub fn summary(claim: &Claim, inspections: usize, purchase_orders: usize) -> String {
    let damage_types = claim.damage_types.joined(", ");
    [
        format!("📋 Claim: {}", claim.claim_number),
        format!(
            "👤 Policy Holder: {} ({})",
            claim.policy_holder_name, claim.policy_holder_email
        ),
        format!("📍 Property: {}", claim.property),
        format!("📅 Date of Loss: {}", format_date(&claim.date_of_loss)),
        format!("💰 Estimated Loss: ${}", format_amount(claim.estimated_loss)),
        format!("📊 Status: {}", claim.status),
        format!("🔧 Damage Types: {damage_types}"),
        format!("🔍 Inspections: {inspections}"),
        format!("📦 Purchase Orders: {purchase_orders}"),
        format!("📝 Description: {}", claim.description),
    ]
    .join("\n")
}

/// `M/D/YYYY`, or the text unchanged when it is not a recognizable date.
pub fn format_date(text: &str) -> String {
    let date = DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"));
    match date {
        Ok(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        Err(_) => text.to_string(),
    }
}

/// Thousands-separated, at most three fraction digits, no trailing zeros.
pub fn format_amount(amount: f64) -> String {
    let rendered = format!("{:.3}", amount.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if amount < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
