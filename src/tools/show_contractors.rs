use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entity::{Contractor, ContractorRecord, Entity};
use crate::mcp::widget::CONTRACTORS_LIST;
use crate::mcp::{ToolContext, ToolDefinition, ToolError, ToolOutput};
use crate::table::TableStore;

pub const NAME: &str = "show-contractors";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Input {
    pub specialty: Option<String>,
    pub preferred_only: Option<bool>,
}

impl Input {
    pub fn matches(&self, contractor: &Contractor) -> bool {
        let specialty = match self.specialty.as_deref() {
            None | Some("") => true,
            Some(needle) => contractor.has_specialty(needle),
        };
        let preferred = !self.preferred_only.unwrap_or(false) || contractor.is_preferred;
        specialty && preferred
    }
}

#[derive(Debug, Serialize)]
pub struct ContractorsList {
    pub contractors: Vec<Contractor>,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Show Contractors",
        "Displays the list of contractors available for insurance repair work. Optionally \
         filter by specialty or preferred status.",
        json!({
            "type": "object",
            "properties": {
                "specialty": {
                    "type": "string",
                    "description": "Filter by contractor specialty (e.g. 'Roofing', 'Water Damage', 'Fire')"
                },
                "preferredOnly": { "type": "boolean", "description": "Show only preferred contractors" }
            }
        }),
    )
    .read_only()
    .with_widget(&CONTRACTORS_LIST)
}

pub fn guard<T>(_ctx: &ToolContext<T>) -> bool {
    true
}

pub async fn handle<T: TableStore>(ctx: ToolContext<T>) -> Result<ToolOutput, ToolError> {
    let input = ctx.input::<Input>()?;

    let contractors: Vec<Contractor> = ctx
        .store()
        .list_all::<ContractorRecord>()
        .await?
        .iter()
        .map(Entity::to_view)
        .filter(|contractor| input.matches(contractor))
        .collect();

    let list = ContractorsList { contractors };
    ToolOutput::text(format!("Loaded {} contractors.", list.contractors.len()))
        .with_structured(&list)
        .map(|output| output.with_widget(&CONTRACTORS_LIST))
}
