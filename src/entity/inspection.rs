//! Inspections - the only collection created at runtime.

use serde::{Deserialize, Serialize};

use super::codec::{decode, lenient_text, Decoded};
use super::{Collection, Entity};

/// An inspection as stored: photos, recommended actions and flagged issues
/// are JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionRecord {
    #[serde(rename = "RowKey")]
    pub key: String,
    pub claim_id: String,
    pub claim_number: String,
    pub task_type: String,
    pub priority: String,
    pub status: String,
    pub scheduled_date: String,
    pub inspector_id: String,
    pub property: String,
    pub instructions: String,
    #[serde(deserialize_with = "lenient_text")]
    pub photos: String,
    pub findings: String,
    #[serde(deserialize_with = "lenient_text")]
    pub recommended_actions: String,
    #[serde(deserialize_with = "lenient_text")]
    pub flagged_issues: String,
    pub created_at: String,
    pub updated_at: String,
    pub completed_date: String,
}

/// An inspection as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub claim_id: String,
    pub claim_number: String,
    pub task_type: String,
    pub priority: String,
    pub status: String,
    pub scheduled_date: String,
    pub inspector_id: String,
    pub property: String,
    pub instructions: String,
    pub photos: Decoded<Vec<String>>,
    pub findings: String,
    pub recommended_actions: Decoded<Vec<String>>,
    pub flagged_issues: Decoded<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
    pub completed_date: String,
}

impl Entity for InspectionRecord {
    const COLLECTION: Collection = Collection::Inspections;
    type View = Inspection;

    fn key(&self) -> &str {
        &self.key
    }

    fn to_view(&self) -> Inspection {
        Inspection {
            id: self.key.clone(),
            claim_id: self.claim_id.clone(),
            claim_number: self.claim_number.clone(),
            task_type: self.task_type.clone(),
            priority: self.priority.clone(),
            status: self.status.clone(),
            scheduled_date: self.scheduled_date.clone(),
            inspector_id: self.inspector_id.clone(),
            property: self.property.clone(),
            instructions: self.instructions.clone(),
            photos: decode(&self.photos),
            findings: self.findings.clone(),
            recommended_actions: decode(&self.recommended_actions),
            flagged_issues: decode(&self.flagged_issues),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
            completed_date: self.completed_date.clone(),
        }
    }
}
