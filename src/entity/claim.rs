//! Claims.

use serde::{Deserialize, Serialize};

use super::codec::{decode, lenient_f64, lenient_text, Decoded};
use super::{Collection, Entity};

/// A claim as stored: damage types and notes are JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimRecord {
    #[serde(rename = "RowKey")]
    pub key: String,
    pub claim_number: String,
    pub policy_number: String,
    pub policy_holder_name: String,
    pub policy_holder_email: String,
    pub property: String,
    pub date_of_loss: String,
    pub date_reported: String,
    pub status: String,
    #[serde(deserialize_with = "lenient_text")]
    pub damage_types: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub estimated_loss: f64,
    pub adjuster_assigned: String,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A claim as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub claim_number: String,
    pub policy_number: String,
    pub policy_holder_name: String,
    pub policy_holder_email: String,
    pub property: String,
    pub date_of_loss: String,
    pub date_reported: String,
    pub status: String,
    pub damage_types: Decoded<Vec<String>>,
    pub description: String,
    pub estimated_loss: f64,
    pub adjuster_assigned: String,
    pub notes: Decoded<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for ClaimRecord {
    const COLLECTION: Collection = Collection::Claims;
    type View = Claim;

    fn key(&self) -> &str {
        &self.key
    }

    fn to_view(&self) -> Claim {
        Claim {
            id: self.key.clone(),
            claim_number: self.claim_number.clone(),
            policy_number: self.policy_number.clone(),
            policy_holder_name: self.policy_holder_name.clone(),
            policy_holder_email: self.policy_holder_email.clone(),
            property: self.property.clone(),
            date_of_loss: self.date_of_loss.clone(),
            date_reported: self.date_reported.clone(),
            status: self.status.clone(),
            damage_types: decode(&self.damage_types),
            description: self.description.clone(),
            estimated_loss: self.estimated_loss,
            adjuster_assigned: self.adjuster_assigned.clone(),
            notes: decode(&self.notes),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
