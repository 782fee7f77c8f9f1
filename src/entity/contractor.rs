//! Contractors.

use serde::{Deserialize, Serialize};

use serde_json::Value;

use super::codec::{decode, lenient_bool, lenient_f64, lenient_text, Decoded};
use super::{Collection, Entity};

/// A contractor as stored: address and specialties are JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractorRecord {
    #[serde(rename = "RowKey")]
    pub key: String,
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub address: String,
    pub license_number: String,
    pub insurance_certificate: String,
    #[serde(deserialize_with = "lenient_text")]
    pub specialties: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: f64,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_preferred: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A contractor as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: String,
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub address: Decoded<Address>,
    pub license_number: String,
    pub insurance_certificate: String,
    pub specialties: Decoded<Vec<String>>,
    pub rating: f64,
    pub is_preferred: bool,
    pub is_active: bool,
}

impl Contractor {
    /// Case-insensitive substring match against any specialty.
    ///
    /// Only the text entries of a specialty list are searched.
    pub fn has_specialty(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let matches = |spec: &str| spec.to_lowercase().contains(&needle);
        match &self.specialties {
            Decoded::Value(specs) => specs.iter().any(|s| matches(s)),
            Decoded::Json(Value::Array(specs)) => {
                specs.iter().filter_map(Value::as_str).any(matches)
            }
            Decoded::Json(_) | Decoded::Raw(_) => false,
        }
    }
}

impl Entity for ContractorRecord {
    const COLLECTION: Collection = Collection::Contractors;
    type View = Contractor;

    fn key(&self) -> &str {
        &self.key
    }

    fn to_view(&self) -> Contractor {
        Contractor {
            id: self.key.clone(),
            name: self.name.clone(),
            business_name: self.business_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: decode(&self.address),
            license_number: self.license_number.clone(),
            insurance_certificate: self.insurance_certificate.clone(),
            specialties: decode(&self.specialties),
            rating: self.rating,
            is_preferred: self.is_preferred,
            is_active: self.is_active,
        }
    }
}
