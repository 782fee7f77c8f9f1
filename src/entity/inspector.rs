use serde::{Deserialize, Serialize};

use super::codec::{decode, lenient_text, Decoded};
use super::{Collection, Entity};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectorRecord {
    #[serde(rename = "RowKey")]
    pub key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub specializations: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspector {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub specializations: Decoded<Vec<String>>,
}

impl Entity for InspectorRecord {
    const COLLECTION: Collection = Collection::Inspectors;
    type View = Inspector;

    fn key(&self) -> &str {
        &self.key
    }

    fn to_view(&self) -> Inspector {
        Inspector {
            id: self.key.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            license_number: self.license_number.clone(),
            specializations: decode(&self.specializations),
        }
    }
}
