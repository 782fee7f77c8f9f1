//! Purchase orders.

use serde::{Deserialize, Serialize};

use super::codec::{decode, lenient_f64, lenient_text, Decoded};
use super::{Collection, Entity};

/// A purchase order as stored: line items and notes are JSON text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseOrderRecord {
    #[serde(rename = "RowKey")]
    pub key: String,
    pub po_number: String,
    pub claim_id: String,
    pub claim_number: String,
    pub contractor_id: String,
    pub work_description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub line_items: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub subtotal: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub tax: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total: f64,
    pub status: String,
    pub created_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    pub category: String,
}

/// A purchase order as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub po_number: String,
    pub claim_id: String,
    pub claim_number: String,
    pub contractor_id: String,
    pub work_description: String,
    pub line_items: Decoded<Vec<LineItem>>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: String,
    pub created_date: String,
    pub notes: Decoded<Vec<String>>,
}

impl Entity for PurchaseOrderRecord {
    const COLLECTION: Collection = Collection::PurchaseOrders;
    type View = PurchaseOrder;

    fn key(&self) -> &str {
        &self.key
    }

    fn to_view(&self) -> PurchaseOrder {
        PurchaseOrder {
            id: self.key.clone(),
            po_number: self.po_number.clone(),
            claim_id: self.claim_id.clone(),
            claim_number: self.claim_number.clone(),
            contractor_id: self.contractor_id.clone(),
            work_description: self.work_description.clone(),
            line_items: decode(&self.line_items),
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            status: self.status.clone(),
            created_date: self.created_date.clone(),
            notes: decode(&self.notes),
        }
    }
}
