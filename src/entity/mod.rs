//! Entities - stored records for the five collections and their API views.
//!
//! Each collection has a record type (the flat shape held by the table
//! backend, structured fields kept as JSON text) and a view type (the shape
//! returned to tool callers, structured fields decoded).
//!
//! ## Example
//!
//! ```ignore
//! use zava_claims_mcp::entity::{ClaimRecord, Entity};
//!
//! let record: ClaimRecord = entity::from_table_entity(&stored)?;
//! let claim = record.to_view();
//! assert_eq!(claim.id, stored.row_key);
//! ```

mod claim;
mod codec;
mod contractor;
mod inspection;
mod inspector;
mod purchase_order;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::table::TableEntity;

pub use claim::{Claim, ClaimRecord};
pub use codec::{decode, encode_fields, encode_value, Decoded};
pub use contractor::{Address, Contractor, ContractorRecord};
pub use inspection::{Inspection, InspectionRecord};
pub use inspector::{Inspector, InspectorRecord};
pub use purchase_order::{LineItem, PurchaseOrder, PurchaseOrderRecord};

/// The five collections, each stored in its own table under one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Claims,
    Contractors,
    Inspections,
    Inspectors,
    PurchaseOrders,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Claims,
        Collection::Contractors,
        Collection::Inspections,
        Collection::Inspectors,
        Collection::PurchaseOrders,
    ];

    /// Name of the backing table.
    pub fn table_name(self) -> &'static str {
        match self {
            Collection::Claims => "Claims",
            Collection::Contractors => "Contractors",
            Collection::Inspections => "Inspections",
            Collection::Inspectors => "Inspectors",
            Collection::PurchaseOrders => "PurchaseOrders",
        }
    }

    /// The collection tag every record of this collection is stored under.
    pub fn partition_key(self) -> &'static str {
        match self {
            Collection::Claims => "claims",
            Collection::Contractors => "contractors",
            Collection::Inspections => "inspections",
            Collection::Inspectors => "inspectors",
            Collection::PurchaseOrders => "purchaseorders",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.partition_key())
    }
}

/// A record type stored in one collection.
pub trait Entity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection this record lives in.
    const COLLECTION: Collection;

    /// The API shape of this record.
    type View: Serialize + Clone + Send + Sync + 'static;

    /// The row key.
    fn key(&self) -> &str;

    /// Map to the API shape, decoding every structured field.
    fn to_view(&self) -> Self::View;
}

/// Read a typed record out of a stored table entity.
///
/// The row key is exposed to the record as `RowKey`; missing properties
/// take their defaults.
pub fn from_table_entity<E: Entity>(entity: &TableEntity) -> Result<E, serde_json::Error> {
    let mut object = entity.properties.clone();
    object.insert("RowKey".into(), Value::String(entity.row_key.clone()));
    serde_json::from_value(Value::Object(object))
}
