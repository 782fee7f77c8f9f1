//! Entity store - uniform CRUD over the five collections.
//!
//! `EntityStore<T>` is the store context handed to every tool handler. It
//! wraps a [`TableStore`] and speaks in typed records: list everything, get
//! by key, merge-update by key, and create inspections under generated keys.
//! Lookups that find nothing return `None`; only backend failures are errors.
//!
//! ## Example
//!
//! ```ignore
//! use zava_claims_mcp::entity::ClaimRecord;
//! use zava_claims_mcp::store::EntityStore;
//! use zava_claims_mcp::table::InMemoryTableStore;
//! use serde_json::json;
//!
//! let store = EntityStore::new(InMemoryTableStore::new());
//! store.ensure_collections().await?;
//!
//! let mut fields = serde_json::Map::new();
//! fields.insert("status".into(), json!("Closed"));
//! let updated = store.merge_update::<ClaimRecord>("1", fields).await?;
//! ```

mod claims;
mod join;
mod keys;

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::entity::{self, encode_fields, encode_value, Collection, Entity, InspectionRecord};
use crate::table::{TableEntity, TableError, TableStore};

pub use join::{distinct_ids, ById};
pub use keys::{inspection_sequence, next_inspection_key, INSPECTION_KEY_PREFIX};

/// Properties the backend owns; partial updates never write them.
const RESERVED_PROPERTIES: [&str; 3] = ["PartitionKey", "RowKey", "Timestamp"];

/// Error type for entity store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The table backend failed.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A stored entity could not be read as its record type.
    #[error("record {collection}/{key} is unreadable: {message}")]
    Record {
        collection: Collection,
        key: String,
        message: String,
    },
}

/// Current time as an ISO-8601 UTC timestamp with milliseconds.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fields for a new inspection. Anything left `None` takes its default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewInspection {
    pub claim_id: Option<String>,
    pub claim_number: Option<String>,
    pub task_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub scheduled_date: Option<String>,
    pub inspector_id: Option<String>,
    pub property: Option<String>,
    pub instructions: Option<String>,
    pub photos: Option<Vec<String>>,
    pub findings: Option<String>,
    pub recommended_actions: Option<Vec<String>>,
    pub flagged_issues: Option<Vec<String>>,
}

impl NewInspection {
    fn into_properties(self, now: &str) -> Map<String, Value> {
        let text = |value: Option<String>, default: &str| {
            Value::String(value.unwrap_or_else(|| default.to_string()))
        };
        let list = |value: Option<Vec<String>>| {
            encode_value(Value::from(value.unwrap_or_default()))
        };

        let mut properties = Map::new();
        properties.insert("claimId".into(), text(self.claim_id, ""));
        properties.insert("claimNumber".into(), text(self.claim_number, ""));
        properties.insert("taskType".into(), text(self.task_type, "initial"));
        properties.insert("priority".into(), text(self.priority, "medium"));
        properties.insert("status".into(), text(self.status, "open"));
        properties.insert("scheduledDate".into(), text(self.scheduled_date, ""));
        properties.insert("inspectorId".into(), text(self.inspector_id, ""));
        properties.insert("property".into(), text(self.property, ""));
        properties.insert("instructions".into(), text(self.instructions, ""));
        properties.insert("photos".into(), list(self.photos));
        properties.insert("findings".into(), text(self.findings, ""));
        properties.insert("recommendedActions".into(), list(self.recommended_actions));
        properties.insert("flaggedIssues".into(), list(self.flagged_issues));
        properties.insert("createdAt".into(), Value::String(now.to_string()));
        properties.insert("updatedAt".into(), Value::String(now.to_string()));
        properties.insert("completedDate".into(), Value::String(String::new()));
        properties
    }
}

/// Typed CRUD over the collections of one table backend.
///
/// Cheap to clone; clones share the backend.
pub struct EntityStore<T> {
    tables: Arc<T>,
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
        }
    }
}

impl<T: TableStore> EntityStore<T> {
    /// Create a store over the given backend.
    pub fn new(tables: T) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Get a reference to the table backend.
    pub fn tables(&self) -> &T {
        &self.tables
    }

    /// Create every collection's table, treating "already exists" as success.
    pub async fn ensure_collections(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            match self.tables.create_table(collection.table_name()).await {
                Ok(()) => info!(table = collection.table_name(), "created table"),
                Err(TableError::AlreadyExists(_)) => {
                    debug!(table = collection.table_name(), "table already exists")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Every record of a collection, in backend order.
    pub async fn list_all<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        let collection = E::COLLECTION;
        let stored = self
            .tables
            .list_entities(collection.table_name(), collection.partition_key())
            .await?;
        Ok(stored
            .iter()
            .filter_map(|entity| match read_record::<E>(entity) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable record");
                    None
                }
            })
            .collect())
    }

    /// One record by key, or `None` when the collection has no such key.
    pub async fn get_by_key<E: Entity>(&self, key: &str) -> Result<Option<E>, StoreError> {
        let collection = E::COLLECTION;
        self.tables
            .get_entity(collection.table_name(), collection.partition_key(), key)
            .await?
            .as_ref()
            .map(read_record::<E>)
            .transpose()
    }

    /// Overwrite the named fields of an existing record, leaving every
    /// other field as stored.
    ///
    /// Array and object values are encoded to JSON text. The full record is
    /// written back, then re-read, so the result is what the backend holds.
    /// Returns `None`, writing nothing, when the key does not exist.
    pub async fn merge_update<E: Entity>(
        &self,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<Option<E>, StoreError> {
        let collection = E::COLLECTION;
        let Some(mut stored) = self
            .tables
            .get_entity(collection.table_name(), collection.partition_key(), key)
            .await?
        else {
            return Ok(None);
        };

        let mut changed = Vec::new();
        for (name, value) in fields {
            if RESERVED_PROPERTIES.contains(&name.as_str()) {
                continue;
            }
            stored.set(name.clone(), encode_value(value));
            changed.push(name);
        }

        self.tables
            .upsert_entity(collection.table_name(), &stored)
            .await?;
        info!(%collection, key, fields = ?changed, "updated record");

        self.get_by_key(key).await
    }

    /// Insert or replace a whole record from API-shaped fields.
    ///
    /// Structured values are encoded the same way as in
    /// [`merge_update`](Self::merge_update).
    pub async fn upsert_fields(
        &self,
        collection: Collection,
        key: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let properties = encode_fields(
            fields
                .into_iter()
                .filter(|(name, _)| !RESERVED_PROPERTIES.contains(&name.as_str()))
                .collect(),
        );
        let stored =
            TableEntity::with_properties(collection.partition_key(), key, properties);
        self.tables
            .upsert_entity(collection.table_name(), &stored)
            .await?;
        Ok(())
    }

    /// Create an inspection under the next `insp-NNN` key.
    ///
    /// The key comes from scanning existing inspection keys; concurrent
    /// creations can compute the same key and the later write wins.
    pub async fn create_inspection(
        &self,
        fields: NewInspection,
    ) -> Result<InspectionRecord, StoreError> {
        let collection = Collection::Inspections;
        let existing = self
            .tables
            .list_entities(collection.table_name(), collection.partition_key())
            .await?;
        let key = next_inspection_key(existing.iter().map(|stored| stored.row_key.as_str()));

        let now = now_timestamp();
        let stored = TableEntity::with_properties(
            collection.partition_key(),
            key.clone(),
            fields.into_properties(&now),
        );
        self.tables
            .upsert_entity(collection.table_name(), &stored)
            .await?;
        info!(%collection, key = %key, "created inspection");

        self.get_by_key::<InspectionRecord>(&key)
            .await?
            .ok_or_else(|| StoreError::Record {
                collection,
                key,
                message: "not readable after write".into(),
            })
    }
}

fn read_record<E: Entity>(stored: &TableEntity) -> Result<E, StoreError> {
    entity::from_table_entity(stored).map_err(|e| StoreError::Record {
        collection: E::COLLECTION,
        key: stored.row_key.clone(),
        message: e.to_string(),
    })
}
