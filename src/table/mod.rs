//! Table backend - the four storage primitives every collection is built on.
//!
//! A table holds entities addressed by `(partition key, row key)`. Each
//! collection in this crate lives in its own table under a single fixed
//! partition, so a partition key doubles as the collection tag.
//!
//! ## Example
//!
//! ```ignore
//! use zava_claims_mcp::table::{InMemoryTableStore, TableEntity, TableStore};
//!
//! let tables = InMemoryTableStore::new();
//! tables.create_table("Claims").await?;
//! tables.upsert_entity("Claims", &TableEntity::new("claims", "1")).await?;
//! let loaded = tables.get_entity("Claims", "claims", "1").await?;
//! ```

mod connection;
mod in_memory;

#[cfg(feature = "azure")]
mod azure;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

pub use connection::{ConnectionString, DEVELOPMENT_CONNECTION_STRING};
pub use in_memory::InMemoryTableStore;

#[cfg(feature = "azure")]
pub use azure::AzureTableStore;

/// A single stored entity: its address plus a flat property bag.
///
/// Property values are scalars (strings, numbers, booleans). Structured
/// values are encoded to text before they reach this layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntity {
    pub partition_key: String,
    pub row_key: String,
    pub properties: Map<String, Value>,
}

impl TableEntity {
    /// Create an entity with no properties.
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            properties: Map::new(),
        }
    }

    /// Create an entity carrying the given properties.
    pub fn with_properties(
        partition_key: impl Into<String>,
        row_key: impl Into<String>,
        properties: Map<String, Value>,
    ) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            properties,
        }
    }

    /// Get a property by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Set a property, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.properties.insert(name.into(), value)
    }
}

/// Error type for table backend operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// `create_table` was asked for a table that already exists.
    #[error("table {0} already exists")]
    AlreadyExists(String),
    /// The backend answered with a failure status.
    #[error("table backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    /// The backend could not be reached.
    #[error("table transport error: {0}")]
    Transport(String),
    /// A request or response body could not be encoded or decoded.
    #[error("table encoding error: {0}")]
    Encoding(String),
    /// The connection string is missing a required setting.
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),
    /// In-memory storage lock poisoned.
    #[error("table storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// The storage primitives the entity store depends on.
///
/// Implementations must treat a missing entity as `Ok(None)`; only
/// backend-level failures are errors.
#[async_trait]
pub trait TableStore: Send + Sync + 'static {
    /// Create a table. Fails with [`TableError::AlreadyExists`] when it exists.
    async fn create_table(&self, table: &str) -> Result<(), TableError>;

    /// List every entity of one partition, in backend order.
    async fn list_entities(
        &self,
        table: &str,
        partition_key: &str,
    ) -> Result<Vec<TableEntity>, TableError>;

    /// Get one entity. Returns `None` if the table holds no such key.
    async fn get_entity(
        &self,
        table: &str,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<TableEntity>, TableError>;

    /// Insert the entity or replace every property of an existing one.
    async fn upsert_entity(&self, table: &str, entity: &TableEntity) -> Result<(), TableError>;
}
