//! InMemoryTableStore - map-backed tables for tests and demo mode.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{TableEntity, TableError, TableStore};

/// Entities ordered by `(partition key, row key)`, the order the Table
/// service lists them in.
type Table = BTreeMap<(String, String), TableEntity>;

/// In-memory table store backed by a map of ordered tables.
///
/// Tables must be created before use, mirroring a real table service.
/// Clone-friendly via Arc; clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryTableStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryTableStore {
    /// Create a store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities in a table, or `None` if the table does not exist.
    pub fn len(&self, table: &str) -> Option<usize> {
        self.tables.read().ok()?.get(table).map(Table::len)
    }

    /// Names of the existing tables, sorted.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.tables.read() {
            Ok(tables) => tables.keys().cloned().collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    fn missing_table(table: &str) -> TableError {
        TableError::Backend {
            status: 404,
            message: format!("table {} does not exist", table),
        }
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn create_table(&self, table: &str) -> Result<(), TableError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| TableError::LockPoisoned("create_table"))?;

        if tables.contains_key(table) {
            return Err(TableError::AlreadyExists(table.to_string()));
        }
        tables.insert(table.to_string(), Table::new());
        Ok(())
    }

    async fn list_entities(
        &self,
        table: &str,
        partition_key: &str,
    ) -> Result<Vec<TableEntity>, TableError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| TableError::LockPoisoned("list_entities"))?;

        let entries = tables.get(table).ok_or_else(|| Self::missing_table(table))?;
        Ok(entries
            .values()
            .filter(|entity| entity.partition_key == partition_key)
            .cloned()
            .collect())
    }

    async fn get_entity(
        &self,
        table: &str,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<TableEntity>, TableError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| TableError::LockPoisoned("get_entity"))?;

        let entries = tables.get(table).ok_or_else(|| Self::missing_table(table))?;
        Ok(entries
            .get(&(partition_key.to_string(), row_key.to_string()))
            .cloned())
    }

    async fn upsert_entity(&self, table: &str, entity: &TableEntity) -> Result<(), TableError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| TableError::LockPoisoned("upsert_entity"))?;

        let entries = tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        entries.insert(
            (entity.partition_key.clone(), entity.row_key.clone()),
            entity.clone(),
        );
        Ok(())
    }
}
