//! Id-keyed join maps for enriching responses with referenced entities.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::{EntityStore, StoreError};
use crate::entity::Entity;
use crate::table::TableStore;

/// Entities keyed by id, serialized as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ById<V>(BTreeMap<String, V>);

impl<V> Default for ById<V> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<V> ById<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: V) -> Option<V> {
        self.0.insert(id.into(), value)
    }

    pub fn get(&self, id: &str) -> Option<&V> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Distinct non-empty ids, in first-seen order.
pub fn distinct_ids<'a, I>(ids: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .collect()
}

impl<T: TableStore> EntityStore<T> {
    /// Fetch every distinct referenced entity, one lookup per id.
    ///
    /// Ids with no stored entity are left out of the map.
    pub async fn fetch_by_ids<'a, E, I>(&self, ids: I) -> Result<ById<E::View>, StoreError>
    where
        E: Entity,
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = ById::new();
        for id in distinct_ids(ids) {
            if let Some(record) = self.get_by_key::<E>(id).await? {
                found.insert(record.key(), record.to_view());
            }
        }
        Ok(found)
    }
}
