//! Fixture seeding.
//!
//! Loads one JSON fixture per collection and upserts every row under its
//! `id`. Fixture files hold either a plain array or `{ "rows": [...] }`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::entity::Collection;
use crate::store::{EntityStore, StoreError};
use crate::table::TableStore;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("fixture {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid fixture for {collection}: {message}")]
    InvalidFixture {
        collection: Collection,
        message: String,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Rows written per collection, in seeding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    counts: Vec<(Collection, usize)>,
}

impl SeedReport {
    pub fn count(&self, collection: Collection) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn counts(&self) -> &[(Collection, usize)] {
        &self.counts
    }
}

/// Fixture file name for a collection.
pub fn fixture_file(collection: Collection) -> &'static str {
    match collection {
        Collection::Claims => "claims.json",
        Collection::Contractors => "contractors.json",
        Collection::Inspections => "inspections.json",
        Collection::Inspectors => "inspectors.json",
        Collection::PurchaseOrders => "purchaseOrders.json",
    }
}

/// Read a fixture file into its rows.
pub fn load_fixture(path: &Path) -> Result<Vec<Value>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: Value = serde_json::from_str(&raw).map_err(|source| SeedError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match parsed {
        Value::Array(rows) => rows,
        Value::Object(mut object) => match object.remove("rows") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

pub struct Seeder<T> {
    store: EntityStore<T>,
    fixtures_dir: PathBuf,
}

impl<T: TableStore> Seeder<T> {
    pub fn new(store: EntityStore<T>, fixtures_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            fixtures_dir: fixtures_dir.into(),
        }
    }

    /// Ensure every collection exists, then seed all five fixture files.
    ///
    /// Every file is read before anything is written, so a missing file
    /// leaves the store untouched.
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        let mut fixtures = Vec::with_capacity(Collection::ALL.len());
        for collection in Collection::ALL {
            let path = self.fixtures_dir.join(fixture_file(collection));
            fixtures.push((collection, load_fixture(&path)?));
        }

        info!(dir = %self.fixtures_dir.display(), "seeding collections");
        self.store.ensure_collections().await?;

        let mut report = SeedReport::default();
        for (collection, rows) in fixtures {
            let written = self.seed_rows(collection, rows).await?;
            report.counts.push((collection, written));
        }
        info!(total = report.total(), "seeding complete");
        Ok(report)
    }

    /// Upsert rows into one collection. Returns how many were written.
    pub async fn seed_rows(
        &self,
        collection: Collection,
        rows: Vec<Value>,
    ) -> Result<usize, SeedError> {
        let mut written = 0;
        for row in rows {
            let Value::Object(fields) = row else {
                return Err(SeedError::InvalidFixture {
                    collection,
                    message: "rows must be JSON objects".into(),
                });
            };
            let (key, fields) = prepare_row(collection, fields)?;
            let label = label(collection, &key, &fields);
            self.store.upsert_fields(collection, &key, fields).await?;
            info!(%collection, key = %key, "seeded {label}");
            written += 1;
        }
        Ok(written)
    }
}

/// Split a fixture row into its key and stored fields, applying the
/// per-collection normalizations.
fn prepare_row(
    collection: Collection,
    mut fields: Map<String, Value>,
) -> Result<(String, Map<String, Value>), SeedError> {
    let key = match fields.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Err(SeedError::InvalidFixture {
                collection,
                message: "every row needs a non-empty \"id\"".into(),
            })
        }
    };

    fields.retain(|_, value| !value.is_null());

    match collection {
        Collection::Contractors => {
            let text = fields.get("rating").and_then(Value::as_str).map(str::to_owned);
            if let Some(text) = text {
                match text.trim().parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                    Some(rating) => {
                        fields.insert("rating".into(), Value::Number(rating));
                    }
                    None => {
                        warn!(%collection, key = %key, rating = %text, "dropping unparseable rating");
                        fields.remove("rating");
                    }
                }
            }
        }
        Collection::Inspections => {
            fields
                .entry("completedDate")
                .or_insert_with(|| Value::String(String::new()));
        }
        _ => {}
    }

    Ok((key, fields))
}

/// Human-readable name of a row for the seeding log.
fn label(collection: Collection, key: &str, fields: &Map<String, Value>) -> String {
    let text = |name: &str| fields.get(name).and_then(Value::as_str).unwrap_or_default();
    match collection {
        Collection::Claims => format!("{} - {}", text("claimNumber"), text("policyHolderName")),
        Collection::Contractors => format!("{} - {}", text("name"), text("businessName")),
        Collection::Inspections => format!("{key} - Claim {}", text("claimNumber")),
        Collection::Inspectors => text("name").to_string(),
        Collection::PurchaseOrders => format!("{} - Claim {}", text("poNumber"), text("claimNumber")),
    }
}
