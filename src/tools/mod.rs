//! The claims tool catalog.
//!
//! One module per tool, each following the `NAME` / `definition` / `guard` /
//! `handle` convention so [`register_tools!`](crate::register_tools) can
//! wire them up.

pub mod create_inspection;
pub mod get_claim_summary;
pub mod list_inspectors;
pub mod show_claim_detail;
pub mod show_claims_dashboard;
pub mod show_contractors;
pub mod update_claim_status;
pub mod update_inspection;
pub mod update_purchase_order;

use serde_json::Value;

use crate::entity::decode;
use crate::mcp::{ToolOutput, ToolService};
use crate::store::EntityStore;
use crate::table::TableStore;

/// Build the tool service with every claims tool registered.
pub fn service<T: TableStore>(store: EntityStore<T>) -> ToolService<T> {
    crate::register_tools!(
        ToolService::new(store),
        show_claims_dashboard,
        show_claim_detail,
        show_contractors,
        update_claim_status,
        update_inspection,
        update_purchase_order,
        get_claim_summary,
        create_inspection,
        list_inspectors,
    )
}

/// Treat an empty string argument as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Case-insensitive substring match. An absent or empty needle matches
/// everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Append a note to a stored notes list.
///
/// Stored text that does not decode to a list is replaced by a fresh list
/// holding only the new note.
pub fn append_note(stored: &str, note: &str) -> Vec<Value> {
    let mut notes = decode::<Vec<Value>>(stored).into_value().unwrap_or_default();
    notes.push(Value::String(note.to_string()));
    notes
}

pub(crate) fn not_found(kind: &str, id: &str) -> ToolOutput {
    ToolOutput::text(format!("{kind} \"{id}\" not found."))
}
