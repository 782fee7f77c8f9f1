//! Zava Insurance claims MCP server.
//!
//! Exposes claims, inspections, purchase orders, contractors and inspectors
//! as MCP tools over a table store, plus the widget resources that render
//! them.

pub mod config;
pub mod entity;
pub mod mcp;
pub mod seed;
pub mod store;
pub mod table;
pub mod tools;

pub use entity::{Collection, Decoded, Entity};
pub use mcp::{McpServer, ToolContext, ToolError, ToolOutput, ToolService, WidgetCatalog};
pub use seed::{SeedError, SeedReport, Seeder};
pub use store::{EntityStore, StoreError};
pub use table::{InMemoryTableStore, TableEntity, TableError, TableStore};

#[cfg(feature = "azure")]
pub use table::AzureTableStore;
