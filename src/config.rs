//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::table::DEVELOPMENT_CONNECTION_STRING;

#[derive(Debug, Clone, Parser)]
#[command(name = "zava-claims-mcp", version, about = "Zava Insurance claims MCP server")]
pub struct Cli {
    /// Azure storage connection string for the table service.
    #[arg(
        long,
        env = "AZURE_STORAGE_CONNECTION_STRING",
        default_value = DEVELOPMENT_CONNECTION_STRING,
        hide_default_value = true,
        hide_env_values = true,
        global = true
    )]
    pub connection_string: String,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3001, global = true)]
    pub port: u16,

    /// Directory holding the built widget HTML bundles.
    #[arg(long, env = "ASSETS_DIR", default_value = "assets", global = true)]
    pub assets_dir: PathBuf,

    /// Directory holding the seed fixtures.
    #[arg(long, env = "FIXTURES_DIR", default_value = "db", global = true)]
    pub fixtures_dir: PathBuf,

    /// Keep everything in process memory, seeded from the fixtures.
    #[arg(long, env = "IN_MEMORY_STORE", global = true)]
    pub in_memory: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the MCP endpoint (default).
    Serve,
    /// Load the fixtures into the store and exit.
    Seed,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    /// `host:port` to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
