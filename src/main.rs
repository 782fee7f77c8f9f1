use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zava_claims_mcp::config::{Cli, Command};
use zava_claims_mcp::mcp::{self, McpServer, WidgetCatalog};
use zava_claims_mcp::store::EntityStore;
use zava_claims_mcp::table::{AzureTableStore, InMemoryTableStore, TableStore};
use zava_claims_mcp::{tools, Seeder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zava_claims_mcp=info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.in_memory {
        info!("using the in-memory table store");
        let store = EntityStore::new(InMemoryTableStore::new());
        // The in-memory store starts empty.
        seed(&store, &cli).await?;
        match cli.command() {
            Command::Serve => serve(store, &cli).await,
            Command::Seed => {
                warn!("in-memory seed is discarded on exit");
                Ok(())
            }
        }
    } else {
        let tables = AzureTableStore::from_connection_string(&cli.connection_string)
            .context("invalid storage connection string")?;
        info!(endpoint = %tables.endpoint(), "using Azure Table storage");
        let store = EntityStore::new(tables);
        match cli.command() {
            Command::Serve => {
                store
                    .ensure_collections()
                    .await
                    .context("failed to create tables")?;
                serve(store, &cli).await
            }
            Command::Seed => seed(&store, &cli).await,
        }
    }
}

async fn seed<T: TableStore>(store: &EntityStore<T>, cli: &Cli) -> anyhow::Result<()> {
    let report = Seeder::new(store.clone(), &cli.fixtures_dir)
        .run()
        .await
        .context("seeding failed")?;
    for (collection, count) in report.counts() {
        info!(%collection, count, "seeded collection");
    }
    Ok(())
}

async fn serve<T: TableStore>(store: EntityStore<T>, cli: &Cli) -> anyhow::Result<()> {
    let server = Arc::new(McpServer::new(
        tools::service(store),
        WidgetCatalog::new(&cli.assets_dir),
    ));
    info!(
        name = mcp::SERVER_NAME,
        tools = server.tools().tools().len(),
        assets = %cli.assets_dir.display(),
        "starting MCP server"
    );
    mcp::serve(server, &cli.bind_addr())
        .await
        .context("HTTP server failed")
}
