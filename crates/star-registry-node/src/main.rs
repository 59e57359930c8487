//! Star Registry node: entry point.

use clap::Parser;
use tracing::info;

use star_registry::store::MemoryStore;
use star_registry::Ledger;
use star_registry_node::{app, init_tracing, AppState, NodeArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = NodeArgs::parse();
    init_tracing(&args.log_level);

    let ledger = Ledger::new(MemoryStore::new(), args.ledger_config()).await?;
    info!(max_window_secs = args.max_window_secs, "ledger ready");

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app(AppState::new(ledger))).await?;
    Ok(())
}
