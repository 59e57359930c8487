//! Command-line and environment configuration for the node.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use star_registry::auth::DEFAULT_MAX_WINDOW_SECS;
use star_registry::LedgerConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "star-registry-node", about = "Star Registry HTTP node")]
pub struct NodeArgs {
    /// Address the HTTP server listens on.
    #[arg(long, default_value = "127.0.0.1:8000", env = "STAR_REGISTRY_BIND")]
    pub bind: SocketAddr,

    /// Maximum age of a signed challenge, in seconds.
    #[arg(long, default_value_t = DEFAULT_MAX_WINDOW_SECS, env = "STAR_REGISTRY_MAX_WINDOW")]
    pub max_window_secs: i64,

    /// Log filter: "trace", "debug", "info", "warn", "error", or a full
    /// `EnvFilter` directive such as "star_registry=debug,info".
    #[arg(long, default_value = "info", env = "STAR_REGISTRY_LOG")]
    pub log_level: String,
}

impl NodeArgs {
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            max_window_secs: self.max_window_secs,
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// An unparseable filter falls back to `info` rather than aborting startup.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
