//! Ledgerd - Internal Transfer Ledger Service
//!
//! Entry point. Construction order:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌────────────┐    ┌──────────┐
//! │  Config  │───▶│ Postgres │───▶│  Services  │───▶│ Gateway  │
//! │  (YAML)  │    │ (pool +  │    │ (accounts, │    │  (axum)  │
//! │          │    │  schema) │    │  transfer) │    │          │
//! └──────────┘    └──────────┘    └────────────┘    └──────────┘
//! ```
//!
//! Everything is constructed here and injected explicitly; no module reaches
//! for ambient globals.

use std::sync::Arc;

use ledgerd::config::AppConfig;
use ledgerd::db::Database;
use ledgerd::gateway::{self, state::AppState};
use ledgerd::logging::init_logging;
use ledgerd::repository::{PgAccountRepository, PgAuditRepository, PgTransactionRepository};
use ledgerd::service::{AccountService, TransferService};
use ledgerd::{repository, schema};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _guard = init_logging(&config);
    tracing::info!(env = %env, version = env!("CARGO_PKG_VERSION"), "ledgerd starting");

    let db = Arc::new(Database::connect(&config.database).await?);
    schema::init_schema(db.pool()).await?;

    // Repositories behind their store traits
    let accounts: Arc<dyn repository::AccountStore> = Arc::new(PgAccountRepository);
    let transactions: Arc<dyn repository::TransactionStore> = Arc::new(PgTransactionRepository);
    let audit: Arc<dyn repository::AuditStore> = Arc::new(PgAuditRepository);

    let account_service = Arc::new(AccountService::new(
        db.clone(),
        accounts.clone(),
        transactions.clone(),
        audit.clone(),
    ));
    let transfer_service = Arc::new(TransferService::new(
        db.clone(),
        accounts,
        transactions,
        audit,
        config.transfer.deadline_ms,
    ));

    let state = Arc::new(AppState::new(db, account_service, transfer_service));

    gateway::serve(&config.gateway, state).await
}
