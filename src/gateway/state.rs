use std::sync::Arc;

use crate::db::Database;
use crate::service::{AccountService, TransferService};

/// Shared gateway state, constructed once at startup and injected everywhere
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub accounts: Arc<AccountService>,
    pub transfers: Arc<TransferService>,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        accounts: Arc<AccountService>,
        transfers: Arc<TransferService>,
    ) -> Self {
        Self {
            db,
            accounts,
            transfers,
        }
    }
}
