//! Gateway request handlers

pub mod account;
pub mod audit;
pub mod health;
pub mod transfer;

pub use account::{create_account, get_account, list_account_transactions};
pub use audit::list_entity_audit;
pub use health::{HealthResponse, health_check};
pub use transfer::{create_transfer, get_transaction};
