//! Service layer: account management and transfer orchestration

pub mod accounts;
pub mod transfer;

pub use accounts::AccountService;
pub use transfer::TransferService;
