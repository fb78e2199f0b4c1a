//! The session-partitioned ledger of transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the types used to build one
//! - The `LedgerStore` trait and its SQLite implementation
//! - The `TransactionService` that applies the business rules
//! - Route handlers for the transaction API

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod service;
mod store;
mod summary_endpoint;

pub use self::core::{
    MAX_MAGNITUDE, Magnitude, Transaction, TransactionId, TransactionTitle, TransactionType,
};
pub use create_endpoint::{
    CreatedTransaction, TransactionForm, TransactionState, create_transaction_endpoint,
};
pub use get_endpoint::{TransactionResponse, get_transaction_endpoint};
pub use list_endpoint::{TransactionList, list_transactions_endpoint};
pub use service::TransactionService;
pub use store::{LedgerStore, SQLiteLedgerStore, create_transaction_table};
pub use summary_endpoint::{Summary, SummaryResponse, get_summary_endpoint};
