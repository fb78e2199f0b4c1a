//! Defines the endpoint for listing a session's transactions.
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{LedgerStore, Transaction, TransactionState},
};

/// The response body for listing transactions.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionList {
    /// The session's transactions, in no particular order.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing every transaction in the caller's session.
pub async fn list_transactions_endpoint<L>(
    State(state): State<TransactionState<L>>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<TransactionList>, Error>
where
    L: LedgerStore + Clone + Send + Sync + 'static,
{
    let transactions = state.service.list(&session_id)?;

    Ok(Json(TransactionList { transactions }))
}
