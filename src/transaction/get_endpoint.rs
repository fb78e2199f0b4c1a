//! Defines the endpoint for getting a single transaction.
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{LedgerStore, Transaction, TransactionId, TransactionState},
};

/// The response body for a single transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionResponse {
    /// The requested transaction.
    pub transaction: Transaction,
}

/// A route handler for getting a transaction by its ID.
///
/// Responds with 404 if the transaction does not exist or belongs to another
/// session, so that clients cannot tell the two cases apart.
pub async fn get_transaction_endpoint<L>(
    State(state): State<TransactionState<L>>,
    Extension(session_id): Extension<SessionId>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<TransactionResponse>, Error>
where
    L: LedgerStore + Clone + Send + Sync + 'static,
{
    state
        .service
        .get(transaction_id, &session_id)?
        .map(|transaction| Json(TransactionResponse { transaction }))
        .ok_or(Error::NotFound)
}
