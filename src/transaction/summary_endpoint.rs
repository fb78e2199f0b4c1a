//! Defines the endpoint for a session's balance.
use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    session::SessionId,
    transaction::{LedgerStore, TransactionState},
};

/// The response body for the balance summary.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    /// The session's balance.
    pub summary: Summary,
}

/// The net balance of a session.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Credits minus debits, zero for a session without transactions.
    pub amount: f64,
}

/// A route handler for the net balance of the caller's session.
pub async fn get_summary_endpoint<L>(
    State(state): State<TransactionState<L>>,
    Extension(session_id): Extension<SessionId>,
) -> Result<Json<SummaryResponse>, Error>
where
    L: LedgerStore + Clone + Send + Sync + 'static,
{
    let amount = state.service.summary(&session_id)?;

    Ok(Json(SummaryResponse {
        summary: Summary { amount },
    }))
}
