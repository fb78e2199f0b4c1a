//! Business rules for recording and reading a session's transactions.

use crate::{
    Error,
    session::SessionId,
    transaction::{
        LedgerStore, Magnitude, Transaction, TransactionId, TransactionTitle, TransactionType,
    },
};

/// Records and reads transactions through an injected [LedgerStore].
///
/// Holds no state of its own, every call is scoped by the session ID the
/// caller passes in.
#[derive(Debug, Clone)]
pub struct TransactionService<L> {
    store: L,
}

impl<L> TransactionService<L>
where
    L: LedgerStore,
{
    /// Create a service backed by `store`.
    pub fn new(store: L) -> Self {
        Self { store }
    }

    /// Record a new transaction in `session_id` and return its ID.
    ///
    /// Debits are stored with a negative amount, credits with a positive one.
    ///
    /// # Errors
    /// Returns any error from the store unchanged, e.g.
    /// [Error::ConstraintViolation] or [Error::SqlError].
    pub fn create(
        &self,
        title: TransactionTitle,
        magnitude: Magnitude,
        transaction_type: TransactionType,
        session_id: &SessionId,
    ) -> Result<TransactionId, Error> {
        let transaction = Transaction::new(title, magnitude, transaction_type, session_id.clone());
        self.store.insert(&transaction)?;

        tracing::debug!(
            "Created {transaction_type:?} transaction {} in session {session_id}",
            transaction.id
        );

        Ok(transaction.id)
    }

    /// All transactions in `session_id`.
    pub fn list(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error> {
        self.store.list_by_session(session_id)
    }

    /// The transaction `id` if it belongs to `session_id`.
    pub fn get(
        &self,
        id: TransactionId,
        session_id: &SessionId,
    ) -> Result<Option<Transaction>, Error> {
        self.store.get_by_id_and_session(id, session_id)
    }

    /// The net balance of `session_id`.
    pub fn summary(&self, session_id: &SessionId) -> Result<f64, Error> {
        self.store.sum_by_session(session_id)
    }
}
