//! The ledger store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    session::SessionId,
    transaction::{Transaction, TransactionId},
};

/// Handles the storage and retrieval of ledger entries.
///
/// Every read is scoped to a session. Implementations must never return an
/// entry that belongs to a different session than the one asked for.
pub trait LedgerStore {
    /// Persist a fully-formed transaction.
    ///
    /// # Errors
    /// Returns [Error::ConstraintViolation] if a transaction with the same ID
    /// already exists or a field is malformed.
    fn insert(&self, transaction: &Transaction) -> Result<(), Error>;

    /// Retrieve all transactions belonging to `session_id`, in no particular order.
    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transaction `id` if, and only if, it belongs to `session_id`.
    ///
    /// `Ok(None)` means there is no such transaction in this session.
    fn get_by_id_and_session(
        &self,
        id: TransactionId,
        session_id: &SessionId,
    ) -> Result<Option<Transaction>, Error>;

    /// The sum of the amounts of all transactions in `session_id`.
    ///
    /// A session without transactions sums to zero.
    ///
    /// # Errors
    /// Returns [Error::BalanceOverflow] if the sum is not a finite number.
    fn sum_by_session(&self, session_id: &SessionId) -> Result<f64, Error>;
}

/// Stores transactions in a SQLite database.
///
/// The `transactions` table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteLedgerStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("Could not acquire the database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl LedgerStore for SQLiteLedgerStore {
    fn insert(&self, transaction: &Transaction) -> Result<(), Error> {
        self.lock()?.execute(
            "INSERT INTO transactions (id, title, amount, session_id) VALUES (?1, ?2, ?3, ?4)",
            (
                &transaction.id,
                &transaction.title,
                transaction.amount,
                &transaction.session_id,
            ),
        )?;

        Ok(())
    }

    fn list_by_session(&self, session_id: &SessionId) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, title, amount, session_id FROM transactions
                 WHERE session_id = :session_id",
            )?
            .query_map(&[(":session_id", session_id)], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    fn get_by_id_and_session(
        &self,
        id: TransactionId,
        session_id: &SessionId,
    ) -> Result<Option<Transaction>, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(
            "SELECT id, title, amount, session_id FROM transactions
             WHERE id = ?1 AND session_id = ?2",
        )?;

        match statement.query_row((&id, session_id), map_transaction_row) {
            Ok(transaction) => Ok(Some(transaction)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn sum_by_session(&self, session_id: &SessionId) -> Result<f64, Error> {
        let sum: f64 = self.lock()?.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM transactions WHERE session_id = ?1",
            [session_id],
            |row| row.get(0),
        )?;

        if sum.is_finite() {
            Ok(sum)
        } else {
            tracing::error!("The balance of session {session_id} is not finite: {sum}");
            Err(Error::BalanceOverflow)
        }
    }
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL CHECK (length(title) > 0),
                amount REAL NOT NULL,
                session_id TEXT NOT NULL
                )",
        (),
    )?;

    // Every read filters on the session.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_session_id ON transactions(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let session_id = row.get(3)?;

    Ok(Transaction {
        id,
        title,
        amount,
        session_id,
    })
}
