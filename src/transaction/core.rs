//! Defines the core data models for transactions.

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, session::SessionId};

// ============================================================================
// MODELS
// ============================================================================

/// The globally unique ID of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Create a new, random transaction ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl ToSql for TransactionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for TransactionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<Uuid>()
            .map(Self)
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A non-empty description of what a transaction was for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionTitle(String);

impl TransactionTitle {
    /// Create a title.
    ///
    /// # Errors
    /// Returns [Error::EmptyTitle] if `title` is empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        if title.trim().is_empty() {
            Err(Error::EmptyTitle)
        } else {
            Ok(Self(title.to_owned()))
        }
    }

    /// Create a title without checking that it is non-empty.
    #[cfg(test)]
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_owned())
    }

    /// The title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ToSql for TransactionTitle {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for TransactionTitle {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(Self)
    }
}

/// The largest magnitude accepted for a single transaction.
///
/// Summing any realistic number of entries this size stays finite.
pub const MAX_MAGNITUDE: f64 = 1e15;

/// The unsigned size of a transaction as entered by the client.
///
/// Always finite, strictly positive and at most [MAX_MAGNITUDE], the sign of
/// the stored amount comes from the [TransactionType].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Magnitude(f64);

impl Magnitude {
    /// Create a magnitude.
    ///
    /// Fractional values are allowed.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `value` is zero, negative, NaN, or
    /// greater than [MAX_MAGNITUDE].
    pub fn new(value: f64) -> Result<Self, Error> {
        if value > 0.0 && value <= MAX_MAGNITUDE {
            Ok(Self(value))
        } else {
            Err(Error::InvalidAmount(value))
        }
    }

    /// The magnitude as a plain number.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Whether money came in or went out.
///
/// Only used at creation time to pick the sign of the amount, it is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, stored as a positive amount.
    Credit,
    /// Money spent, stored as a negative amount.
    Debit,
}

impl TransactionType {
    /// Apply the sign convention for this type to `magnitude`.
    pub fn signed_amount(self, magnitude: Magnitude) -> f64 {
        match self {
            TransactionType::Credit => magnitude.get(),
            TransactionType::Debit => -magnitude.get(),
        }
    }
}

/// An entry in the ledger, i.e. an event where money was either spent or earned.
///
/// Entries are immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub title: TransactionTitle,
    /// The amount of money earned (positive) or spent (negative).
    pub amount: f64,
    /// The session that owns this transaction.
    pub session_id: SessionId,
}

impl Transaction {
    /// Create a new transaction with a fresh ID, normalizing the sign of the
    /// amount according to `transaction_type`.
    pub fn new(
        title: TransactionTitle,
        magnitude: Magnitude,
        transaction_type: TransactionType,
        session_id: SessionId,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            title,
            amount: transaction_type.signed_amount(magnitude),
            session_id,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
