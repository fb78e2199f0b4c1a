//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::ErrorCode;
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry a valid session cookie.
    ///
    /// Read-only routes require a session since there is nothing to show a
    /// client that has never created a transaction.
    #[error("Unauthorized.")]
    Unauthorized,

    /// An empty or blank string was used as a transaction title.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// The amount given for a new transaction was zero, negative, not a
    /// number, or larger than [crate::transaction::MAX_MAGNITUDE].
    ///
    /// The sign of a stored amount is derived from the transaction type, so
    /// the client must always send a positive magnitude.
    #[error(
        "{0} is not a valid amount, amounts must be positive numbers no greater than {max:e}",
        max = crate::transaction::MAX_MAGNITUDE
    )]
    InvalidAmount(f64),

    /// The requested resource was not found.
    ///
    /// For transactions this also covers the case where the transaction
    /// exists but belongs to another session, so that clients cannot learn
    /// which IDs other sessions own.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A row violated a table constraint, e.g. a duplicate primary key or an
    /// empty title.
    ///
    /// IDs are random, so a duplicate ID indicates a bug rather than
    /// something the client can fix by retrying.
    #[error("a database constraint was violated: {0}")]
    ConstraintViolation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The sum of a session's amounts is not a finite number.
    #[error("the balance of the session is too large to represent")]
    BalanceOverflow,

    /// The request body is larger than the server accepts.
    #[error("request body is larger than {0} bytes")]
    PayloadTooLarge(usize),

    /// A request or response body could not be read while logging it.
    #[error("could not read body: {0}")]
    BodyReadError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, description)
                if sql_error.code == ErrorCode::ConstraintViolation =>
            {
                Error::ConstraintViolation(
                    description.unwrap_or_else(|| sql_error.to_string()),
                )
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::EmptyTitle | Error::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new(
                        "An unexpected error occurred, check the server logs for more details.",
                    )),
                )
                    .into_response();
            }
        };

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
