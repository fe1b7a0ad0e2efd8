//! Payment error types.

use common::{OrderId, TransactionId};
use thiserror::Error;

use crate::record::PaymentId;
use crate::status::PaymentStatus;

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The request violates a precondition. Nothing was persisted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The status change is not allowed.
    #[error("Invalid status transition: cannot move payment from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    /// No payment exists for the saga.
    #[error("Payment not found for order {order_id} and transaction {transaction_id}")]
    NotFound {
        order_id: OrderId,
        transaction_id: TransactionId,
    },

    /// A payment already exists for the saga.
    #[error("Payment already exists for order {order_id} and transaction {transaction_id}")]
    Duplicate {
        order_id: OrderId,
        transaction_id: TransactionId,
    },

    /// Another writer updated the record first.
    #[error(
        "Concurrency conflict for payment {payment_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        payment_id: PaymentId,
        expected: i64,
        actual: i64,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored row could not be turned back into a payment.
    #[error("Corrupt payment row: {0}")]
    CorruptRow(String),
}

/// Convenience type alias for payment results.
pub type Result<T> = std::result::Result<T, PaymentError>;
