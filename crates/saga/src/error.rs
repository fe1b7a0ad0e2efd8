//! Saga error types.

use event_store::EventStoreError;
use thiserror::Error;

/// The key a lookup was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKey {
    OrderId,
    TransactionId,
}

impl LookupKey {
    /// Returns the key name as used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKey::OrderId => "orderId",
            LookupKey::TransactionId => "transactionId",
        }
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during saga operations.
#[derive(Debug, Error)]
pub enum SagaError {
    /// The request violates a precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No event matches the key. The message names the key for operators.
    #[error("event not found by {key}")]
    NotFound { key: LookupKey, value: String },

    /// Event store error, passed through unchanged.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SagaError {
    pub(crate) fn not_found(key: LookupKey, value: impl Into<String>) -> Self {
        SagaError::NotFound {
            key,
            value: value.into(),
        }
    }
}

/// Convenience type alias for saga results.
pub type Result<T> = std::result::Result<T, SagaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_key() {
        let err = SagaError::not_found(LookupKey::OrderId, "missing");
        assert_eq!(err.to_string(), "event not found by orderId");

        let err = SagaError::not_found(LookupKey::TransactionId, "missing");
        assert_eq!(err.to_string(), "event not found by transactionId");
    }
}
