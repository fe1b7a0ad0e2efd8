//! Persistence seam for payment records.

use async_trait::async_trait;
use common::{OrderId, TransactionId};

use crate::error::Result;
use crate::record::Payment;

/// Storage for payment status records.
///
/// A record is owned by the payment participant alone. Concurrent writers
/// are serialized through the record version: [`PaymentRepository::update`]
/// only succeeds against the version the writer read.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// Fails with `Duplicate` if a record already exists for the
    /// `(order_id, transaction_id)` pair.
    async fn insert(&self, payment: Payment) -> Result<Payment>;

    /// Replaces a record whose stored version is `expected_version`.
    ///
    /// Fails with `ConcurrencyConflict` if another writer got there first
    /// and with `NotFound` if the record does not exist.
    async fn update(&self, payment: Payment, expected_version: i64) -> Result<Payment>;

    /// Looks up the record for a saga.
    async fn find(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
    ) -> Result<Option<Payment>>;

    /// Returns true if a record exists for the saga.
    async fn exists(&self, order_id: &OrderId, transaction_id: &TransactionId) -> Result<bool> {
        Ok(self.find(order_id, transaction_id).await?.is_some())
    }
}
