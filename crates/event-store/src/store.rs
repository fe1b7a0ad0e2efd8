use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{OrderId, Result, SagaEvent, TransactionId};

/// A stream of ledger entries, most recent first.
pub type EventStream<'a> = Pin<Box<dyn Stream<Item = Result<SagaEvent>> + Send + 'a>>;

/// Core trait for saga ledger backends.
///
/// "Latest" is the entry with the greatest `created_at`; entries with equal
/// timestamps are ordered by append sequence, so the one appended last wins.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends an entry unconditionally.
    ///
    /// No deduplication and no identifier validation. Returns the stored
    /// entry with its sequence assigned.
    async fn append(&self, event: SagaEvent) -> Result<SagaEvent>;

    /// Returns the most recent entry for an order.
    async fn latest_by_order_id(&self, order_id: &OrderId) -> Result<Option<SagaEvent>>;

    /// Returns the most recent entry for a saga instance.
    async fn latest_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<SagaEvent>>;

    /// Returns the full ledger, most recent first.
    ///
    /// Every call reads the current state of the store.
    async fn list_all(&self) -> Result<Vec<SagaEvent>>;

    /// Streams the full ledger in the same order as [`EventStore::list_all`].
    fn stream_all(&self) -> EventStream<'_>;

    /// Returns every entry of one saga instance, oldest first.
    async fn history_for_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Vec<SagaEvent>>;

    /// Returns the number of stored entries.
    async fn event_count(&self) -> Result<usize>;
}
