//! Event service: the single entry point for recording and querying saga
//! progress.

use common::{EventId, OrderId, SharedClock, TransactionId};
use event_store::{EventFilters, EventStore, SagaEvent};

use crate::error::{LookupKey, Result, SagaError};
use crate::progress::SagaProgress;

/// Records step notifications and resolves "latest" lookups.
///
/// The service stamps `created_at` from its clock and assigns a fresh
/// `event_id` on every append, so the ordering of the ledger never depends
/// on caller-supplied time and a resent notification never collides.
pub struct EventService<S: EventStore> {
    store: S,
    clock: SharedClock,
}

impl<S: EventStore> EventService<S> {
    /// Creates a new event service over the given store.
    pub fn new(store: S, clock: SharedClock) -> Self {
        Self { store, clock }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Appends a participant's completion or failure notification.
    #[tracing::instrument(skip(self, event), fields(order_id = %event.order_id, transaction_id = %event.transaction_id, status = %event.status))]
    pub async fn record_completion(&self, event: SagaEvent) -> Result<SagaEvent> {
        let stored = self.stamp_and_append(event).await?;

        tracing::info!(
            transaction_id = %stored.transaction_id,
            "order {} with saga notified",
            stored.order_id
        );
        Ok(stored)
    }

    /// Appends the first event of a saga.
    #[tracing::instrument(skip(self, event), fields(order_id = %event.order_id, transaction_id = %event.transaction_id))]
    pub async fn record_started(&self, event: SagaEvent) -> Result<SagaEvent> {
        let stored = self.stamp_and_append(event).await?;

        tracing::info!("saga started");
        Ok(stored)
    }

    /// Returns the latest event matching the filters.
    ///
    /// The order id wins when both keys are supplied.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_filters(&self, filters: &EventFilters) -> Result<SagaEvent> {
        if let Some(order_id) = filters.supplied_order_id() {
            return self.find_by_order_id(&OrderId::new(order_id)).await;
        }
        if let Some(transaction_id) = filters.supplied_transaction_id() {
            return self
                .find_by_transaction_id(&TransactionId::new(transaction_id))
                .await;
        }

        Err(SagaError::Validation(
            "orderId or transactionId must be informed".to_string(),
        ))
    }

    /// Returns the latest event for an order.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_order_id(&self, order_id: &OrderId) -> Result<SagaEvent> {
        metrics::counter!("saga_event_lookups_total", "key" => LookupKey::OrderId.as_str())
            .increment(1);

        self.store
            .latest_by_order_id(order_id)
            .await?
            .ok_or_else(|| miss(LookupKey::OrderId, order_id.as_str()))
    }

    /// Returns the latest event for a saga instance.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_transaction_id(&self, transaction_id: &TransactionId) -> Result<SagaEvent> {
        metrics::counter!("saga_event_lookups_total", "key" => LookupKey::TransactionId.as_str())
            .increment(1);

        self.store
            .latest_by_transaction_id(transaction_id)
            .await?
            .ok_or_else(|| miss(LookupKey::TransactionId, transaction_id.as_str()))
    }

    /// Returns every event, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<SagaEvent>> {
        Ok(self.store.list_all().await?)
    }

    /// Returns one saga's events, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn history(&self, transaction_id: &TransactionId) -> Result<Vec<SagaEvent>> {
        Ok(self.store.history_for_transaction(transaction_id).await?)
    }

    /// Summarizes one saga's trail.
    #[tracing::instrument(skip(self))]
    pub async fn progress(&self, transaction_id: &TransactionId) -> Result<SagaProgress> {
        let trail = self.history(transaction_id).await?;
        SagaProgress::from_trail(&trail)
            .ok_or_else(|| miss(LookupKey::TransactionId, transaction_id.as_str()))
    }

    async fn stamp_and_append(&self, mut event: SagaEvent) -> Result<SagaEvent> {
        event.event_id = EventId::new();
        event.created_at = self.clock.stamp();
        let stored = self.store.append(event).await?;

        metrics::counter!("saga_events_recorded_total", "status" => stored.status.as_str())
            .increment(1);
        Ok(stored)
    }
}

fn miss(key: LookupKey, value: &str) -> SagaError {
    metrics::counter!("saga_event_lookup_misses_total", "key" => key.as_str()).increment(1);
    tracing::warn!(%key, value, "event not found");
    SagaError::not_found(key, value)
}
