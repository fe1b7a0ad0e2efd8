use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{StreamExt, stream};
use tokio::sync::RwLock;

use crate::{
    OrderId, Result, SagaEvent, Sequence, TransactionId,
    store::{EventStore, EventStream},
};

/// In-memory ledger implementation for testing.
///
/// This implementation stores all events in memory and provides
/// the same ordering guarantees as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<SagaEvent>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }

    /// Returns the sequence that the next append will receive.
    pub async fn next_sequence(&self) -> Sequence {
        next_sequence(&self.events.read().await)
    }
}

fn next_sequence(events: &[SagaEvent]) -> Sequence {
    events
        .iter()
        .filter_map(|e| e.sequence)
        .max()
        .unwrap_or_default()
        .next()
}

fn latest<'a>(events: impl Iterator<Item = &'a SagaEvent>) -> Option<SagaEvent> {
    events.max_by_key(|e| e.recency()).cloned()
}

fn most_recent_first(mut events: Vec<SagaEvent>) -> Vec<SagaEvent> {
    events.sort_by_key(|e| Reverse(e.recency()));
    events
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, mut event: SagaEvent) -> Result<SagaEvent> {
        let mut store = self.events.write().await;
        event.sequence = Some(next_sequence(&store));
        store.push(event.clone());
        Ok(event)
    }

    async fn latest_by_order_id(&self, order_id: &OrderId) -> Result<Option<SagaEvent>> {
        let store = self.events.read().await;
        Ok(latest(store.iter().filter(|e| &e.order_id == order_id)))
    }

    async fn latest_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<SagaEvent>> {
        let store = self.events.read().await;
        Ok(latest(
            store.iter().filter(|e| &e.transaction_id == transaction_id),
        ))
    }

    async fn list_all(&self) -> Result<Vec<SagaEvent>> {
        let store = self.events.read().await;
        Ok(most_recent_first(store.clone()))
    }

    fn stream_all(&self) -> EventStream<'_> {
        let events = Arc::clone(&self.events);
        let snapshot = stream::once(async move { most_recent_first(events.read().await.clone()) });

        Box::pin(snapshot.flat_map(|events| stream::iter(events.into_iter().map(Ok))))
    }

    async fn history_for_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Vec<SagaEvent>> {
        let store = self.events.read().await;
        let mut events: Vec<_> = store
            .iter()
            .filter(|e| &e.transaction_id == transaction_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.recency());
        Ok(events)
    }

    async fn event_count(&self) -> Result<usize> {
        Ok(self.events.read().await.len())
    }
}
