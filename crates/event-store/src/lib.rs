//! Append-only ledger of saga step notifications.
//!
//! Entries are never updated or deleted. "Latest" always means greatest
//! `created_at`, with ties going to the entry appended last.

pub mod error;
pub mod event;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod store;

pub use common::{EventId, OrderId, SagaStatus, TransactionId};
pub use error::{EventStoreError, Result};
pub use event::{HistoryEntry, SagaEvent, Sequence};
pub use memory::InMemoryEventStore;
pub use postgres::PostgresEventStore;
pub use query::EventFilters;
pub use store::{EventStore, EventStream};
