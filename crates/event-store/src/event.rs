use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EventId, OrderId, SagaStatus, TransactionId};

/// Append position assigned by the store.
///
/// Sequences grow with every append and break ties between entries that
/// share a `created_at`: the greater sequence is the more recent entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Sequence(i64);

impl Sequence {
    /// Creates a sequence from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the sequence that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw sequence value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Sequence {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One step outcome as reported by the service that performed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub source: String,
    pub status: SagaStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        source: impl Into<String>,
        status: SagaStatus,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            status,
            message: message.into(),
            created_at,
        }
    }
}

/// A single saga step notification.
///
/// Immutable once appended. `event_id` and `created_at` are assigned by the
/// orchestration core; whatever a caller puts there is overwritten before
/// the append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SagaEvent {
    /// Identifier of this entry, assigned on append.
    #[serde(default)]
    pub event_id: EventId,

    /// The order this saga fulfills.
    pub order_id: OrderId,

    /// The saga instance this entry belongs to.
    pub transaction_id: TransactionId,

    /// The service that produced the notification (e.g. `PAYMENT_SERVICE`).
    pub source: String,

    /// The step outcome.
    pub status: SagaStatus,

    /// Step payload, opaque to the ledger.
    #[serde(default)]
    pub payload: serde_json::Value,

    /// Step outcomes accumulated by participants so far.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    /// When the entry was appended.
    #[serde(default)]
    pub created_at: DateTime<Utc>,

    /// Append position, `None` until stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

impl SagaEvent {
    /// Creates an unstamped, unstored event with an empty payload.
    pub fn new(
        order_id: impl Into<OrderId>,
        transaction_id: impl Into<TransactionId>,
        source: impl Into<String>,
        status: SagaStatus,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            order_id: order_id.into(),
            transaction_id: transaction_id.into(),
            source: source.into(),
            status,
            payload: serde_json::Value::Null,
            history: Vec::new(),
            created_at: DateTime::<Utc>::default(),
            sequence: None,
        }
    }

    /// Sets the payload from a serializable value.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.payload = serde_json::to_value(payload)?;
        Ok(self)
    }

    /// Sets the payload from a raw JSON value.
    pub fn with_payload_raw(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Appends a history entry.
    pub fn with_history(mut self, entry: HistoryEntry) -> Self {
        self.history.push(entry);
        self
    }

    /// Sets `created_at`. Only meaningful for stores and tests; the
    /// orchestration core always overwrites it.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Recency key: `created_at` first, append sequence second.
    pub fn recency(&self) -> (DateTime<Utc>, Option<Sequence>) {
        (self.created_at, self.sequence)
    }
}
