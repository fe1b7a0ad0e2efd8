//! Read-only summary of one saga's trail.

use chrono::{DateTime, Utc};
use common::{OrderId, SagaStatus, TransactionId};
use event_store::SagaEvent;
use serde::{Deserialize, Serialize};

/// Where a saga stands, as observed through its events.
///
/// Derived from the trail on every read. The ledger records whatever status
/// participants report, so a non-terminal saga may simply be waiting for a
/// notification that never arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SagaProgress {
    pub order_id: OrderId,
    pub transaction_id: TransactionId,
    /// Status of the most recent event.
    pub current_status: SagaStatus,
    /// Source of the most recent event.
    pub last_source: String,
    pub is_terminal: bool,
    pub has_failure: bool,
    /// Number of events recorded for the saga.
    pub steps: usize,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SagaProgress {
    /// Builds the summary from a trail ordered oldest first.
    ///
    /// Returns `None` for an empty trail.
    pub fn from_trail(trail: &[SagaEvent]) -> Option<Self> {
        let first = trail.first()?;
        let last = trail.last()?;

        Some(Self {
            order_id: last.order_id.clone(),
            transaction_id: last.transaction_id.clone(),
            current_status: last.status,
            last_source: last.source.clone(),
            is_terminal: last.status.is_terminal(),
            has_failure: trail.iter().any(|e| e.status.is_failure()),
            steps: trail.len(),
            started_at: first.created_at,
            updated_at: last.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn event(source: &str, status: SagaStatus, millis: i64) -> SagaEvent {
        SagaEvent::new("O1", "T1", source, status).with_created_at(at(millis))
    }

    #[test]
    fn test_empty_trail() {
        assert!(SagaProgress::from_trail(&[]).is_none());
    }

    #[test]
    fn test_pending_saga() {
        let trail = vec![event("ORDER_SERVICE", SagaStatus::Started, 100)];

        let progress = SagaProgress::from_trail(&trail).unwrap();
        assert_eq!(progress.current_status, SagaStatus::Started);
        assert_eq!(progress.steps, 1);
        assert!(!progress.is_terminal);
        assert!(!progress.has_failure);
        assert_eq!(progress.started_at, progress.updated_at);
    }

    #[test]
    fn test_rolled_back_saga() {
        let trail = vec![
            event("ORDER_SERVICE", SagaStatus::Started, 100),
            event("PAYMENT_SERVICE", SagaStatus::Fail, 200),
            event("ORCHESTRATOR", SagaStatus::RolledBack, 300),
        ];

        let progress = SagaProgress::from_trail(&trail).unwrap();
        assert_eq!(progress.current_status, SagaStatus::RolledBack);
        assert_eq!(progress.last_source, "ORCHESTRATOR");
        assert!(progress.is_terminal);
        assert!(progress.has_failure);
        assert_eq!(progress.steps, 3);
        assert_eq!(progress.started_at, at(100));
        assert_eq!(progress.updated_at, at(300));
    }
}
