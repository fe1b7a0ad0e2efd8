//! Payment status records.

use chrono::{DateTime, Duration, Utc};
use common::{Clock, OrderId, TransactionId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PaymentError, Result};
use crate::status::PaymentStatus;

/// Unique identifier for a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random payment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a payment ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request to register a payment attempt for a saga.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub order_id: OrderId,
    pub transaction_id: TransactionId,
    pub total_items: i64,
    pub total_amount: f64,
    /// Ignored: new records always start `Pending`.
    #[serde(default)]
    pub status: Option<PaymentStatus>,
}

impl NewPayment {
    pub fn new(
        order_id: impl Into<OrderId>,
        transaction_id: impl Into<TransactionId>,
        total_items: i64,
        total_amount: f64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            transaction_id: transaction_id.into(),
            total_items,
            total_amount,
            status: None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.order_id.is_blank() {
            return Err(PaymentError::Validation("orderId must be informed".into()));
        }
        if self.transaction_id.is_blank() {
            return Err(PaymentError::Validation(
                "transactionId must be informed".into(),
            ));
        }
        if self.total_items < 0 {
            return Err(PaymentError::Validation(format!(
                "totalItems must not be negative, got {}",
                self.total_items
            )));
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(PaymentError::Validation(format!(
                "totalAmount must be a non-negative number, got {}",
                self.total_amount
            )));
        }
        Ok(())
    }
}

/// One payment attempt tied to a saga instance.
///
/// Only [`Payment::create`] and [`Payment::transition`] produce records;
/// `created_at` never changes after creation and `updated_at` moves on
/// every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub transaction_id: TransactionId,
    pub total_items: i64,
    pub total_amount: f64,
    pub status: PaymentStatus,
    /// Bumped on every transition; repositories use it to serialize writers.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Builds a new `Pending` record, whatever status the request carries.
    pub fn create(request: NewPayment, clock: &dyn Clock) -> Result<Self> {
        request.validate()?;

        let now = clock.stamp();
        Ok(Self {
            id: PaymentId::new(),
            order_id: request.order_id,
            transaction_id: request.transaction_id,
            total_items: request.total_items,
            total_amount: request.total_amount,
            status: PaymentStatus::Pending,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves the record to `next`, refreshing `updated_at`.
    ///
    /// `updated_at` always moves strictly forward, even when the clock has
    /// not advanced since the previous write.
    pub fn transition(mut self, next: PaymentStatus, clock: &dyn Clock) -> Result<Self> {
        if !self.status.can_transition_to(next) {
            return Err(PaymentError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.version += 1;
        self.updated_at = clock
            .stamp()
            .max(self.updated_at + Duration::microseconds(1));
        Ok(self)
    }
}
