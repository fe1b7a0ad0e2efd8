//! Payment participant service.

use common::{OrderId, SagaStatus, SharedClock, TransactionId};
use event_store::{HistoryEntry, SagaEvent};

use crate::error::{PaymentError, Result};
use crate::record::{NewPayment, Payment};
use crate::repository::PaymentRepository;
use crate::status::PaymentStatus;

/// Source name the payment participant stamps on its ledger notifications.
pub const PAYMENT_SOURCE: &str = "PAYMENT_SERVICE";

/// Drives payment records through their lifecycle.
///
/// Every mutation is validate → mutate → persist. The service never talks
/// to the ledger itself; it hands back the notification for the caller to
/// deliver.
pub struct PaymentService<R: PaymentRepository> {
    repository: R,
    clock: SharedClock,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service.
    pub fn new(repository: R, clock: SharedClock) -> Self {
        Self { repository, clock }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Registers a `Pending` payment for a saga.
    #[tracing::instrument(skip(self, request), fields(order_id = %request.order_id, transaction_id = %request.transaction_id))]
    pub async fn start_payment(&self, request: NewPayment) -> Result<Payment> {
        let payment = Payment::create(request, self.clock.as_ref())?;

        if self
            .repository
            .exists(&payment.order_id, &payment.transaction_id)
            .await?
        {
            return Err(PaymentError::Duplicate {
                order_id: payment.order_id,
                transaction_id: payment.transaction_id,
            });
        }

        let payment = self.repository.insert(payment).await?;

        metrics::counter!("payments_created_total").increment(1);
        tracing::info!(payment_id = %payment.id, "payment registered as pending");
        Ok(payment)
    }

    /// Marks the saga's payment as realized.
    pub async fn complete_payment(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
    ) -> Result<Payment> {
        self.settle(order_id, transaction_id, PaymentStatus::Success)
            .await
    }

    /// Marks the saga's payment as refused.
    pub async fn fail_payment(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
    ) -> Result<Payment> {
        self.settle(order_id, transaction_id, PaymentStatus::Fail)
            .await
    }

    /// Loads the saga's payment.
    pub async fn find_payment(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
    ) -> Result<Payment> {
        self.repository
            .find(order_id, transaction_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound {
                order_id: order_id.clone(),
                transaction_id: transaction_id.clone(),
            })
    }

    /// Builds the ledger notification for a settled payment.
    ///
    /// Pending payments have nothing to report and are rejected.
    pub fn notification(&self, payment: &Payment, message: impl Into<String>) -> Result<SagaEvent> {
        let status = match payment.status {
            PaymentStatus::Success => SagaStatus::Success,
            PaymentStatus::Fail => SagaStatus::Fail,
            PaymentStatus::Pending => {
                return Err(PaymentError::Validation(
                    "a pending payment has no outcome to notify".into(),
                ));
            }
        };

        let event = SagaEvent::new(
            payment.order_id.clone(),
            payment.transaction_id.clone(),
            PAYMENT_SOURCE,
            status,
        )
        .with_payload(payment)?
        .with_history(HistoryEntry::new(
            PAYMENT_SOURCE,
            status,
            message,
            self.clock.stamp(),
        ));

        Ok(event)
    }

    #[tracing::instrument(skip(self))]
    async fn settle(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
        next: PaymentStatus,
    ) -> Result<Payment> {
        let current = self.find_payment(order_id, transaction_id).await?;
        let expected_version = current.version;

        let updated = current.transition(next, self.clock.as_ref())?;
        let updated = self.repository.update(updated, expected_version).await?;

        metrics::counter!("payment_transitions_total", "status" => next.as_str()).increment(1);
        tracing::info!(payment_id = %updated.id, status = %next, "payment settled");
        Ok(updated)
    }
}
