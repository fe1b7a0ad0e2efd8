//! In-memory payment repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, TransactionId};
use tokio::sync::RwLock;

use crate::error::{PaymentError, Result};
use crate::record::Payment;
use crate::repository::PaymentRepository;

type Key = (OrderId, TransactionId);

/// In-memory payment repository for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<Key, Payment>>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn payment_count(&self) -> usize {
        self.payments.read().await.len()
    }
}

fn key_of(payment: &Payment) -> Key {
    (payment.order_id.clone(), payment.transaction_id.clone())
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        let key = key_of(&payment);

        if payments.contains_key(&key) {
            return Err(PaymentError::Duplicate {
                order_id: key.0,
                transaction_id: key.1,
            });
        }

        payments.insert(key, payment.clone());
        Ok(payment)
    }

    async fn update(&self, payment: Payment, expected_version: i64) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        let key = key_of(&payment);

        let stored = payments.get_mut(&key).ok_or_else(|| PaymentError::NotFound {
            order_id: key.0.clone(),
            transaction_id: key.1.clone(),
        })?;

        if stored.version != expected_version {
            return Err(PaymentError::ConcurrencyConflict {
                payment_id: stored.id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        *stored = payment.clone();
        Ok(payment)
    }

    async fn find(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
    ) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments
            .get(&(order_id.clone(), transaction_id.clone()))
            .cloned())
    }
}
