//! Inbound trigger: order placement opens a saga.

use chrono::{DateTime, Utc};
use common::{OrderId, SagaStatus, SharedClock, TransactionId};
use event_store::{EventStore, HistoryEntry, SagaEvent};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SagaError};
use crate::service::EventService;

/// Source name stamped on events produced by order placement.
pub const ORDER_SOURCE: &str = "ORDER_SERVICE";

/// A product as priced at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub code: String,
    pub unit_value: f64,
}

/// A product line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub product: Product,
    pub quantity: i64,
}

impl OrderProduct {
    pub fn new(code: impl Into<String>, unit_value: f64, quantity: i64) -> Self {
        Self {
            product: Product {
                code: code.into(),
                unit_value,
            },
            quantity,
        }
    }

    /// Line total.
    pub fn amount(&self) -> f64 {
        self.product.unit_value * self.quantity as f64
    }
}

/// Request to place an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub products: Vec<OrderProduct>,
}

impl OrderRequest {
    pub fn new(products: Vec<OrderProduct>) -> Self {
        Self { products }
    }

    fn validate(&self) -> Result<()> {
        if self.products.is_empty() {
            return Err(SagaError::Validation(
                "order must contain at least one product".to_string(),
            ));
        }

        for line in &self.products {
            if line.product.code.trim().is_empty() {
                return Err(SagaError::Validation(
                    "product code must be informed".to_string(),
                ));
            }
            if line.quantity < 0 {
                return Err(SagaError::Validation(format!(
                    "quantity of {} must not be negative, got {}",
                    line.product.code, line.quantity
                )));
            }
            if !line.product.unit_value.is_finite() || line.product.unit_value < 0.0 {
                return Err(SagaError::Validation(format!(
                    "unit value of {} must be a non-negative number, got {}",
                    line.product.code, line.product.unit_value
                )));
            }
        }
        Ok(())
    }
}

/// A placed order. Carried as the payload of the saga's first event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub products: Vec<OrderProduct>,
    pub created_at: DateTime<Utc>,
    pub transaction_id: TransactionId,
    pub total_amount: f64,
    pub total_items: i64,
}

impl Order {
    fn place(request: OrderRequest, now: DateTime<Utc>) -> Result<Self> {
        let total_items = request
            .products
            .iter()
            .try_fold(0i64, |total, line| total.checked_add(line.quantity))
            .ok_or_else(|| SagaError::Validation("total item count is too large".to_string()))?;

        let total_amount: f64 = request.products.iter().map(OrderProduct::amount).sum();
        if !total_amount.is_finite() {
            return Err(SagaError::Validation(
                "total amount is too large".to_string(),
            ));
        }

        Ok(Self {
            id: OrderId::generate(),
            products: request.products,
            created_at: now,
            transaction_id: TransactionId::generate(now),
            total_amount,
            total_items,
        })
    }
}

/// Places orders and opens their sagas on the ledger.
pub struct OrderService<S: EventStore> {
    events: EventService<S>,
    clock: SharedClock,
}

impl<S: EventStore> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S, clock: SharedClock) -> Self {
        Self {
            events: EventService::new(store, clock.clone()),
            clock,
        }
    }

    /// Returns the event service the orders are recorded through.
    pub fn events(&self) -> &EventService<S> {
        &self.events
    }

    /// Places an order and appends the `Started` event of its saga.
    #[tracing::instrument(skip(self, request), fields(products = request.products.len()))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order> {
        request.validate()?;

        let now = self.clock.stamp();
        let order = Order::place(request, now)?;

        let event = SagaEvent::new(
            order.id.clone(),
            order.transaction_id.clone(),
            ORDER_SOURCE,
            SagaStatus::Started,
        )
        .with_payload(&order)?
        .with_history(HistoryEntry::new(
            ORDER_SOURCE,
            SagaStatus::Started,
            "saga started",
            now,
        ));

        self.events.record_started(event).await?;

        tracing::info!(
            order_id = %order.id,
            transaction_id = %order.transaction_id,
            total_items = order.total_items,
            "order placed"
        );
        Ok(order)
    }
}
