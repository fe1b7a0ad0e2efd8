//! Saga orchestration core for order fulfillment.
//!
//! The core is a passive ledger. It records every step notification a
//! participant reports and answers "what is the latest state of this saga"
//! by order id or by transaction id. It never decides the next step and
//! never compensates; those decisions belong to whatever consumes the ledger.
//!
//! - [`EventService`] records and looks up saga events.
//! - [`OrderService`] is the inbound trigger that opens a saga.
//! - [`SagaProgress`] is a read-only summary of one saga's trail.

pub mod error;
pub mod order;
pub mod progress;
pub mod service;

pub use error::{LookupKey, Result, SagaError};
pub use order::{ORDER_SOURCE, Order, OrderProduct, OrderRequest, OrderService, Product};
pub use progress::SagaProgress;
pub use service::EventService;
