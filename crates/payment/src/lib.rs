//! Payment participant of the order fulfillment saga.
//!
//! This crate provides:
//! - `Payment` status records with explicit create/transition functions
//! - `PaymentRepository` trait with in-memory and PostgreSQL backends
//! - `PaymentService`, which drives records and builds the ledger
//!   notification for each terminal outcome

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod repository;
pub mod service;
pub mod status;

pub use error::{PaymentError, Result};
pub use memory::InMemoryPaymentRepository;
pub use postgres::PostgresPaymentRepository;
pub use record::{NewPayment, Payment, PaymentId};
pub use repository::PaymentRepository;
pub use service::{PAYMENT_SOURCE, PaymentService};
pub use status::PaymentStatus;
