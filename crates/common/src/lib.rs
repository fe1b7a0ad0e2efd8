//! Shared types for the saga ledger and its participants.

pub mod clock;
pub mod status;
pub mod types;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use status::SagaStatus;
pub use types::{EventId, OrderId, TransactionId};
