//! Payment status machine.

use serde::{Deserialize, Serialize};

/// The status of a payment attempt.
///
/// State transitions:
/// ```text
/// Pending ──┬──► Success
///           └──► Fail
/// ```
/// There is no way back to `Pending`. A retried saga gets a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment has been registered but not settled.
    #[default]
    Pending,

    /// Payment was realized (terminal state).
    Success,

    /// Payment was refused (terminal state).
    Fail,
}

impl PaymentStatus {
    /// Returns true if a record in this status may move to `next`.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Success)
                | (PaymentStatus::Pending, PaymentStatus::Fail)
        )
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Success | PaymentStatus::Fail)
    }

    /// Returns the state name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "SUCCESS" => Ok(PaymentStatus::Success),
            "FAIL" => Ok(PaymentStatus::Fail),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}
