//! Saga status as observed through the ledger.

use serde::{Deserialize, Serialize};

/// Status carried by a ledger entry.
///
/// Observed progression (recorded, never enforced):
/// ```text
/// Started ──┬──► Success ──► (next step) ... ──► Completed
///           └──► Fail ──► Compensating ... ──► RolledBack
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SagaStatus {
    /// The saga was triggered by an inbound order.
    Started,

    /// A participant finished its step.
    Success,

    /// A participant failed its step.
    Fail,

    /// Compensating actions are being applied.
    Compensating,

    /// Every step finished (terminal).
    Completed,

    /// Compensation finished after a failure (terminal).
    RolledBack,
}

impl SagaStatus {
    /// Returns true if no further entries are expected for the saga.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SagaStatus::Completed | SagaStatus::RolledBack)
    }

    /// Returns true if the saga is on its failure path.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SagaStatus::Fail | SagaStatus::Compensating | SagaStatus::RolledBack
        )
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SagaStatus::Started => "STARTED",
            SagaStatus::Success => "SUCCESS",
            SagaStatus::Fail => "FAIL",
            SagaStatus::Compensating => "COMPENSATING",
            SagaStatus::Completed => "COMPLETED",
            SagaStatus::RolledBack => "ROLLED_BACK",
        }
    }
}

impl std::fmt::Display for SagaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SagaStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STARTED" => Ok(SagaStatus::Started),
            "SUCCESS" => Ok(SagaStatus::Success),
            "FAIL" => Ok(SagaStatus::Fail),
            "COMPENSATING" => Ok(SagaStatus::Compensating),
            "COMPLETED" => Ok(SagaStatus::Completed),
            "ROLLED_BACK" => Ok(SagaStatus::RolledBack),
            other => Err(format!("unknown saga status: {other}")),
        }
    }
}
