use serde::{Deserialize, Serialize};

/// Lookup filters for the "latest entry" query.
///
/// Both keys are optional. A key that is absent, empty, or whitespace only
/// counts as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilters {
    /// Filter by order id.
    pub order_id: Option<String>,

    /// Filter by transaction id.
    pub transaction_id: Option<String>,
}

impl EventFilters {
    /// Creates filters with no key supplied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates filters for an order id.
    pub fn for_order(order_id: impl Into<String>) -> Self {
        Self::new().order_id(order_id)
    }

    /// Creates filters for a transaction id.
    pub fn for_transaction(transaction_id: impl Into<String>) -> Self {
        Self::new().transaction_id(transaction_id)
    }

    /// Sets the order id.
    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Sets the transaction id.
    pub fn transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Returns the order id if one was supplied.
    pub fn supplied_order_id(&self) -> Option<&str> {
        supplied(&self.order_id)
    }

    /// Returns the transaction id if one was supplied.
    pub fn supplied_transaction_id(&self) -> Option<&str> {
        supplied(&self.transaction_id)
    }

    /// Returns true if neither key was supplied.
    pub fn is_empty(&self) -> bool {
        self.supplied_order_id().is_none() && self.supplied_transaction_id().is_none()
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
