use serde::{Deserialize, Serialize};

/// Unique identifier for a persisted order.
///
/// Wraps the numeric key assigned by the order store on first save.
/// An order that has not been saved yet has no `OrderId` at all
/// (`Option<OrderId>` on the aggregate), so a constructed value always
/// refers to a stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates an order ID from a raw store key.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric key.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}
