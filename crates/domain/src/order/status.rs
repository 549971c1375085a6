//! Order status state machine.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// The status of an order in its lifecycle.
///
/// Progression:
/// ```text
/// Received ──► Preparing ──► Ready ──► Completed
///     │            │           │
///     └────────────┴───────────┴──► Cancelled
/// ```
///
/// Each status carries a stable numeric code that is part of the
/// external contract (persisted and sent over the wire). Codes must
/// never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order accepted, awaiting payment.
    #[default]
    Received,

    /// Payment approved, kitchen is working on it.
    Preparing,

    /// Order is ready for pickup.
    Ready,

    /// Order was delivered to the customer (terminal).
    Completed,

    /// Order was cancelled (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns the stable numeric code for this status.
    pub fn code(&self) -> i32 {
        match self {
            OrderStatus::Received => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::Completed => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    /// Resolves a status from its numeric code.
    ///
    /// Unknown codes are a validation failure, never a panic; codes
    /// arrive from the outside world (requests, stored rows).
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(OrderStatus::Received),
            2 => Ok(OrderStatus::Preparing),
            3 => Ok(OrderStatus::Ready),
            4 => Ok(OrderStatus::Completed),
            5 => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "invalid order status code: {other}"
            ))),
        }
    }

    /// Returns true if no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
