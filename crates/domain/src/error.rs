//! Domain error type.
//!
//! A single tagged enum carries every failure the core can raise.
//! Callers branch on [`DomainError::kind`] rather than matching
//! concrete variants, so boundary layers can map whole families of
//! failures uniformly (and treat [`ErrorKind::IdempotentConflict`] as
//! a benign no-op instead of an error).

use common::OrderId;
use thiserror::Error;

use crate::order::OrderStatus;

/// Errors raised by the order lifecycle core.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Order does not exist in the store.
    #[error("order not found with id: {0}")]
    OrderNotFound(OrderId),

    /// A business rule was violated. First violation wins; rules are
    /// never aggregated.
    #[error("{0}")]
    Validation(String),

    /// The order's payment state does not permit the requested
    /// transition.
    #[error("{0}")]
    PaymentNotEligible(String),

    /// The order already has the requested status. Duplicate external
    /// events (a payment notification delivered twice, a repeated
    /// stock reversal) surface as this outcome and are absorbed by the
    /// caller as success.
    #[error("order {order_id} already has status {status}")]
    AlreadyInStatus {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// A collaborator (store, catalog, payment, sink) failed.
    #[error("gateway error: {0}")]
    Gateway(String),
}

/// Coarse classification of a [`DomainError`], used by boundary layers
/// to pick a response without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    PaymentNotEligible,
    IdempotentConflict,
    Gateway,
}

impl DomainError {
    /// Returns the error's kind tag.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::OrderNotFound(_) => ErrorKind::NotFound,
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::PaymentNotEligible(_) => ErrorKind::PaymentNotEligible,
            DomainError::AlreadyInStatus { .. } => ErrorKind::IdempotentConflict,
            DomainError::Gateway(_) => ErrorKind::Gateway,
        }
    }

    /// Shorthand for a validation failure with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_variants() {
        assert_eq!(
            DomainError::OrderNotFound(OrderId::new(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DomainError::validation("bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            DomainError::PaymentNotEligible("unpaid".into()).kind(),
            ErrorKind::PaymentNotEligible
        );
        assert_eq!(
            DomainError::AlreadyInStatus {
                order_id: OrderId::new(1),
                status: OrderStatus::Cancelled,
            }
            .kind(),
            ErrorKind::IdempotentConflict
        );
        assert_eq!(
            DomainError::Gateway("down".into()).kind(),
            ErrorKind::Gateway
        );
    }

    #[test]
    fn already_in_status_message_names_order_and_status() {
        let err = DomainError::AlreadyInStatus {
            order_id: OrderId::new(7),
            status: OrderStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "order 7 already has status Cancelled");
    }
}
