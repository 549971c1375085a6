//! Use case: decide whether a status transition is permitted given
//! the order's payment state.

use common::OrderId;

use crate::error::{DomainError, Result};
use crate::gateway::{OrderStore, PaymentLookup, PaymentStatus};
use crate::order::OrderStatus;

/// The payment gate.
///
/// Checks, in order:
/// 1. the order exists;
/// 2. the order is not already at the target status — duplicate
///    deliveries surface here as [`DomainError::AlreadyInStatus`] and
///    are absorbed by the caller, with no side effects;
/// 3. the payment snapshot permits the transition: with no payment
///    only `Received` is allowed, with an unapproved payment nothing
///    is.
///
/// A pure gate: on success nothing has been mutated; the status
/// transition engine does the mutation afterwards.
pub async fn ensure_order_payment_is_valid(
    order_id: OrderId,
    target: OrderStatus,
    payments: &impl PaymentLookup,
    orders: &impl OrderStore,
) -> Result<()> {
    let order = orders
        .find_by_id(order_id)
        .await?
        .ok_or(DomainError::OrderNotFound(order_id))?;

    if order.status() == target {
        return Err(DomainError::AlreadyInStatus {
            order_id,
            status: target,
        });
    }

    match payments.get_order_status(order_id).await? {
        None if target == OrderStatus::Received => Ok(()),
        None => Err(DomainError::PaymentNotEligible(
            "order payment does not exist".to_string(),
        )),
        Some(payment) if payment.status != PaymentStatus::Approved => {
            Err(DomainError::PaymentNotEligible(format!(
                "only paid orders may transition to status: {target}"
            )))
        }
        Some(_) => Ok(()),
    }
}
