//! Use case: apply a validated status transition.

use common::OrderId;

use crate::error::{DomainError, Result};
use crate::gateway::OrderStore;
use crate::order::{Order, OrderStatus};

/// The status transition engine.
///
/// Loads the order and moves it to the target status, re-reading the
/// current status immediately before mutating: the payment gate
/// already rejected `current == target`, but a racing writer may have
/// applied the same target in between, and the re-check turns that
/// race into the same benign [`DomainError::AlreadyInStatus`] outcome.
///
/// Returns the mutated aggregate; persisting and publishing are the
/// caller's responsibility.
pub async fn update_order_status(
    order_id: OrderId,
    target: OrderStatus,
    orders: &impl OrderStore,
) -> Result<Order> {
    let mut order = orders
        .find_by_id(order_id)
        .await?
        .ok_or(DomainError::OrderNotFound(order_id))?;

    order.transition_to(target)?;

    tracing::info!(%order_id, status = %target, "order status updated");
    Ok(order)
}
