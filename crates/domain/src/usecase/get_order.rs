//! Use case: load an order by id.

use common::OrderId;

use crate::error::{DomainError, Result};
use crate::gateway::OrderStore;
use crate::order::Order;

/// Loads an order, failing with the not-found kind when it does not
/// exist.
pub async fn get_order_by_id(order_id: OrderId, orders: &impl OrderStore) -> Result<Order> {
    orders
        .find_by_id(order_id)
        .await?
        .ok_or(DomainError::OrderNotFound(order_id))
}
