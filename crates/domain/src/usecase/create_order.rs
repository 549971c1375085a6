//! Use case: create an order aggregate from request input.

use crate::error::Result;
use crate::order::{Money, Order, OrderItem};

/// One requested order line.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub observation: Option<String>,
}

/// Input for order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub customer_id: String,
    pub items: Vec<OrderItemInput>,
}

/// Builds a new order aggregate from the input, enforcing the
/// aggregate's construction rules. Malformed input fails here, before
/// any collaborator is consulted.
pub fn create_order(input: CreateOrderInput) -> Result<Order> {
    tracing::info!(customer_id = %input.customer_id, "creating new order");

    let items = input
        .items
        .into_iter()
        .map(|item| {
            OrderItem::new(
                item.product_id,
                item.name,
                item.quantity,
                item.unit_price,
                item.observation,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Order::new(input.customer_id, items)
}
