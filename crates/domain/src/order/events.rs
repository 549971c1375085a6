//! Lifecycle event snapshots.
//!
//! Events are immutable value snapshots built from the aggregate and
//! handed to the event sink. They carry only primitive, string, and
//! money fields; no event holds a reference back into the aggregate,
//! and mapping never mutates the source order.

use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

use super::{Order, OrderItem, value_objects::Money};

/// Format of [`OrderReadyEvent::ready_at`]. This exact pattern is a
/// wire contract with the notification consumer; do not change it.
pub const READY_AT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Snapshot of one order line inside an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemSnapshot {
    pub id: Option<i64>,
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
    pub observation: Option<String>,
}

impl From<&OrderItem> for OrderItemSnapshot {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal(),
            observation: item.observation.clone(),
        }
    }
}

/// Emitted once when an order has been created and saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order_id: OrderId,
    pub order_number: String,
    pub status: String,
    pub customer_id: String,
    pub total: Money,
    pub items: Vec<OrderItemSnapshot>,
}

impl OrderCreatedEvent {
    /// Builds the creation snapshot from a saved order.
    pub fn from_order(order: &Order) -> Result<Self> {
        Ok(Self {
            order_id: persisted_id(order)?,
            order_number: order.order_number().to_string(),
            status: order.status().label().to_string(),
            customer_id: order.customer_id().to_string(),
            total: order.total(),
            items: order.items().iter().map(OrderItemSnapshot::from).collect(),
        })
    }
}

/// Emitted when an order is cancelled; carries the item snapshot the
/// catalog consumer needs to reverse stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCanceledEvent {
    pub order_id: OrderId,
    pub items: Vec<OrderItemSnapshot>,
}

impl OrderCanceledEvent {
    /// Builds the cancellation snapshot from a saved order.
    pub fn from_order(order: &Order) -> Result<Self> {
        Ok(Self {
            order_id: persisted_id(order)?,
            items: order.items().iter().map(OrderItemSnapshot::from).collect(),
        })
    }
}

/// Emitted when an order becomes ready for pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReadyEvent {
    pub customer_id: String,
    pub order_number: String,
    pub amount: Money,
    /// Local-clock readiness timestamp in [`READY_AT_FORMAT`].
    pub ready_at: String,
}

impl OrderReadyEvent {
    /// Builds the readiness snapshot; the caller stamps `ready_at` at
    /// the moment of transition.
    pub fn from_order(order: &Order, ready_at: String) -> Self {
        Self {
            customer_id: order.customer_id().to_string(),
            order_number: order.order_number().to_string(),
            amount: order.total(),
            ready_at,
        }
    }
}

fn persisted_id(order: &Order) -> Result<OrderId> {
    order.id().ok_or_else(|| {
        DomainError::validation("order must be persisted before emitting events")
    })
}
