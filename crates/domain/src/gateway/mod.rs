//! Gateway traits for the core's external collaborators.
//!
//! The core talks to the outside world only through these narrow
//! contracts; transport, storage, and serialization details are the
//! implementor's concern. In-memory implementations live in
//! [`memory`] and back the tests and the default server state.

pub mod memory;

use async_trait::async_trait;
use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::order::{Money, Order, OrderCanceledEvent, OrderCreatedEvent, OrderReadyEvent};

/// Point-in-time product data fetched for one validation pass.
///
/// Snapshots are read at validation time and never cached across
/// calls; the core does not assume they stay valid afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub product_id: i64,
    pub name: String,
    pub unit_price: Money,
    pub active: bool,
    pub category_active: bool,
    pub stock_quantity: u32,
}

/// Payment state of an order as reported by the payment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Approved,
    Pending,
    Rejected,
}

/// Snapshot of an order's payment, read once per gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSnapshot {
    pub order_id: OrderId,
    pub status: PaymentStatus,
}

/// Persistence for order aggregates.
///
/// `save` must be atomic per order row and is expected to provide at
/// least serializable-per-row update semantics (optimistic version
/// check or row lock); the core relies on that for concurrent
/// transition requests and does not lock anything itself.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Loads an order by id, or `None` when it does not exist.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Persists the order, assigning its id, line-item ids, and
    /// timestamps on first save. Returns the saved aggregate.
    async fn save(&self, order: Order) -> Result<Order>;
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Returns snapshots for the given product ids. Ids without a
    /// matching product are simply absent from the result.
    async fn find_by_product_ids(&self, product_ids: &[i64]) -> Result<Vec<CatalogSnapshot>>;
}

/// Read access to the payment service.
#[async_trait]
pub trait PaymentLookup: Send + Sync {
    /// Returns the payment snapshot for an order, or `None` when no
    /// payment exists yet.
    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<PaymentSnapshot>>;
}

/// Downstream publisher for lifecycle events.
///
/// Fire-and-forget from the core's perspective: a failed publish is
/// logged by the caller and never retried.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish_created(&self, event: OrderCreatedEvent) -> Result<()>;
    async fn publish_canceled(&self, event: OrderCanceledEvent) -> Result<()>;
    async fn publish_ready(&self, event: OrderReadyEvent) -> Result<()>;
}

/// Customer attribute lookup, opaque to the core beyond the discount
/// it yields.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    /// Returns the customer's discount in basis points, or `None`
    /// when the customer gets no discount.
    async fn discount_bps(&self, customer_id: &str) -> Result<Option<u32>>;
}
