//! Order lifecycle core.
//!
//! The business rules of the food-order service: the order aggregate
//! and its invariants, item validation against the catalog, the
//! payment gate, the status transition engine with idempotent-conflict
//! absorption, discount application, and lifecycle event emission.
//!
//! Everything outside these rules — persistence, transport, the real
//! catalog and payment services — is reached only through the gateway
//! traits in [`gateway`].

pub mod error;
pub mod gateway;
pub mod order;
pub mod service;
pub mod usecase;

pub use error::{DomainError, ErrorKind, Result};
pub use order::{
    Money, Order, OrderCanceledEvent, OrderCreatedEvent, OrderItem, OrderItemSnapshot,
    OrderReadyEvent, OrderStatus, READY_AT_FORMAT,
};
pub use service::OrderLifecycle;
