//! Order aggregate and related types.

mod aggregate;
mod events;
mod status;
mod value_objects;

pub use aggregate::Order;
pub use events::{
    OrderCanceledEvent, OrderCreatedEvent, OrderItemSnapshot, OrderReadyEvent, READY_AT_FORMAT,
};
pub use status::OrderStatus;
pub use value_objects::{Money, OrderItem};
