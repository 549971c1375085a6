//! Use cases of the order lifecycle.
//!
//! Each use case is a free function taking its collaborators as
//! explicit gateway arguments; there is no hidden state and no
//! container, which keeps every one of them unit-testable in
//! isolation.

mod apply_discount;
mod create_order;
mod get_order;
mod payment_gate;
mod publish_events;
mod update_status;
mod validate_items;

pub use apply_discount::apply_discount;
pub use create_order::{CreateOrderInput, OrderItemInput, create_order};
pub use get_order::get_order_by_id;
pub use payment_gate::ensure_order_payment_is_valid;
pub use publish_events::{
    publish_order_canceled_event, publish_order_created_event, publish_order_ready_event,
};
pub use update_status::update_order_status;
pub use validate_items::ensure_valid_order_items;
