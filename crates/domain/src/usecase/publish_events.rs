//! Use cases: emit lifecycle events to the event sink.
//!
//! Publication is fire-and-forget: a sink failure is logged and
//! swallowed, never retried, and never fails the surrounding
//! operation. Only building the snapshot can fail (unsaved order).

use crate::error::Result;
use crate::gateway::EventSink;
use crate::order::{
    Order, OrderCanceledEvent, OrderCreatedEvent, OrderReadyEvent, READY_AT_FORMAT,
};

/// Publishes the creation event for a saved order.
pub async fn publish_order_created_event(order: &Order, sink: &impl EventSink) -> Result<()> {
    let event = OrderCreatedEvent::from_order(order)?;
    tracing::info!(order_id = %event.order_id, "publishing order created event");

    if let Err(err) = sink.publish_created(event).await {
        tracing::warn!(error = %err, "order created event delivery failed");
    }
    Ok(())
}

/// Publishes the cancellation event, carrying the item snapshot for
/// downstream stock reversal.
pub async fn publish_order_canceled_event(order: &Order, sink: &impl EventSink) -> Result<()> {
    let event = OrderCanceledEvent::from_order(order)?;
    tracing::info!(order_id = %event.order_id, "publishing order canceled event");

    if let Err(err) = sink.publish_canceled(event).await {
        tracing::warn!(error = %err, "order canceled event delivery failed");
    }
    Ok(())
}

/// Publishes the readiness event, stamping `ready_at` with the local
/// clock at the moment of transition.
pub async fn publish_order_ready_event(order: &Order, sink: &impl EventSink) -> Result<()> {
    let ready_at = chrono::Local::now().format(READY_AT_FORMAT).to_string();
    let event = OrderReadyEvent::from_order(order, ready_at);
    tracing::info!(order_number = %event.order_number, "publishing order ready event");

    if let Err(err) = sink.publish_ready(event).await {
        tracing::warn!(error = %err, "order ready event delivery failed");
    }
    Ok(())
}
