//! Order lifecycle orchestration.
//!
//! Wires the use cases together the way the inbound adapters need
//! them: creation with validation and discount, payment-gated status
//! updates with event emission, and the inbound event handlers for
//! payment and stock notifications.

use common::OrderId;

use crate::error::{DomainError, Result};
use crate::gateway::{CatalogLookup, CustomerLookup, EventSink, OrderStore, PaymentLookup};
use crate::order::{Order, OrderStatus};
use crate::usecase::{
    CreateOrderInput, apply_discount, create_order, ensure_order_payment_is_valid,
    ensure_valid_order_items, get_order_by_id, publish_order_canceled_event,
    publish_order_created_event, publish_order_ready_event, update_order_status,
};

/// High-level service over the order lifecycle, generic over the five
/// collaborator gateways.
pub struct OrderLifecycle<S, C, P, E, U> {
    orders: S,
    catalog: C,
    payments: P,
    events: E,
    customers: U,
}

impl<S, C, P, E, U> OrderLifecycle<S, C, P, E, U>
where
    S: OrderStore,
    C: CatalogLookup,
    P: PaymentLookup,
    E: EventSink,
    U: CustomerLookup,
{
    /// Creates a new lifecycle service over the given gateways.
    pub fn new(orders: S, catalog: C, payments: P, events: E, customers: U) -> Self {
        Self {
            orders,
            catalog,
            payments,
            events,
            customers,
        }
    }

    /// Creates, validates, discounts, saves, and announces a new
    /// order.
    #[tracing::instrument(skip(self, input))]
    pub async fn place_order(&self, input: CreateOrderInput) -> Result<Order> {
        let mut order = create_order(input)?;

        ensure_valid_order_items(order.items(), &self.catalog).await?;
        apply_discount(&mut order, &self.customers).await?;

        let saved = self.orders.save(order).await?;
        publish_order_created_event(&saved, &self.events).await?;

        tracing::info!(
            order_id = %saved.id().map(|id| id.to_string()).unwrap_or_default(),
            total = %saved.total(),
            "order created"
        );
        Ok(saved)
    }

    /// Runs a payment-gated status update.
    ///
    /// The idempotent-conflict outcome is absorbed here: when the
    /// order already has the target status, the current order is
    /// re-read and returned as a successful no-op, and no event is
    /// published. Callers handling repeated external deliveries must
    /// not treat that as a failure.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, order_id: OrderId, target: OrderStatus) -> Result<Order> {
        match self.gated_update(order_id, target).await {
            Ok(order) => Ok(order),
            Err(DomainError::AlreadyInStatus { status, .. }) => {
                tracing::info!(%order_id, %status, "order already at requested status");
                get_order_by_id(order_id, &self.orders).await
            }
            Err(err) => Err(err),
        }
    }

    /// Cancels an order in response to a stock reversal, absorbing
    /// repeats of the reversal event.
    #[tracing::instrument(skip(self))]
    pub async fn chargeback(&self, order_id: OrderId) -> Result<Order> {
        self.update_status(order_id, OrderStatus::Cancelled).await
    }

    /// Loads an order by id.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order> {
        get_order_by_id(order_id, &self.orders).await
    }

    /// Inbound handler: a payment was approved, start preparing.
    #[tracing::instrument(skip(self))]
    pub async fn handle_payment_approved(&self, order_id: OrderId) -> Result<Order> {
        tracing::info!(%order_id, "payment approved event received");
        self.update_status(order_id, OrderStatus::Preparing).await
    }

    /// Inbound handler: the payment window expired, cancel the order.
    #[tracing::instrument(skip(self))]
    pub async fn handle_payment_expired(&self, order_id: OrderId) -> Result<Order> {
        tracing::info!(%order_id, "payment expired event received");
        self.update_status(order_id, OrderStatus::Cancelled).await
    }

    /// Inbound handler: stock was reversed, charge the order back.
    #[tracing::instrument(skip(self))]
    pub async fn handle_stock_reversal(&self, order_id: OrderId) -> Result<Order> {
        tracing::info!(%order_id, "stock reversal event received");
        self.chargeback(order_id).await
    }

    async fn gated_update(&self, order_id: OrderId, target: OrderStatus) -> Result<Order> {
        ensure_order_payment_is_valid(order_id, target, &self.payments, &self.orders).await?;

        let order = update_order_status(order_id, target, &self.orders).await?;
        let saved = self.orders.save(order).await?;

        match saved.status() {
            OrderStatus::Cancelled => publish_order_canceled_event(&saved, &self.events).await?,
            OrderStatus::Ready => publish_order_ready_event(&saved, &self.events).await?,
            _ => {}
        }

        Ok(saved)
    }
}
