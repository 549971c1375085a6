//! In-memory gateway implementations.
//!
//! These back the test suites and the default server state. The order
//! store hands out sequential ids the way the real persistence row
//! keys would, and the event sink records everything it publishes so
//! tests can assert on emissions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;

use crate::error::{DomainError, Result};
use crate::order::{Order, OrderCanceledEvent, OrderCreatedEvent, OrderReadyEvent};

use super::{
    CatalogLookup, CatalogSnapshot, CustomerLookup, EventSink, OrderStore, PaymentLookup,
    PaymentSnapshot, PaymentStatus,
};

#[derive(Debug, Default)]
struct OrderStoreState {
    orders: HashMap<OrderId, Order>,
    next_order_id: i64,
    next_item_id: i64,
}

/// In-memory order store with sequential id assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<OrderStoreState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().unwrap().orders.get(&id).cloned())
    }

    async fn save(&self, mut order: Order) -> Result<Order> {
        let mut state = self.state.write().unwrap();

        let id = match order.id() {
            Some(id) => id,
            None => {
                state.next_order_id += 1;
                let id = OrderId::new(state.next_order_id);
                order.set_id(id);
                id
            }
        };

        for item in order.items_mut() {
            if item.id.is_none() {
                state.next_item_id += 1;
                item.id = Some(state.next_item_id);
            }
        }

        order.touch();
        state.orders.insert(id, order.clone());
        Ok(order)
    }
}

/// In-memory product catalog, seedable per test or at startup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<HashMap<i64, CatalogSnapshot>>>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a product snapshot.
    pub fn insert(&self, snapshot: CatalogSnapshot) {
        self.products
            .write()
            .unwrap()
            .insert(snapshot.product_id, snapshot);
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn find_by_product_ids(&self, product_ids: &[i64]) -> Result<Vec<CatalogSnapshot>> {
        let products = self.products.read().unwrap();
        Ok(product_ids
            .iter()
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }
}

/// In-memory payment registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayments {
    payments: Arc<RwLock<HashMap<OrderId, PaymentStatus>>>,
}

impl InMemoryPayments {
    /// Creates a new registry with no payments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the payment status for an order.
    pub fn set_status(&self, order_id: OrderId, status: PaymentStatus) {
        self.payments.write().unwrap().insert(order_id, status);
    }
}

#[async_trait]
impl PaymentLookup for InMemoryPayments {
    async fn get_order_status(&self, order_id: OrderId) -> Result<Option<PaymentSnapshot>> {
        Ok(self
            .payments
            .read()
            .unwrap()
            .get(&order_id)
            .map(|&status| PaymentSnapshot { order_id, status }))
    }
}

#[derive(Debug, Default)]
struct SinkState {
    created: Vec<OrderCreatedEvent>,
    canceled: Vec<OrderCanceledEvent>,
    ready: Vec<OrderReadyEvent>,
    fail_on_publish: bool,
}

/// Event sink that records every published event.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    state: Arc<RwLock<SinkState>>,
}

impl RecordingEventSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sink to fail every publish call.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns the recorded created events.
    pub fn created_events(&self) -> Vec<OrderCreatedEvent> {
        self.state.read().unwrap().created.clone()
    }

    /// Returns the recorded canceled events.
    pub fn canceled_events(&self) -> Vec<OrderCanceledEvent> {
        self.state.read().unwrap().canceled.clone()
    }

    /// Returns the recorded ready events.
    pub fn ready_events(&self) -> Vec<OrderReadyEvent> {
        self.state.read().unwrap().ready.clone()
    }

    /// Returns the total number of recorded events.
    pub fn event_count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.created.len() + state.canceled.len() + state.ready.len()
    }

    fn check_failure(&self) -> Result<()> {
        if self.state.read().unwrap().fail_on_publish {
            return Err(DomainError::Gateway("event sink unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn publish_created(&self, event: OrderCreatedEvent) -> Result<()> {
        self.check_failure()?;
        self.state.write().unwrap().created.push(event);
        Ok(())
    }

    async fn publish_canceled(&self, event: OrderCanceledEvent) -> Result<()> {
        self.check_failure()?;
        self.state.write().unwrap().canceled.push(event);
        Ok(())
    }

    async fn publish_ready(&self, event: OrderReadyEvent) -> Result<()> {
        self.check_failure()?;
        self.state.write().unwrap().ready.push(event);
        Ok(())
    }
}

/// In-memory customer attribute lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomers {
    discounts: Arc<RwLock<HashMap<String, u32>>>,
}

impl InMemoryCustomers {
    /// Creates a new lookup with no discounts configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a customer a discount in basis points.
    pub fn set_discount(&self, customer_id: impl Into<String>, bps: u32) {
        self.discounts.write().unwrap().insert(customer_id.into(), bps);
    }
}

#[async_trait]
impl CustomerLookup for InMemoryCustomers {
    async fn discount_bps(&self, customer_id: &str) -> Result<Option<u32>> {
        Ok(self.discounts.read().unwrap().get(customer_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Money, OrderItem};

    fn new_order() -> Order {
        let items = vec![
            OrderItem::new(1, "Big Mac", 2, Money::from_cents(2590), None).unwrap(),
            OrderItem::new(2, "Coke", 1, Money::from_cents(850), None).unwrap(),
        ];
        Order::new("A23basb3u123", items).unwrap()
    }

    #[tokio::test]
    async fn save_assigns_sequential_order_and_item_ids() {
        let store = InMemoryOrderStore::new();

        let first = store.save(new_order()).await.unwrap();
        let second = store.save(new_order()).await.unwrap();

        assert_eq!(first.id(), Some(OrderId::new(1)));
        assert_eq!(second.id(), Some(OrderId::new(2)));
        assert_eq!(first.items()[0].id, Some(1));
        assert_eq!(first.items()[1].id, Some(2));
        assert_eq!(second.items()[0].id, Some(3));
        assert_eq!(store.order_count(), 2);
    }

    #[tokio::test]
    async fn resave_preserves_assigned_ids() {
        let store = InMemoryOrderStore::new();
        let saved = store.save(new_order()).await.unwrap();
        let resaved = store.save(saved.clone()).await.unwrap();

        assert_eq!(resaved.id(), saved.id());
        assert_eq!(resaved.items()[0].id, saved.items()[0].id);
        assert_eq!(store.order_count(), 1);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_order() {
        let store = InMemoryOrderStore::new();
        assert!(store.find_by_id(OrderId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn catalog_returns_only_known_products() {
        let catalog = InMemoryCatalog::new();
        catalog.insert(CatalogSnapshot {
            product_id: 1,
            name: "Big Mac".to_string(),
            unit_price: Money::from_cents(2590),
            active: true,
            category_active: true,
            stock_quantity: 10,
        });

        let found = catalog.find_by_product_ids(&[1, 2]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_id, 1);
    }

    #[tokio::test]
    async fn payments_report_missing_payment_as_none() {
        let payments = InMemoryPayments::new();
        assert!(payments
            .get_order_status(OrderId::new(1))
            .await
            .unwrap()
            .is_none());

        payments.set_status(OrderId::new(1), PaymentStatus::Approved);
        let snapshot = payments
            .get_order_status(OrderId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.status, PaymentStatus::Approved);
    }

    #[tokio::test]
    async fn sink_records_and_can_fail() {
        let sink = RecordingEventSink::new();
        let store = InMemoryOrderStore::new();
        let order = store.save(new_order()).await.unwrap();

        let event = OrderCreatedEvent::from_order(&order).unwrap();
        sink.publish_created(event).await.unwrap();
        assert_eq!(sink.event_count(), 1);
        assert_eq!(sink.created_events().len(), 1);

        sink.set_fail_on_publish(true);
        let event = OrderCanceledEvent::from_order(&order).unwrap();
        assert!(sink.publish_canceled(event).await.is_err());
        assert_eq!(sink.event_count(), 1);
    }

    #[tokio::test]
    async fn customers_report_configured_discount() {
        let customers = InMemoryCustomers::new();
        assert_eq!(customers.discount_bps("nobody").await.unwrap(), None);

        customers.set_discount("vip", 1000);
        assert_eq!(customers.discount_bps("vip").await.unwrap(), Some(1000));
    }
}
