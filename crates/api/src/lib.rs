//! HTTP API server for the food-order lifecycle service.
//!
//! Exposes order placement, lookup, and status transitions over REST,
//! plus inbound endpoints for payment and stock notifications, with
//! structured logging (tracing).

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use domain::OrderLifecycle;
use domain::gateway::memory::{
    InMemoryCatalog, InMemoryCustomers, InMemoryOrderStore, InMemoryPayments, RecordingEventSink,
};
use domain::gateway::{CatalogLookup, CustomerLookup, EventSink, OrderStore, PaymentLookup};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Application state over the default in-memory gateways.
pub type DefaultAppState = AppState<
    InMemoryOrderStore,
    InMemoryCatalog,
    InMemoryPayments,
    RecordingEventSink,
    InMemoryCustomers,
>;

/// The in-memory gateway handles behind [`DefaultAppState`], kept so
/// callers can seed the catalog and drive payment status.
pub struct DefaultGateways {
    pub catalog: InMemoryCatalog,
    pub payments: InMemoryPayments,
    pub events: RecordingEventSink,
    pub customers: InMemoryCustomers,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, C, P, E, U>(state: Arc<AppState<S, C, P, E, U>>) -> Router
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::create::<S, C, P, E, U>))
        .route("/orders/{id}", get(routes::orders::get::<S, C, P, E, U>))
        .route(
            "/orders/{id}/status",
            put(routes::orders::update_status::<S, C, P, E, U>),
        )
        .route(
            "/orders/{id}/chargeback",
            post(routes::orders::chargeback::<S, C, P, E, U>),
        )
        .route(
            "/events/payment-approved",
            post(routes::events::payment_approved::<S, C, P, E, U>),
        )
        .route(
            "/events/payment-expired",
            post(routes::events::payment_expired::<S, C, P, E, U>),
        )
        .route(
            "/events/stock-reversal",
            post(routes::events::stock_reversal::<S, C, P, E, U>),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over the in-memory gateways.
pub fn create_default_state() -> (Arc<DefaultAppState>, DefaultGateways) {
    let store = InMemoryOrderStore::new();
    let catalog = InMemoryCatalog::new();
    let payments = InMemoryPayments::new();
    let events = RecordingEventSink::new();
    let customers = InMemoryCustomers::new();

    let lifecycle = OrderLifecycle::new(
        store,
        catalog.clone(),
        payments.clone(),
        events.clone(),
        customers.clone(),
    );

    let state = Arc::new(AppState { lifecycle });
    let gateways = DefaultGateways {
        catalog,
        payments,
        events,
        customers,
    };

    (state, gateways)
}
