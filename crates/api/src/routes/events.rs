//! Inbound event endpoints.
//!
//! External systems (payment service, stock service) deliver their
//! notifications here. Deliveries may repeat; a redelivery of an
//! already-applied transition returns the current order with 200.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::OrderId;
use domain::gateway::{CatalogLookup, CustomerLookup, EventSink, OrderStore, PaymentLookup};
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::orders::{AppState, OrderResponse};

#[derive(Deserialize)]
pub struct OrderEventRequest {
    pub order_id: i64,
}

/// POST /events/payment-approved — the payment service approved the
/// order's payment.
#[tracing::instrument(skip(state, req))]
pub async fn payment_approved<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Json(req): Json<OrderEventRequest>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let order = state
        .lifecycle
        .handle_payment_approved(OrderId::new(req.order_id))
        .await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// POST /events/payment-expired — the payment window elapsed without
/// approval.
#[tracing::instrument(skip(state, req))]
pub async fn payment_expired<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Json(req): Json<OrderEventRequest>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let order = state
        .lifecycle
        .handle_payment_expired(OrderId::new(req.order_id))
        .await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// POST /events/stock-reversal — the stock service reversed the
/// order's reservation.
#[tracing::instrument(skip(state, req))]
pub async fn stock_reversal<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Json(req): Json<OrderEventRequest>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let order = state
        .lifecycle
        .handle_stock_reversal(OrderId::new(req.order_id))
        .await?;
    Ok(Json(OrderResponse::from_order(&order)))
}
