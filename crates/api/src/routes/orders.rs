//! Order creation, lookup, and status transition endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::gateway::{CatalogLookup, CustomerLookup, EventSink, OrderStore, PaymentLookup};
use domain::usecase::{CreateOrderInput, OrderItemInput};
use domain::{Money, Order, OrderLifecycle, OrderStatus};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S, C, P, E, U> {
    pub lifecycle: OrderLifecycle<S, C, P, E, U>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub observation: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    /// Numeric status code: 1 Received, 2 Preparing, 3 Ready,
    /// 4 Completed, 5 Cancelled.
    pub status: i32,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub customer_id: String,
    pub status: i32,
    pub status_label: String,
    pub items: Vec<OrderItemResponse>,
    pub total_cents: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
    pub observation: Option<String>,
}

impl OrderResponse {
    pub(crate) fn from_order(order: &Order) -> Self {
        let items = order
            .items()
            .iter()
            .map(|item| OrderItemResponse {
                product_id: item.product_id,
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price_cents: item.unit_price.cents(),
                subtotal_cents: item.subtotal().cents(),
                observation: item.observation.clone(),
            })
            .collect();

        Self {
            id: order.id().map(|id| id.as_i64()).unwrap_or_default(),
            order_number: order.order_number().to_string(),
            customer_id: order.customer_id().to_string(),
            status: order.status().code(),
            status_label: order.status().label().to_string(),
            items,
            total_cents: order.total().cents(),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /orders — place a new order.
#[tracing::instrument(skip(state, req))]
pub async fn create<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let items = req
        .items
        .into_iter()
        .map(|item| OrderItemInput {
            product_id: item.product_id,
            name: item.name,
            quantity: item.quantity,
            unit_price: Money::from_cents(item.unit_price_cents),
            observation: item.observation,
        })
        .collect();

    let order = state
        .lifecycle
        .place_order(CreateOrderInput {
            customer_id: req.customer_id,
            items,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from_order(&order))))
}

/// GET /orders/:id — load an order by id.
#[tracing::instrument(skip(state))]
pub async fn get<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let order = state.lifecycle.get_order(OrderId::new(id)).await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// PUT /orders/:id/status — run a payment-gated status transition.
#[tracing::instrument(skip(state, req))]
pub async fn update_status<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let target = OrderStatus::from_code(req.status)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let order = state
        .lifecycle
        .update_status(OrderId::new(id), target)
        .await?;
    Ok(Json(OrderResponse::from_order(&order)))
}

/// POST /orders/:id/chargeback — cancel an order after a stock
/// reversal or payment dispute.
#[tracing::instrument(skip(state))]
pub async fn chargeback<S, C, P, E, U>(
    State(state): State<Arc<AppState<S, C, P, E, U>>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>, ApiError>
where
    S: OrderStore + 'static,
    C: CatalogLookup + 'static,
    P: PaymentLookup + 'static,
    E: EventSink + 'static,
    U: CustomerLookup + 'static,
{
    let order = state.lifecycle.chargeback(OrderId::new(id)).await?;
    Ok(Json(OrderResponse::from_order(&order)))
}
