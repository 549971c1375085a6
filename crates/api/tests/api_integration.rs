//! Integration tests for the API server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain::Money;
use domain::gateway::{CatalogSnapshot, PaymentStatus};
use tower::ServiceExt;

use api::DefaultGateways;
use common::OrderId;

fn setup() -> (axum::Router, DefaultGateways) {
    let (state, gateways) = api::create_default_state();

    gateways.catalog.insert(CatalogSnapshot {
        product_id: 1,
        name: "Big Mac".to_string(),
        unit_price: Money::from_cents(2590),
        active: true,
        category_active: true,
        stock_quantity: 10,
    });

    (api::create_app(state), gateways)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn valid_order_body() -> serde_json::Value {
    serde_json::json!({
        "customer_id": "A23basb3u123",
        "items": [{
            "product_id": 1,
            "name": "Big Mac",
            "quantity": 2,
            "unit_price_cents": 2590
        }]
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn create_order(app: &axum::Router) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/orders", valid_order_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_order() {
    let (app, _) = setup();

    let response = app
        .oneshot(json_request("POST", "/orders", valid_order_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["status"], 1);
    assert_eq!(json["status_label"], "Received");
    assert_eq!(json["total_cents"], 5180);
    assert!(json["order_number"].as_str().unwrap().starts_with("ORD-"));
}

#[tokio::test]
async fn test_create_order_against_unknown_product() {
    let (app, _) = setup();

    let body = serde_json::json!({
        "customer_id": "A23basb3u123",
        "items": [{
            "product_id": 99,
            "name": "Mystery Burger",
            "quantity": 1,
            "unit_price_cents": 100
        }]
    });

    let response = app
        .oneshot(json_request("POST", "/orders", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "order item product does not exist");
}

#[tokio::test]
async fn test_create_and_get_order() {
    let (app, _) = setup();
    let id = create_order(&app).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/orders/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["items"][0]["subtotal_cents"], 5180);
}

#[tokio::test]
async fn test_get_nonexistent_order() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/orders/404")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_without_payment() {
    let (app, _) = setup();
    let id = create_order(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/orders/{id}/status"),
            serde_json::json!({ "status": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "order payment does not exist");
}

#[tokio::test]
async fn test_update_status_with_invalid_code() {
    let (app, _) = setup();
    let id = create_order(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/orders/{id}/status"),
            serde_json::json!({ "status": 9 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_approved_event_starts_preparation() {
    let (app, gateways) = setup();
    let id = create_order(&app).await;
    gateways
        .payments
        .set_status(OrderId::new(id), PaymentStatus::Approved);

    let response = app
        .oneshot(json_request(
            "POST",
            "/events/payment-approved",
            serde_json::json!({ "order_id": id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], 2);
    assert_eq!(json["status_label"], "Preparing");
}

#[tokio::test]
async fn test_duplicate_status_update_returns_current_order() {
    let (app, gateways) = setup();
    let id = create_order(&app).await;
    gateways
        .payments
        .set_status(OrderId::new(id), PaymentStatus::Approved);

    let first = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/orders/{id}/status"),
            serde_json::json!({ "status": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // Redelivery of the same transition is a benign no-op, not a 409.
    let second = app
        .oneshot(json_request(
            "PUT",
            &format!("/orders/{id}/status"),
            serde_json::json!({ "status": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::OK);
    let json = body_json(second).await;
    assert_eq!(json["status"], 2);
    assert_eq!(gateways.events.canceled_events().len(), 0);
}

#[tokio::test]
async fn test_ready_transition_publishes_ready_event() {
    let (app, gateways) = setup();
    let id = create_order(&app).await;
    gateways
        .payments
        .set_status(OrderId::new(id), PaymentStatus::Approved);

    for code in [2, 3] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/orders/{id}/status"),
                serde_json::json!({ "status": code }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(gateways.events.ready_events().len(), 1);
}

#[tokio::test]
async fn test_stock_reversal_cancels_the_order() {
    let (app, gateways) = setup();
    let id = create_order(&app).await;
    gateways
        .payments
        .set_status(OrderId::new(id), PaymentStatus::Approved);

    let response = app
        .oneshot(json_request(
            "POST",
            "/events/stock-reversal",
            serde_json::json!({ "order_id": id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], 5);
    assert_eq!(gateways.events.canceled_events().len(), 1);
}

#[tokio::test]
async fn test_chargeback_endpoint() {
    let (app, gateways) = setup();
    let id = create_order(&app).await;
    gateways
        .payments
        .set_status(OrderId::new(id), PaymentStatus::Approved);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/orders/{id}/chargeback"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status_label"], "Cancelled");
}
