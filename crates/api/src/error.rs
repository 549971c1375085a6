//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, ErrorKind};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client (malformed ids, unknown status codes).
    BadRequest(String),
    /// Business rule failure from the lifecycle service.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match err.kind() {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.to_string()),
        ErrorKind::PaymentNotEligible => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        // The lifecycle service absorbs these before they reach the
        // boundary; mapped anyway in case a handler bypasses it.
        ErrorKind::IdempotentConflict => (StatusCode::CONFLICT, err.to_string()),
        ErrorKind::Gateway => {
            tracing::error!(error = %err, "gateway failure");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::OrderId;
    use domain::OrderStatus;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::Domain(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(DomainError::OrderNotFound(OrderId::new(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::PaymentNotEligible("unpaid".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::AlreadyInStatus {
                order_id: OrderId::new(1),
                status: OrderStatus::Ready,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::Gateway("down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_mapping() {
        let response = ApiError::BadRequest("invalid status code".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
