//! HTTP error responses.
//!
//! Every failure renders as `{"error": "<kind>", "message": "<detail>"}` with
//! the status code of its kind.

use crate::model::IdParseError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "InvalidInput", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "missing x-user-id header",
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", message)
    }

    fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "StorageFailure", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind, message = %self.message, "Request failed");
        }
        let body = json!({ "error": self.kind, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        let (status, kind) = match e {
            OrderError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "InvalidInput"),
            OrderError::ProductNotFound(_) => (StatusCode::NOT_FOUND, "ProductNotFound"),
            OrderError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
            OrderError::InsufficientStock { .. } => (StatusCode::CONFLICT, "InsufficientStock"),
            OrderError::Forbidden { .. } => (StatusCode::FORBIDDEN, "Forbidden"),
            OrderError::InvalidTransition { .. } | OrderError::NotYetExpired(_) => {
                (StatusCode::CONFLICT, "InvalidTransition")
            }
            OrderError::StorageFailure(_) => return Self::unavailable(message),
        };
        Self::new(status, kind, message)
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        let message = e.to_string();
        match e {
            UserError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "NotFound", message),
            UserError::ValidationError(_) => Self::invalid_input(message),
            UserError::ActorCommunicationError(_) => Self::unavailable(message),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        let message = e.to_string();
        match e {
            ProductError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "ProductNotFound", message)
            }
            ProductError::InsufficientStock { .. } => {
                Self::new(StatusCode::CONFLICT, "InsufficientStock", message)
            }
            ProductError::InvalidQuantity(_) | ProductError::ValidationError(_) => {
                Self::invalid_input(message)
            }
            ProductError::StockOverflow { .. } | ProductError::ActorCommunicationError(_) => {
                Self::unavailable(message)
            }
        }
    }
}

impl From<IdParseError> for ApiError {
    fn from(e: IdParseError) -> Self {
        Self::invalid_input(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::invalid_input(e.body_text())
    }
}
