use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lbk_catalog::CartError;
use lbk_core::CoreError;
use lbk_order::OrderError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    UnprocessableError(String),
    BadGatewayError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnprocessableError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::BadGatewayError(msg) => {
                tracing::warn!("Upstream channel failed: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ZeroQuantity(_) => Self::ValidationError(err.to_string()),
            CartError::NotInCart(_) | CartError::UnknownProduct(_) => Self::NotFoundError(err.to_string()),
            CartError::QuantityOverflow(_) => Self::UnprocessableError(err.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::ValidationError(msg) => Self::UnprocessableError(msg),
            OrderError::DispatchError(e) => Self::BadGatewayError(e.to_string()),
            OrderError::TemplateError(_) => Self::InternalServerError(err.to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::InternalServerError(err.to_string())
    }
}
