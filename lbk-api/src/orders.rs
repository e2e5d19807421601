use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lbk_catalog::ProductId;
use lbk_order::{CheckoutReceipt, ClientInfo, Delivery, OrderRecord};
use serde::Deserialize;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub product_id: ProductId,
    pub client_name: String,
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/carts/{session}/checkout", post(checkout))
        .route("/v1/orders", get(list_orders))
        .route("/v1/inquiries", post(send_inquiry))
}

/// POST /v1/carts/{session}/checkout
/// Sends the cart to its vendor and empties it
pub async fn checkout(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(client): Json<ClientInfo>,
) -> Result<(StatusCode, Json<CheckoutReceipt>), AppError> {
    let cart = state.carts.load(&session).await?;
    let receipt = state.checkout.checkout(&cart, &client).await?;
    state.carts.clear(&session).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /v1/orders
/// Most recent orders, oldest first
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderRecord>>, AppError> {
    Ok(Json(state.checkout.log().recent().await?))
}

/// POST /v1/inquiries
pub async fn send_inquiry(
    State(state): State<AppState>,
    Json(req): Json<InquiryRequest>,
) -> Result<Json<Delivery>, AppError> {
    let product = state
        .catalog
        .get(req.product_id)
        .ok_or_else(|| AppError::NotFoundError(format!("Product {} not found", req.product_id)))?;

    let delivery = state
        .checkout
        .send_inquiry(product, &req.client_name, &req.message)
        .await?;

    Ok(Json(delivery))
}
