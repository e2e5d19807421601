use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use lbk_shipping::{requires_boat, ShippingOption};
use serde::{Deserialize, Serialize};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ShippingOptionsResponse {
    /// Set when the cart holds goods that may only travel by sea
    pub boat_only: bool,
    pub options: Vec<ShippingOption>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/carts/{session}/shipping-options", get(list_shipping_options))
}

/// GET /v1/carts/{session}/shipping-options
pub async fn list_shipping_options(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<ShippingOptionsResponse>, AppError> {
    let cart = state.carts.load(&session).await?;
    let options = state.checkout.aggregator().shipping().list_options(&cart);

    Ok(Json(ShippingOptionsResponse {
        boat_only: requires_boat(&cart),
        options,
    }))
}
