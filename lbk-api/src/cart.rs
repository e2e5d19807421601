use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use lbk_catalog::{Cart, CartError, CartLine, ProductId, Usd};
use serde::{Deserialize, Serialize};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponse {
    pub session: String,
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub products_total_usd: Usd,
}

impl CartResponse {
    fn new(session: String, cart: Cart) -> Result<Self, AppError> {
        let products_total_usd = cart
            .products_total_usd()
            .ok_or_else(|| AppError::UnprocessableError("cart total overflows".to_string()))?;

        Ok(Self {
            session,
            item_count: cart.item_count(),
            products_total_usd,
            lines: cart.into(),
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/carts/{session}", get(get_cart))
        .route("/v1/carts/{session}/items", axum::routing::post(add_item))
        .route(
            "/v1/carts/{session}/items/{product_id}",
            put(update_item).delete(remove_item),
        )
}

/// GET /v1/carts/{session}
pub async fn get_cart(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = state.carts.load(&session).await?;
    Ok(Json(CartResponse::new(session, cart)?))
}

/// POST /v1/carts/{session}/items
pub async fn add_item(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let product = state
        .catalog
        .get(req.product_id)
        .ok_or(CartError::UnknownProduct(req.product_id))?;

    let mut cart = state.carts.load(&session).await?;
    cart.add(product, req.quantity)?;
    state.carts.save(&session, &cart).await?;

    tracing::debug!(%session, product_id = req.product_id, quantity = req.quantity, "Item added to cart");
    state
        .tracker
        .clone()
        .with_session(session.as_str())
        .track(
            "add_to_cart",
            serde_json::json!({ "product_id": product.id, "quantity": req.quantity }),
        )
        .await;

    Ok(Json(CartResponse::new(session, cart)?))
}

/// PUT /v1/carts/{session}/items/{product_id}
pub async fn update_item(
    State(state): State<AppState>,
    Path((session, product_id)): Path<(String, ProductId)>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = state.carts.load(&session).await?;
    cart.set_quantity(product_id, req.quantity)?;
    state.carts.save(&session, &cart).await?;

    Ok(Json(CartResponse::new(session, cart)?))
}

/// DELETE /v1/carts/{session}/items/{product_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Path((session, product_id)): Path<(String, ProductId)>,
) -> Result<Json<CartResponse>, AppError> {
    let mut cart = state.carts.load(&session).await?;
    cart.remove(product_id).ok_or(CartError::NotInCart(product_id))?;
    state.carts.save(&session, &cart).await?;

    Ok(Json(CartResponse::new(session, cart)?))
}
