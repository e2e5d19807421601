use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use lbk_catalog::{Availability, Product, ProductId};
use serde::Deserialize;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub availability: Option<Availability>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/products", get(list_products))
        .route("/v1/products/{id}", get(get_product))
}

/// GET /v1/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let products = match query.availability {
        Some(availability) => state.catalog.by_availability(availability).into_iter().cloned().collect(),
        None => state.catalog.products().to_vec(),
    };
    Json(products)
}

/// GET /v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFoundError(format!("Product {} not found", id)))?;

    state
        .tracker
        .track("product_viewed", serde_json::json!({ "product_id": id, "name": product.name }))
        .await;

    Ok(Json(product.clone()))
}
