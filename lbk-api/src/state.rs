use std::sync::Arc;
use lbk_catalog::{Catalog, CartRepository};
use lbk_core::EventTracker;
use lbk_order::CheckoutService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub carts: CartRepository,
    pub checkout: Arc<CheckoutService>,
    pub tracker: EventTracker,
}

impl AppState {
    pub fn new(catalog: Catalog, carts: CartRepository, checkout: CheckoutService, tracker: EventTracker) -> Self {
        Self {
            catalog: Arc::new(catalog),
            carts,
            checkout: Arc::new(checkout),
            tracker,
        }
    }
}
