use lbk_core::repository::{load_json, save_json, KeyValueStore};
use lbk_core::CoreResult;
use std::sync::Arc;
use crate::cart::Cart;

/// Persists one cart per storefront session
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CartRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(session: &str) -> String {
        format!("lbk_cart:{}", session)
    }

    /// Missing carts load as empty
    pub async fn load(&self, session: &str) -> CoreResult<Cart> {
        Ok(load_json(self.store.as_ref(), &Self::key(session)).await?.unwrap_or_default())
    }

    pub async fn save(&self, session: &str, cart: &Cart) -> CoreResult<()> {
        save_json(self.store.as_ref(), &Self::key(session), cart).await
    }

    pub async fn clear(&self, session: &str) -> CoreResult<()> {
        self.store.delete(&Self::key(session)).await
    }
}
