use async_trait::async_trait;
use lbk_core::repository::{load_json, save_json, KeyValueStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use crate::product::{default_products, Availability, Product, ProductId};

pub const PRODUCTS_CACHE_KEY: &str = "lbk_products";

/// Somewhere products can be fetched from
#[async_trait]
pub trait ProductSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Remote JSON product feed
pub struct HttpProductSource {
    client: reqwest::Client,
    url: String,
}

impl HttpProductSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        Ok(Self { client, url: url.into() })
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

/// Products previously saved in the key-value store
pub struct CachedProductSource {
    store: Arc<dyn KeyValueStore>,
}

impl CachedProductSource {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductSource for CachedProductSource {
    fn name(&self) -> &str {
        "cache"
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        load_json::<Vec<Product>>(self.store.as_ref(), PRODUCTS_CACHE_KEY)
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?
            .ok_or_else(|| CatalogError::Unavailable("no cached products".to_string()))
    }
}

/// Resolves the catalog from the first source that answers
pub struct CatalogLoader {
    sources: Vec<Arc<dyn ProductSource>>,
    cache: Option<Arc<dyn KeyValueStore>>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            cache: None,
        }
    }

    /// Products fetched from any other source are written back here
    pub fn with_cache(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.cache = Some(store);
        self
    }

    /// Sources are tried in the order they are added
    pub fn with_source(mut self, source: Arc<dyn ProductSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Never fails: falls back to the built-in products
    pub async fn load(&self) -> Catalog {
        for source in &self.sources {
            match source.fetch().await {
                Ok(products) => {
                    info!("Catalog loaded from {} ({} products)", source.name(), products.len());
                    if let (Some(cache), false) = (&self.cache, source.name() == "cache") {
                        if let Err(e) = save_json(cache.as_ref(), PRODUCTS_CACHE_KEY, &products).await {
                            warn!("Failed to cache catalog: {}", e);
                        }
                    }
                    return Catalog::new(products);
                }
                Err(e) => warn!("Catalog source {} failed: {}", source.name(), e),
            }
        }

        let products = default_products();
        info!("Catalog loaded from defaults ({} products)", products.len());
        Catalog::new(products)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved, read-only product catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products ordered from abroad (15-21 days)
    pub fn catalog_products(&self) -> Vec<&Product> {
        self.by_availability(Availability::Order)
    }

    pub fn stock_products(&self) -> Vec<&Product> {
        self.by_availability(Availability::Stock)
    }

    pub fn by_availability(&self, availability: Availability) -> Vec<&Product> {
        self.products.iter().filter(|p| p.availability == availability).collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Product source unavailable: {0}")]
    Unavailable(String),

    #[error("Product data malformed: {0}")]
    Malformed(String),
}
