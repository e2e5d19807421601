use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use lbk_api::{app, AppState};
use lbk_catalog::source::{CachedProductSource, HttpProductSource};
use lbk_catalog::{CartRepository, CatalogLoader};
use lbk_core::EventTracker;
use lbk_order::{CheckoutService, OrderAggregator, OrderLog, WhatsAppLinkSink};
use lbk_shipping::{CostCalculator, ShippingOptionsBuilder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lbk_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = lbk_store::app_config::Config::load()?;
    tracing::info!("Starting LB-K API on port {}", config.server.port);

    let store = lbk_store::open_store(&config.storage)?;

    // Remote feed first, then the last good copy, then built-in products
    let mut loader = CatalogLoader::new().with_cache(store.clone());
    if let Some(url) = &config.catalog.url {
        let source = HttpProductSource::new(url.as_str(), Duration::from_millis(config.catalog.timeout_ms))?;
        loader = loader.with_source(Arc::new(source));
    }
    let catalog = loader
        .with_source(Arc::new(CachedProductSource::new(store.clone())))
        .load()
        .await;

    let tracker = EventTracker::new(
        store.clone(),
        config.analytics.enabled,
        config.storage.analytics_capacity,
    );

    let calculator = CostCalculator::new(Arc::new(config.rates.clone()));
    let aggregator = OrderAggregator::new(ShippingOptionsBuilder::new(calculator), config.vendors.clone())?;
    let checkout = CheckoutService::new(
        Arc::new(aggregator),
        Arc::new(WhatsAppLinkSink::new(config.messaging.whatsapp_base_url.as_str())),
        OrderLog::new(store.clone(), config.storage.order_log_capacity),
    )
    .with_tracker(tracker.clone());

    tracker
        .track("app_started", serde_json::json!({ "products": catalog.products().len() }))
        .await;

    let app_state = AppState::new(catalog, CartRepository::new(store), checkout, tracker);
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
