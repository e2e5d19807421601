use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lbk_api::{app, AppState};
use lbk_catalog::{CartRepository, CatalogLoader};
use lbk_core::{EventTracker, InMemoryStore, KeyValueStore};
use lbk_order::{
    CheckoutService, Delivery, MessageSink, OrderAggregator, OrderLog, SinkError, VendorDirectory,
    WhatsAppLinkSink,
};
use lbk_shipping::{CostCalculator, RateTable, ShippingOptionsBuilder};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

struct RejectingSink;

#[async_trait]
impl MessageSink for RejectingSink {
    async fn send(&self, _contact: &str, _text: &str) -> Result<Delivery, SinkError> {
        Err(SinkError::Rejected("channel offline".to_string()))
    }
}

async fn test_app(sink: Arc<dyn MessageSink>) -> Router {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let catalog = CatalogLoader::new().load().await;
    let tracker = EventTracker::new(store.clone(), true, 50);

    let calculator = CostCalculator::new(Arc::new(RateTable::default()));
    let aggregator = OrderAggregator::new(ShippingOptionsBuilder::new(calculator), VendorDirectory::default()).unwrap();
    let checkout = CheckoutService::new(Arc::new(aggregator), sink, OrderLog::new(store.clone(), 10))
        .with_tracker(tracker.clone());

    app(AppState::new(catalog, CartRepository::new(store), checkout, tracker))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn client(mode: &str) -> Value {
    json!({
        "name": "Grace",
        "phone": "+243 810 000 000",
        "address": "Avenue du Commerce 12, Kinshasa",
        "shippingMode": mode,
        "paymentMethod": "mobile money",
    })
}

#[tokio::test]
async fn test_list_products_by_availability() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    let (status, all) = send(&app, "GET", "/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, stock) = send(&app, "GET", "/v1/products?availability=stock", None).await;
    assert_eq!(stock[0]["name"], "Evening dress");
    assert_eq!(stock.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    let (status, body) = send(&app, "GET", "/v1/products/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("99"));

    let (status, _) = send(&app, "POST", "/v1/carts/s1/items", Some(json!({ "product_id": 99 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_editing() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    let (status, cart) = send(&app, "POST", "/v1/carts/s1/items", Some(json!({ "product_id": 2, "quantity": 2 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["products_total_usd"], 170);

    let (_, cart) = send(&app, "PUT", "/v1/carts/s1/items/2", Some(json!({ "quantity": 3 }))).await;
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["products_total_usd"], 255);

    let (status, _) = send(&app, "PUT", "/v1/carts/s1/items/2", Some(json!({ "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, cart) = send(&app, "DELETE", "/v1/carts/s1/items/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"], json!([]));

    let (status, _) = send(&app, "DELETE", "/v1/carts/s1/items/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shipping_options_follow_cart_contents() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    send(&app, "POST", "/v1/carts/s1/items", Some(json!({ "product_id": 2 }))).await;
    let (status, body) = send(&app, "GET", "/v1/carts/s1/shipping-options", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["boat_only"], false);
    let modes: Vec<&str> = body["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["mode"].as_str().unwrap())
        .collect();
    assert_eq!(modes, vec!["air_express", "air_normal", "boat"]);
    assert_eq!(body["options"][1]["cost_usd"], 44);

    // Electronics may only travel by sea
    send(&app, "POST", "/v1/carts/s1/items", Some(json!({ "product_id": 1 }))).await;
    let (_, body) = send(&app, "GET", "/v1/carts/s1/shipping-options", None).await;
    assert_eq!(body["boat_only"], true);
    assert_eq!(body["options"].as_array().unwrap().len(), 1);
    assert_eq!(body["options"][0]["mode"], "boat");
}

#[tokio::test]
async fn test_checkout_sends_records_and_clears_cart() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    send(&app, "POST", "/v1/carts/s1/items", Some(json!({ "product_id": 2 }))).await;
    let (status, receipt) = send(&app, "POST", "/v1/carts/s1/checkout", Some(client("air_normal"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["summary"]["vendor"], "betty");
    assert_eq!(receipt["summary"]["grand_total_usd"], 129);
    assert_eq!(receipt["contact"], "+243971455335");
    assert!(receipt["delivery"]["link"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/243971455335?text="));

    let (_, cart) = send(&app, "GET", "/v1/carts/s1", None).await;
    assert_eq!(cart["lines"], json!([]));

    let (_, orders) = send(&app, "GET", "/v1/orders", None).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["status"], "SENT");
    assert_eq!(orders[0]["total_usd"], 129);
}

#[tokio::test]
async fn test_empty_cart_checkout_rejected() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    let (status, body) = send(&app, "POST", "/v1/carts/empty/checkout", Some(client("boat"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (_, orders) = send(&app, "GET", "/v1/orders", None).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_failed_dispatch_keeps_cart() {
    let app = test_app(Arc::new(RejectingSink)).await;

    send(&app, "POST", "/v1/carts/s1/items", Some(json!({ "product_id": 1 }))).await;
    let (status, _) = send(&app, "POST", "/v1/carts/s1/checkout", Some(client("air_express"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, cart) = send(&app, "GET", "/v1/carts/s1", None).await;
    assert_eq!(cart["item_count"], 1);

    let (_, orders) = send(&app, "GET", "/v1/orders", None).await;
    assert_eq!(orders[0]["status"], "DISPATCH_FAILED");
}

#[tokio::test]
async fn test_inquiry_goes_to_product_vendor() {
    let app = test_app(Arc::new(WhatsAppLinkSink::default())).await;

    let request = json!({ "product_id": 1, "client_name": "Grace", "message": "Is it unlocked?" });
    let (status, delivery) = send(&app, "POST", "/v1/inquiries", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(delivery["channel"], "whatsapp");
    assert!(delivery["link"].as_str().unwrap().starts_with("https://wa.me/243822937321?text="));
}
