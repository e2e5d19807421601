use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use lbk_catalog::{Cart, ProductId, Usd, Vendor};
use lbk_shipping::ShippingOption;
use crate::aggregator::OrderError;

/// Delivery and payment details entered at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Requested transport mode as sent by the client, e.g. `air_express`
    #[serde(alias = "shippingMode")]
    pub shipping_mode: String,
    #[serde(alias = "paymentMethod")]
    pub payment_method: String,
}

impl ClientInfo {
    /// Every field is required and must not be blank
    pub fn validate(&self) -> Result<(), OrderError> {
        let fields = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("shipping_mode", &self.shipping_mode),
            ("payment_method", &self.payment_method),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(OrderError::ValidationError(format!(
                "missing required client field: {}",
                field
            ))),
            None => Ok(()),
        }
    }
}

/// A priced line of the final order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price_usd: Usd,
    pub line_total_usd: Usd,
}

/// Result of one checkout attempt. Never mutated; a new attempt builds a new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    pub vendor: Vendor,
    pub lines: Vec<OrderLine>,
    pub products_total_usd: Usd,
    /// The option actually applied, after hazardous goods forcing
    pub shipping: ShippingOption,
    /// Freight is always billed in whole dollars
    pub shipping_cost_usd: u64,
    pub grand_total_usd: Usd,
    pub delivery_eta_days: u32,
    pub rendered_artifact: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Sent,
    DispatchFailed,
}

/// Audit entry kept in the order history log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub vendor: Vendor,
    pub cart: Cart,
    pub client: ClientInfo,
    pub total_usd: Usd,
    pub status: OrderStatus,
}

impl OrderRecord {
    pub fn new(summary: &OrderSummary, cart: Cart, client: ClientInfo, status: OrderStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            vendor: summary.vendor,
            cart,
            client,
            total_usd: summary.grand_total_usd,
            status,
        }
    }
}

/// A rendered product question routed to the product's vendor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inquiry {
    pub product_id: ProductId,
    pub vendor: Vendor,
    pub text: String,
}
