use async_trait::async_trait;
use lbk_catalog::{Cart, Product};
use lbk_core::EventTracker;
use lbk_shared::models::{InquirySentEvent, OrderSentEvent};
use lbk_shared::Masked;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use crate::aggregator::{OrderAggregator, OrderError};
use crate::audit::OrderLog;
use crate::models::{ClientInfo, OrderRecord, OrderStatus, OrderSummary};

/// Outcome of handing a message to the external channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Delivery {
    pub channel: String,
    /// Link the buyer opens to send the prepared message, when the channel uses one
    pub link: Option<String>,
}

/// External messaging channel taking a contact and a text
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, contact: &str, text: &str) -> Result<Delivery, SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    #[error("Channel rejected the message: {0}")]
    Rejected(String),
}

/// Prepares a WhatsApp click-to-chat link carrying the message
pub struct WhatsAppLinkSink {
    base_url: String,
}

impl WhatsAppLinkSink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for WhatsAppLinkSink {
    fn default() -> Self {
        Self::new("https://wa.me")
    }
}

#[async_trait]
impl MessageSink for WhatsAppLinkSink {
    async fn send(&self, contact: &str, text: &str) -> Result<Delivery, SinkError> {
        let digits: String = contact.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(SinkError::InvalidContact(Masked(contact).to_string()));
        }

        let link = format!("{}/{}?text={}", self.base_url, digits, urlencoding::encode(text));
        info!(contact = %Masked(contact), "WhatsApp link prepared");

        Ok(Delivery {
            channel: "whatsapp".to_string(),
            link: Some(link),
        })
    }
}

/// What the buyer gets back from a successful checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: Uuid,
    pub summary: OrderSummary,
    pub contact: String,
    pub delivery: Delivery,
    /// False when the order went out but its audit record could not be written
    pub recorded: bool,
}

/// Builds, sends and records orders
pub struct CheckoutService {
    aggregator: Arc<OrderAggregator>,
    sink: Arc<dyn MessageSink>,
    log: OrderLog,
    tracker: Option<EventTracker>,
}

impl CheckoutService {
    pub fn new(aggregator: Arc<OrderAggregator>, sink: Arc<dyn MessageSink>, log: OrderLog) -> Self {
        Self {
            aggregator,
            sink,
            log,
            tracker: None,
        }
    }

    pub fn with_tracker(mut self, tracker: EventTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn aggregator(&self) -> &OrderAggregator {
        &self.aggregator
    }

    pub fn log(&self) -> &OrderLog {
        &self.log
    }

    /// Validation failures leave no trace; every built order is recorded,
    /// including those the channel refused.
    ///
    /// The message is already out when the record is written, so a failed
    /// write only clears `recorded` on the receipt.
    pub async fn checkout(&self, cart: &Cart, client: &ClientInfo) -> Result<CheckoutReceipt, OrderError> {
        let snapshot = cart.clone();
        let summary = self.aggregator.build_order(&snapshot, client)?;
        let contact = self.aggregator.vendors().contact(summary.vendor).phone.clone();

        let dispatched = self.sink.send(&contact, &summary.rendered_artifact).await;
        let status = match &dispatched {
            Ok(_) => OrderStatus::Sent,
            Err(e) => {
                warn!(vendor = %summary.vendor, error = %e, "Order message not dispatched");
                OrderStatus::DispatchFailed
            }
        };

        let record = OrderRecord::new(&summary, snapshot, client.clone(), status);
        let order_id = record.id;
        let recorded = match self.log.append(record).await {
            Ok(_) => true,
            Err(e) => {
                error!(%order_id, error = %e, "Failed to record order");
                false
            }
        };

        let delivery = dispatched?;
        info!(
            %order_id,
            vendor = %summary.vendor,
            grand_total_usd = %summary.grand_total_usd,
            "Order sent"
        );

        if let Some(tracker) = &self.tracker {
            let event = OrderSentEvent {
                order_id,
                vendor: summary.vendor.to_string(),
                product_count: summary.lines.len(),
                total_usd: summary.grand_total_usd,
                timestamp: chrono::Utc::now().timestamp(),
            };
            tracker
                .track("whatsapp_order_sent", serde_json::to_value(&event).unwrap_or_default())
                .await;
        }

        Ok(CheckoutReceipt {
            order_id,
            summary,
            contact,
            delivery,
            recorded,
        })
    }

    pub async fn send_inquiry(&self, product: &Product, client_name: &str, message: &str) -> Result<Delivery, OrderError> {
        let inquiry = self.aggregator.build_inquiry(product, client_name, message)?;
        let contact = &self.aggregator.vendors().contact(inquiry.vendor).phone;

        let delivery = self.sink.send(contact, &inquiry.text).await?;
        info!(product_id = inquiry.product_id, vendor = %inquiry.vendor, "Inquiry sent");

        if let Some(tracker) = &self.tracker {
            let event = InquirySentEvent {
                product_id: inquiry.product_id,
                vendor: inquiry.vendor.to_string(),
                timestamp: chrono::Utc::now().timestamp(),
            };
            tracker
                .track("whatsapp_inquiry_sent", serde_json::to_value(&event).unwrap_or_default())
                .await;
        }

        Ok(delivery)
    }
}
