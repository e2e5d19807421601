use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::money::Usd;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct OrderSentEvent {
    pub order_id: Uuid,
    pub vendor: String,
    pub product_count: usize,
    pub total_usd: Usd,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct InquirySentEvent {
    pub product_id: u64,
    pub vendor: String,
    pub timestamp: i64,
}

/// Entry of the local analytics log
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub event: String,
    pub timestamp: DateTime<Utc>,
    pub session: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl AnalyticsEvent {
    pub fn new(event: impl Into<String>, session: Option<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            timestamp: Utc::now(),
            session,
            data,
        }
    }
}
