use std::sync::Arc;
use tokio::sync::Mutex;
use lbk_shared::models::AnalyticsEvent;
use tracing::{debug, warn};
use crate::repository::{append_capped, KeyValueStore};

pub const ANALYTICS_KEY: &str = "lbk_analytics";
pub const DEFAULT_ANALYTICS_CAPACITY: usize = 1000;

/// Records storefront events into a capped local log.
///
/// Tracking is best effort: storage failures are logged and swallowed so a
/// broken analytics log never fails a checkout.
#[derive(Clone)]
pub struct EventTracker {
    store: Arc<dyn KeyValueStore>,
    enabled: bool,
    capacity: usize,
    session: Option<String>,
    // Shared by clones so appends from one process never interleave
    write_lock: Arc<Mutex<()>>,
}

impl EventTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, enabled: bool, capacity: usize) -> Self {
        Self {
            store,
            enabled,
            capacity,
            session: None,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn track(&self, event: &str, data: serde_json::Value) {
        if !self.enabled {
            return;
        }

        let entry = AnalyticsEvent::new(event, self.session.clone(), data);
        let _guard = self.write_lock.lock().await;
        match append_capped(self.store.as_ref(), ANALYTICS_KEY, entry, self.capacity).await {
            Ok(len) => debug!(event, stored = len, "Analytics event recorded"),
            Err(e) => warn!(event, error = %e, "Failed to record analytics event"),
        }
    }
}
