use lbk_core::repository::{append_capped, load_json, KeyValueStore};
use lbk_core::CoreResult;
use std::sync::Arc;
use tokio::sync::Mutex;
use crate::models::OrderRecord;

pub const ORDER_LOG_KEY: &str = "lbk_orders";
pub const DEFAULT_ORDER_LOG_CAPACITY: usize = 100;

/// History of sent orders, most recent last, capped to `capacity` entries
#[derive(Clone)]
pub struct OrderLog {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
    // Serializes appends from this process
    write_lock: Arc<Mutex<()>>,
}

impl OrderLog {
    pub fn new(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn append(&self, record: OrderRecord) -> CoreResult<usize> {
        let _guard = self.write_lock.lock().await;
        append_capped(self.store.as_ref(), ORDER_LOG_KEY, record, self.capacity).await
    }

    pub async fn recent(&self) -> CoreResult<Vec<OrderRecord>> {
        Ok(load_json(self.store.as_ref(), ORDER_LOG_KEY).await?.unwrap_or_default())
    }
}
