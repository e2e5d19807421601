pub mod events;

pub use events::{AnalyticsEvent, InquirySentEvent, OrderSentEvent};
