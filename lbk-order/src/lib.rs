pub mod models;
pub mod routing;
pub mod template;
pub mod aggregator;
pub mod audit;
pub mod dispatch;

pub use models::{ClientInfo, Inquiry, OrderLine, OrderRecord, OrderStatus, OrderSummary};
pub use routing::{VendorContact, VendorDirectory};
pub use template::{Template, TemplateError};
pub use aggregator::{OrderAggregator, OrderError};
pub use audit::OrderLog;
pub use dispatch::{CheckoutReceipt, CheckoutService, Delivery, MessageSink, SinkError, WhatsAppLinkSink};
