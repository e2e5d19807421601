use lbk_catalog::{Cart, Product, Usd};
use lbk_shared::Masked;
use lbk_shipping::{select_mode, ShippingOptionsBuilder};
use tracing::debug;
use crate::dispatch::SinkError;
use crate::models::{ClientInfo, Inquiry, OrderLine, OrderSummary};
use crate::routing::VendorDirectory;
use crate::template::{Template, TemplateError, INQUIRY_TEMPLATE, ORDER_TEMPLATE};

/// Turns a cart and client details into a priced, routed order message.
///
/// Building an order performs no I/O; recording and sending it is the job of
/// [`crate::dispatch::CheckoutService`].
pub struct OrderAggregator {
    shipping: ShippingOptionsBuilder,
    vendors: VendorDirectory,
    order_template: Template,
    inquiry_template: Template,
}

impl OrderAggregator {
    pub fn new(shipping: ShippingOptionsBuilder, vendors: VendorDirectory) -> Result<Self, OrderError> {
        Ok(Self {
            shipping,
            vendors,
            order_template: Template::parse(ORDER_TEMPLATE)?,
            inquiry_template: Template::parse(INQUIRY_TEMPLATE)?,
        })
    }

    pub fn vendors(&self) -> &VendorDirectory {
        &self.vendors
    }

    pub fn shipping(&self) -> &ShippingOptionsBuilder {
        &self.shipping
    }

    pub fn build_order(&self, cart: &Cart, client: &ClientInfo) -> Result<OrderSummary, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::ValidationError("cart is empty".to_string()));
        }
        client.validate()?;

        let vendor = self.vendors.resolve_vendor(cart);

        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(OrderLine {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price_usd: line.unit_price_usd,
                    line_total_usd: line.line_total_usd().ok_or_else(amount_overflow)?,
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        let products_total_usd = lines
            .iter()
            .try_fold(Usd::ZERO, |acc, line| acc.checked_add(line.line_total_usd))
            .ok_or_else(amount_overflow)?;

        let mode = select_mode(cart, &client.shipping_mode);
        let shipping = self.shipping.option_for(cart, mode);
        let grand_total_usd = Usd::from_dollars(shipping.cost_usd)
            .and_then(|freight| products_total_usd.checked_add(freight))
            .ok_or_else(amount_overflow)?;

        let products_list = lines
            .iter()
            .map(|line| format!("• {} ×{} — {} $", line.name, line.quantity, line.line_total_usd))
            .collect::<Vec<_>>()
            .join("\n");

        let rendered_artifact = self.order_template.render(&[
            ("client_name", client.name.trim().to_string()),
            ("client_phone", client.phone.trim().to_string()),
            ("products_list", products_list),
            ("products_total", products_total_usd.to_string()),
            ("shipping_cost", shipping.cost_usd.to_string()),
            ("grand_total", grand_total_usd.to_string()),
            ("delivery_address", client.address.trim().to_string()),
            ("shipping_mode", shipping.label.clone()),
            ("delivery_days", shipping.delivery_window.clone()),
            ("payment_method", client.payment_method.trim().to_string()),
        ])?;

        debug!(
            %vendor,
            mode = %shipping.mode,
            forced = shipping.is_forced,
            %grand_total_usd,
            phone = %Masked(&client.phone),
            "Order built"
        );

        Ok(OrderSummary {
            vendor,
            lines,
            products_total_usd,
            shipping_cost_usd: shipping.cost_usd,
            grand_total_usd,
            delivery_eta_days: shipping.eta_days,
            shipping,
            rendered_artifact,
        })
    }

    /// Question about a single product, routed to that product's vendor
    pub fn build_inquiry(&self, product: &Product, client_name: &str, message: &str) -> Result<Inquiry, OrderError> {
        if client_name.trim().is_empty() {
            return Err(OrderError::ValidationError("missing required client field: name".to_string()));
        }
        if message.trim().is_empty() {
            return Err(OrderError::ValidationError("inquiry message is empty".to_string()));
        }

        let text = self.inquiry_template.render(&[
            ("product_name", product.name.clone()),
            ("product_id", product.id.to_string()),
            ("client_name", client_name.trim().to_string()),
            ("client_message", message.trim().to_string()),
        ])?;

        Ok(Inquiry {
            product_id: product.id,
            vendor: product.vendor,
            text,
        })
    }
}

fn amount_overflow() -> OrderError {
    OrderError::ValidationError("order amount overflows".to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Message template error: {0}")]
    TemplateError(#[from] TemplateError),

    #[error("Message dispatch failed: {0}")]
    DispatchError(#[from] SinkError),
}
