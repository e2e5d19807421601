use lbk_catalog::Cart;
use serde::{Deserialize, Serialize};
use crate::cost::CostCalculator;
use crate::mode::{requires_boat, TransportMode};

/// A priced transport option offered at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingOption {
    pub mode: TransportMode,
    pub label: String,
    pub cost_usd: u64,
    pub eta_days: u32,
    pub delivery_window: String,
    pub is_forced: bool,
}

/// Builds the ranked option list for a cart
#[derive(Debug, Clone)]
pub struct ShippingOptionsBuilder {
    calculator: CostCalculator,
}

impl ShippingOptionsBuilder {
    pub fn new(calculator: CostCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &CostCalculator {
        &self.calculator
    }

    /// Express, normal, boat for ordinary carts; a single forced boat option
    /// when the cart holds hazardous goods.
    pub fn list_options(&self, cart: &Cart) -> Vec<ShippingOption> {
        let modes: &[TransportMode] = if requires_boat(cart) {
            &[TransportMode::Boat]
        } else {
            &TransportMode::ALL
        };

        modes.iter().map(|mode| self.option_for(cart, *mode)).collect()
    }

    /// The option the cart will actually ship under when `requested` is asked for
    pub fn option_for(&self, cart: &Cart, requested: TransportMode) -> ShippingOption {
        let quote = self.calculator.quote(cart, requested);

        ShippingOption {
            mode: quote.mode,
            label: quote.mode.label().to_string(),
            cost_usd: quote.cost_usd,
            eta_days: quote.mode.eta_days(),
            delivery_window: quote.mode.delivery_window().to_string(),
            is_forced: quote.forced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;
    use lbk_catalog::{CartLine, ProductCategory, Usd, Vendor};
    use std::sync::Arc;

    fn builder() -> ShippingOptionsBuilder {
        ShippingOptionsBuilder::new(CostCalculator::new(Arc::new(RateTable::default())))
    }

    fn cart_of(categories: &[ProductCategory]) -> Cart {
        Cart::from_lines(categories.iter().enumerate().map(|(i, category)| {
            CartLine::new(i as u64 + 1, "item", *category, Vendor::Betty, 1, Usd::from_cents(2_000)).unwrap()
        }))
        .unwrap()
    }

    #[test]
    fn test_safe_cart_gets_three_options_in_order() {
        let cart = cart_of(&[ProductCategory::Clothing, ProductCategory::Phones]);
        let options = builder().list_options(&cart);

        let modes: Vec<_> = options.iter().map(|o| o.mode).collect();
        assert_eq!(modes, vec![TransportMode::AirExpress, TransportMode::AirNormal, TransportMode::Boat]);

        let etas: Vec<_> = options.iter().map(|o| o.eta_days).collect();
        assert_eq!(etas, vec![15, 21, 35]);
        assert!(options.iter().all(|o| !o.is_forced));
        assert_eq!(options[2].delivery_window, "30-45 days");
    }

    #[test]
    fn test_hazardous_cart_only_offers_forced_boat() {
        let cart = cart_of(&[ProductCategory::Electronics]);
        let options = builder().list_options(&cart);

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].mode, TransportMode::Boat);
        assert!(options[0].is_forced);
        assert_eq!(options[0].cost_usd, 5);
        assert!(options.iter().all(|o| !o.mode.is_air()));
    }

    #[test]
    fn test_requesting_air_on_hazardous_cart_quotes_boat() {
        let cart = cart_of(&[ProductCategory::Appliances, ProductCategory::Clothing]);
        let builder = builder();

        let requested = builder.option_for(&cart, TransportMode::AirExpress);
        let boat = builder.option_for(&cart, TransportMode::Boat);
        assert_eq!(requested, boat);
        assert_eq!(requested.mode, TransportMode::Boat);
    }
}
