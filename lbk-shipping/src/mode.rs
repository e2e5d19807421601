use lbk_catalog::Cart;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Ways a cart can travel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    AirExpress,
    AirNormal,
    Boat,
}

impl TransportMode {
    /// Presentation order
    pub const ALL: [TransportMode; 3] = [
        TransportMode::AirExpress,
        TransportMode::AirNormal,
        TransportMode::Boat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::AirExpress => "air_express",
            TransportMode::AirNormal => "air_normal",
            TransportMode::Boat => "boat",
        }
    }

    pub fn is_air(&self) -> bool {
        !matches!(self, TransportMode::Boat)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::AirExpress => "✈️ Air Express",
            TransportMode::AirNormal => "✈️ Air Normal",
            TransportMode::Boat => "⛵ Sea Freight (CBM)",
        }
    }

    /// Representative delivery estimate
    pub fn eta_days(&self) -> u32 {
        match self {
            TransportMode::AirExpress => 15,
            TransportMode::AirNormal => 21,
            TransportMode::Boat => 35,
        }
    }

    /// Delivery estimate as shown to the buyer
    pub fn delivery_window(&self) -> &'static str {
        match self {
            TransportMode::AirExpress => "15 days",
            TransportMode::AirNormal => "21 days",
            TransportMode::Boat => "30-45 days",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = UnrecognizedMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "air_express" => Ok(TransportMode::AirExpress),
            "air_normal" => Ok(TransportMode::AirNormal),
            "boat" => Ok(TransportMode::Boat),
            other => Err(UnrecognizedMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unrecognized transport mode: {0:?}")]
pub struct UnrecognizedMode(pub String);

/// Effective mode for a cart and whether policy overrode the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDecision {
    pub mode: TransportMode,
    pub forced: bool,
}

/// True when the cart holds battery-bearing goods and must go by sea.
///
/// Every component asks this module instead of checking categories itself.
pub fn requires_boat(cart: &Cart) -> bool {
    cart.lines().iter().any(|line| line.category.is_hazardous())
}

/// Apply the hazardous goods rule to a requested mode
pub fn resolve_mode(cart: &Cart, requested: TransportMode) -> ModeDecision {
    if requires_boat(cart) {
        ModeDecision {
            mode: TransportMode::Boat,
            forced: true,
        }
    } else {
        ModeDecision {
            mode: requested,
            forced: false,
        }
    }
}

/// Parse a client supplied mode and resolve it for the cart.
///
/// Unknown modes fall back to boat, the most conservative option.
pub fn select_mode(cart: &Cart, requested: &str) -> TransportMode {
    let requested = requested.parse().unwrap_or_else(|e: UnrecognizedMode| {
        warn!("{}, falling back to boat", e);
        TransportMode::Boat
    });

    resolve_mode(cart, requested).mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbk_catalog::{CartLine, ProductCategory, Usd, Vendor};
    use rstest::rstest;

    fn cart_of(categories: &[ProductCategory]) -> Cart {
        Cart::from_lines(categories.iter().enumerate().map(|(i, category)| {
            CartLine::new(i as u64 + 1, "item", *category, Vendor::Laurent, 1, Usd::from_cents(1_000)).unwrap()
        }))
        .unwrap()
    }

    #[rstest]
    #[case("air_express")]
    #[case("air_normal")]
    #[case("boat")]
    #[case("teleport")]
    fn test_hazardous_cart_always_boat(#[case] requested: &str) {
        for hazardous in [ProductCategory::Electronics, ProductCategory::Appliances] {
            let cart = cart_of(&[ProductCategory::Clothing, hazardous]);
            assert_eq!(select_mode(&cart, requested), TransportMode::Boat);
        }
    }

    #[rstest]
    #[case("air_express", TransportMode::AirExpress)]
    #[case("air_normal", TransportMode::AirNormal)]
    #[case("boat", TransportMode::Boat)]
    fn test_safe_cart_keeps_requested_mode(#[case] requested: &str, #[case] expected: TransportMode) {
        let cart = cart_of(&[ProductCategory::Phones, ProductCategory::Clothing]);
        assert_eq!(select_mode(&cart, requested), expected);
    }

    #[test]
    fn test_unrecognized_mode_falls_back_to_boat() {
        let cart = cart_of(&[ProductCategory::Clothing]);
        assert_eq!(select_mode(&cart, "hyperloop"), TransportMode::Boat);
        assert_eq!(select_mode(&cart, ""), TransportMode::Boat);
        assert_eq!(
            "hyperloop".parse::<TransportMode>(),
            Err(UnrecognizedMode("hyperloop".to_string()))
        );
    }

    #[test]
    fn test_forced_flag() {
        let hazardous = cart_of(&[ProductCategory::Electronics]);
        assert_eq!(
            resolve_mode(&hazardous, TransportMode::AirExpress),
            ModeDecision { mode: TransportMode::Boat, forced: true }
        );

        let safe = cart_of(&[ProductCategory::Pharmacy]);
        assert_eq!(
            resolve_mode(&safe, TransportMode::AirNormal),
            ModeDecision { mode: TransportMode::AirNormal, forced: false }
        );
    }

    #[test]
    fn test_mode_wire_names() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.as_str().parse::<TransportMode>(), Ok(mode));
            assert_eq!(serde_json::to_value(mode).unwrap(), mode.as_str());
        }
    }
}
