use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Non-negative USD amount held as whole cents.
///
/// On the wire it is a plain JSON number of dollars, so feeds may send `85`
/// or `4.99`. Whole amounts are written back as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Usd(u64);

impl Usd {
    pub const ZERO: Usd = Usd(0);

    pub const fn from_cents(cents: u64) -> Self {
        Usd(cents)
    }

    /// `None` when the amount does not fit
    pub fn from_dollars(dollars: u64) -> Option<Self> {
        dollars.checked_mul(100).map(Usd)
    }

    /// Rounds to the nearest cent; `None` for negative or non-finite input
    pub fn from_decimal(dollars: f64) -> Option<Self> {
        if !dollars.is_finite() || dollars < 0.0 {
            return None;
        }
        let cents = (dollars * 100.0).round();
        if cents >= u64::MAX as f64 {
            return None;
        }
        Some(Usd(cents as u64))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_whole(&self) -> bool {
        self.0 % 100 == 0
    }

    pub fn checked_add(self, other: Usd) -> Option<Usd> {
        self.0.checked_add(other.0).map(Usd)
    }

    pub fn checked_mul(self, quantity: u32) -> Option<Usd> {
        self.0.checked_mul(u64::from(quantity)).map(Usd)
    }
}

impl fmt::Display for Usd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 / 100)
        } else {
            write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
        }
    }
}

impl Serialize for Usd {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_whole() {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

struct UsdVisitor;

impl<'de> Visitor<'de> for UsdVisitor {
    type Value = Usd;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative dollar amount")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Usd, E> {
        Usd::from_dollars(value).ok_or_else(|| E::custom(format!("amount {} is too large", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Usd, E> {
        let value = u64::try_from(value).map_err(|_| E::custom(format!("negative amount {}", value)))?;
        self.visit_u64(value)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Usd, E> {
        Usd::from_decimal(value).ok_or_else(|| E::custom(format!("invalid amount {}", value)))
    }
}

impl<'de> Deserialize<'de> for Usd {
    fn deserialize<D>(deserializer: D) -> Result<Usd, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UsdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_price_parses_to_cents() {
        let price: Usd = serde_json::from_str("4.99").unwrap();
        assert_eq!(price.cents(), 499);
        assert_eq!(price.to_string(), "4.99");

        let price: Usd = serde_json::from_str("85").unwrap();
        assert_eq!(price, Usd::from_cents(8_500));
        assert_eq!(price.to_string(), "85");
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        assert!(serde_json::from_str::<Usd>("-1").is_err());
        assert!(serde_json::from_str::<Usd>("-0.5").is_err());
        assert!(serde_json::from_str::<Usd>("\"12\"").is_err());
        assert!(serde_json::from_str::<Usd>("18446744073709551615").is_err());
    }

    #[test]
    fn test_whole_amounts_serialize_as_integers() {
        assert_eq!(serde_json::to_value(Usd::from_cents(17_000)).unwrap(), serde_json::json!(170));
        assert_eq!(serde_json::to_value(Usd::from_cents(1_497)).unwrap(), serde_json::json!(14.97));
    }

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Usd::from_cents(1_205).to_string(), "12.05");
        assert_eq!(Usd::ZERO.to_string(), "0");
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Usd::from_cents(499).checked_mul(3), Some(Usd::from_cents(1_497)));
        assert_eq!(Usd::from_cents(u64::MAX).checked_add(Usd::from_cents(1)), None);
        assert_eq!(Usd::from_dollars(u64::MAX), None);
    }
}
