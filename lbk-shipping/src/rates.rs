use lbk_catalog::ProductCategory;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use crate::mode::TransportMode;

/// Per-unit shipping estimates for a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub weight_kg: f64,
    pub volume_m3: f64,
}

impl CategoryProfile {
    /// Estimate for categories missing from the table
    pub const FALLBACK: CategoryProfile = CategoryProfile {
        weight_kg: 1.0,
        volume_m3: 0.01,
    };

    pub const fn new(weight_kg: f64, volume_m3: f64) -> Self {
        Self { weight_kg, volume_m3 }
    }
}

impl Default for CategoryProfile {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Air freight tariff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirRate {
    /// Handling fee in local currency (FCFA)
    pub base_fee_local: f64,
    /// Local currency units per USD
    pub conversion_rate: f64,
    pub per_kg_usd: f64,
    /// Flat per-unit prices that replace the weight based charge
    #[serde(default)]
    pub per_unit_overrides_usd: BTreeMap<ProductCategory, f64>,
}

impl AirRate {
    fn with_defaults(base_fee_local: f64, per_kg_usd: f64) -> Self {
        Self {
            base_fee_local,
            conversion_rate: 600.0,
            per_kg_usd,
            per_unit_overrides_usd: BTreeMap::from([
                (ProductCategory::Phones, 30.0),
                (ProductCategory::Laptops, 50.0),
            ]),
        }
    }

    pub fn base_fee_usd(&self) -> f64 {
        self.base_fee_local / self.conversion_rate
    }

    pub fn unit_override(&self, category: ProductCategory) -> Option<f64> {
        self.per_unit_overrides_usd.get(&category).copied()
    }
}

/// Sea freight tariff, billed on volume or weight whichever costs more
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoatRate {
    pub per_cubic_meter_usd: f64,
    pub per_ton_usd: f64,
}

/// Read-only rate configuration for every transport mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    /// Configured entries are layered over the built-in profiles
    #[serde(deserialize_with = "profiles_over_defaults")]
    pub profiles: BTreeMap<ProductCategory, CategoryProfile>,
    pub fallback_profile: CategoryProfile,
    pub air_express: AirRate,
    pub air_normal: AirRate,
    pub boat: BoatRate,
}

fn default_profiles() -> BTreeMap<ProductCategory, CategoryProfile> {
    BTreeMap::from([
        (ProductCategory::Phones, CategoryProfile::new(0.2, 0.0001)),
        (ProductCategory::Laptops, CategoryProfile::new(1.5, 0.001)),
        (ProductCategory::Clothing, CategoryProfile::new(0.5, 0.002)),
        (ProductCategory::Pharmacy, CategoryProfile::new(0.1, 0.0005)),
        (ProductCategory::Cosmetics, CategoryProfile::new(0.3, 0.0003)),
        (ProductCategory::Appliances, CategoryProfile::new(10.0, 0.5)),
        (ProductCategory::Auto, CategoryProfile::new(5.0, 0.3)),
    ])
}

fn profiles_over_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<ProductCategory, CategoryProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let configured = BTreeMap::<ProductCategory, CategoryProfile>::deserialize(deserializer)?;
    let mut profiles = default_profiles();
    profiles.extend(configured);
    Ok(profiles)
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            fallback_profile: CategoryProfile::FALLBACK,
            air_express: AirRate::with_defaults(25_000.0, 30.0),
            air_normal: AirRate::with_defaults(18_000.0, 28.0),
            boat: BoatRate {
                per_cubic_meter_usd: 500.0,
                per_ton_usd: 600.0,
            },
        }
    }
}

impl RateTable {
    /// Weight and volume estimate, falling back for unlisted categories
    pub fn profile(&self, category: ProductCategory) -> CategoryProfile {
        match self.profiles.get(&category) {
            Some(profile) => *profile,
            None => {
                debug!(%category, "No rate profile for category, using fallback estimate");
                self.fallback_profile
            }
        }
    }

    /// `None` for boat
    pub fn air_rate(&self, mode: TransportMode) -> Option<&AirRate> {
        match mode {
            TransportMode::AirExpress => Some(&self.air_express),
            TransportMode::AirNormal => Some(&self.air_normal),
            TransportMode::Boat => None,
        }
    }

    /// Reject configurations that would produce negative or non-finite costs
    pub fn validate(&self) -> Result<(), RateError> {
        fn check(field: String, value: f64) -> Result<(), RateError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(RateError::InvalidRate { field, value })
            }
        }

        for (category, profile) in &self.profiles {
            check(format!("profiles.{}.weight_kg", category), profile.weight_kg)?;
            check(format!("profiles.{}.volume_m3", category), profile.volume_m3)?;
        }
        check("fallback_profile.weight_kg".into(), self.fallback_profile.weight_kg)?;
        check("fallback_profile.volume_m3".into(), self.fallback_profile.volume_m3)?;

        for (name, air) in [("air_express", &self.air_express), ("air_normal", &self.air_normal)] {
            if !(air.conversion_rate.is_finite() && air.conversion_rate > 0.0) {
                return Err(RateError::InvalidConversion {
                    mode: name.to_string(),
                    value: air.conversion_rate,
                });
            }
            check(format!("{}.base_fee_local", name), air.base_fee_local)?;
            check(format!("{}.per_kg_usd", name), air.per_kg_usd)?;
            for (category, price) in &air.per_unit_overrides_usd {
                check(format!("{}.per_unit_overrides_usd.{}", name, category), *price)?;
            }
        }

        check("boat.per_cubic_meter_usd".into(), self.boat.per_cubic_meter_usd)?;
        check("boat.per_ton_usd".into(), self.boat.per_ton_usd)?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RateError {
    #[error("Invalid rate {field}: {value}")]
    InvalidRate { field: String, value: f64 },

    #[error("Conversion rate for {mode} must be positive, got {value}")]
    InvalidConversion { mode: String, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_are_valid() {
        let rates = RateTable::default();
        assert_eq!(rates.validate(), Ok(()));
        assert!((rates.air_express.base_fee_usd() - 41.6667).abs() < 0.001);
        assert_eq!(rates.air_normal.base_fee_usd(), 30.0);
    }

    #[test]
    fn test_unlisted_category_uses_fallback() {
        let rates = RateTable::default();
        assert_eq!(rates.profile(ProductCategory::Electronics), CategoryProfile::FALLBACK);
        assert_eq!(rates.profile(ProductCategory::Other), CategoryProfile::FALLBACK);
        assert_eq!(rates.profile(ProductCategory::Appliances).weight_kg, 10.0);
    }

    #[test]
    fn test_overrides_only_for_phones_and_laptops() {
        let rates = RateTable::default();
        assert_eq!(rates.air_express.unit_override(ProductCategory::Phones), Some(30.0));
        assert_eq!(rates.air_normal.unit_override(ProductCategory::Laptops), Some(50.0));
        assert_eq!(rates.air_express.unit_override(ProductCategory::Clothing), None);
        assert!(rates.air_rate(TransportMode::Boat).is_none());
    }

    #[test]
    fn test_validation_rejects_zero_conversion() {
        let mut rates = RateTable::default();
        rates.air_normal.conversion_rate = 0.0;
        assert!(matches!(rates.validate(), Err(RateError::InvalidConversion { .. })));
    }

    #[test]
    fn test_validation_rejects_negative_rate() {
        let mut rates = RateTable::default();
        rates.boat.per_ton_usd = -1.0;
        assert_eq!(
            rates.validate(),
            Err(RateError::InvalidRate { field: "boat.per_ton_usd".to_string(), value: -1.0 })
        );
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = serde_json::json!({
            "boat": { "per_cubic_meter_usd": 450.0, "per_ton_usd": 600.0 }
        });

        let rates: RateTable = serde_json::from_value(json).unwrap();
        assert_eq!(rates.boat.per_cubic_meter_usd, 450.0);
        assert_eq!(rates.air_express, RateTable::default().air_express);
        assert_eq!(rates.profiles.len(), 7);
    }

    #[test]
    fn test_configured_profile_overlays_defaults() {
        let json = serde_json::json!({
            "profiles": { "phones": { "weight_kg": 0.25, "volume_m3": 0.0001 } }
        });

        let rates: RateTable = serde_json::from_value(json).unwrap();
        assert_eq!(rates.profile(ProductCategory::Phones).weight_kg, 0.25);
        assert_eq!(rates.profile(ProductCategory::Auto).weight_kg, 5.0);
        assert_eq!(rates.profiles.len(), 7);
    }
}
