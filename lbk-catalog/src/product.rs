use lbk_shared::Usd;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ProductId = u64;

/// Product categories known to the storefront.
///
/// Decoded from plain strings so it also works as a map key in configuration
/// files; unknown names become `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ProductCategory {
    Electronics,
    Appliances,
    Auto,
    Phones,
    Laptops,
    Clothing,
    Cosmetics,
    Pharmacy,
    /// Any category a catalog feed sends that this build does not know
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 9] = [
        ProductCategory::Electronics,
        ProductCategory::Appliances,
        ProductCategory::Auto,
        ProductCategory::Phones,
        ProductCategory::Laptops,
        ProductCategory::Clothing,
        ProductCategory::Cosmetics,
        ProductCategory::Pharmacy,
        ProductCategory::Other,
    ];

    /// Battery-bearing goods that may not travel by air
    pub fn is_hazardous(&self) -> bool {
        matches!(self, ProductCategory::Electronics | ProductCategory::Appliances)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Appliances => "appliances",
            ProductCategory::Auto => "auto",
            ProductCategory::Phones => "phones",
            ProductCategory::Laptops => "laptops",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Cosmetics => "cosmetics",
            ProductCategory::Pharmacy => "pharmacy",
            ProductCategory::Other => "other",
        }
    }
}

impl From<String> for ProductCategory {
    fn from(name: String) -> Self {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == name.trim())
            .unwrap_or(ProductCategory::Other)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two boutiques supplying the storefront.
///
/// Declaration order is the listing order: `Laurent` is vendor A and wins
/// routing ties.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Laurent,
    Betty,
}

impl Vendor {
    pub const ALL: [Vendor; 2] = [Vendor::Laurent, Vendor::Betty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Laurent => "laurent",
            Vendor::Betty => "betty",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Held in local stock
    Stock,
    /// Ordered from abroad on demand
    Order,
}

/// Catalog entry as served by the product feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    #[serde(alias = "boutique")]
    pub vendor: Vendor,
    pub availability: Availability,
    #[serde(alias = "price")]
    pub price_usd: Usd,
    #[serde(default, alias = "oldPrice", skip_serializing_if = "Option::is_none")]
    pub old_price_usd: Option<Usd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category specific details (model, size, dosage...)
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.availability == Availability::Stock
    }
}

/// Built-in products used when neither the feed nor the cache is usable
pub fn default_products() -> Vec<Product> {
    let mut iphone_attrs = serde_json::Map::new();
    iphone_attrs.insert("model".into(), "A2848".into());
    iphone_attrs.insert("specs".into(), "256GB, 6.7\", iOS 17".into());
    iphone_attrs.insert("warranty".into(), "1 year".into());

    let mut dress_attrs = serde_json::Map::new();
    dress_attrs.insert("size".into(), "M".into());
    dress_attrs.insert("color".into(), "Black".into());
    dress_attrs.insert("material".into(), "Silk".into());

    vec![
        Product {
            id: 1,
            name: "iPhone 15 Pro Max".to_string(),
            category: ProductCategory::Electronics,
            vendor: Vendor::Laurent,
            availability: Availability::Order,
            price_usd: Usd::from_cents(120_000),
            old_price_usd: None,
            image: Some("/assets/images/products/iphone15.jpg".to_string()),
            attributes: iphone_attrs,
        },
        Product {
            id: 2,
            name: "Evening dress".to_string(),
            category: ProductCategory::Clothing,
            vendor: Vendor::Betty,
            availability: Availability::Stock,
            price_usd: Usd::from_cents(8_500),
            old_price_usd: None,
            image: Some("/assets/images/products/dress.jpg".to_string()),
            attributes: dress_attrs,
        },
    ]
}
