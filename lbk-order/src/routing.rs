use lbk_catalog::{Cart, ProductCategory, Vendor};
use serde::{Deserialize, Serialize};

/// How to reach a vendor and which categories it supplies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VendorContact {
    pub phone: String,
    pub categories: Vec<ProductCategory>,
}

impl VendorContact {
    pub fn supplies(&self, category: ProductCategory) -> bool {
        self.categories.contains(&category)
    }
}

/// Contact book for the two boutiques
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VendorDirectory {
    pub laurent: VendorContact,
    pub betty: VendorContact,
}

impl Default for VendorDirectory {
    fn default() -> Self {
        Self {
            laurent: VendorContact {
                phone: "+243822937321".to_string(),
                categories: vec![
                    ProductCategory::Electronics,
                    ProductCategory::Appliances,
                    ProductCategory::Auto,
                ],
            },
            betty: VendorContact {
                phone: "+243971455335".to_string(),
                categories: vec![
                    ProductCategory::Clothing,
                    ProductCategory::Cosmetics,
                    ProductCategory::Pharmacy,
                ],
            },
        }
    }
}

impl VendorDirectory {
    pub fn contact(&self, vendor: Vendor) -> &VendorContact {
        match vendor {
            Vendor::Laurent => &self.laurent,
            Vendor::Betty => &self.betty,
        }
    }

    /// Number of cart lines falling in the vendor's category set
    pub fn line_count(&self, cart: &Cart, vendor: Vendor) -> usize {
        let contact = self.contact(vendor);
        cart.lines().iter().filter(|line| contact.supplies(line.category)).count()
    }

    /// Pick the single vendor an order is sent to.
    ///
    /// The vendor supplying the most lines wins. Ties, including carts where
    /// no line matches either set, go to the first listed vendor (Laurent).
    pub fn resolve_vendor(&self, cart: &Cart) -> Vendor {
        let mut best = Vendor::ALL[0];
        let mut best_count = self.line_count(cart, best);

        for vendor in Vendor::ALL.into_iter().skip(1) {
            let count = self.line_count(cart, vendor);
            if count > best_count {
                best = vendor;
                best_count = count;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbk_catalog::{CartLine, Usd};

    fn cart_of(categories: &[ProductCategory]) -> Cart {
        Cart::from_lines(categories.iter().enumerate().map(|(i, category)| {
            CartLine::new(i as u64 + 1, "item", *category, Vendor::Betty, 1, Usd::from_cents(1_000)).unwrap()
        }))
        .unwrap()
    }

    #[test]
    fn test_majority_vendor_wins() {
        let directory = VendorDirectory::default();

        let cart = cart_of(&[ProductCategory::Clothing, ProductCategory::Cosmetics, ProductCategory::Auto]);
        assert_eq!(directory.resolve_vendor(&cart), Vendor::Betty);

        let cart = cart_of(&[ProductCategory::Electronics, ProductCategory::Auto, ProductCategory::Pharmacy]);
        assert_eq!(directory.resolve_vendor(&cart), Vendor::Laurent);
    }

    #[test]
    fn test_tie_goes_to_first_listed_vendor() {
        let directory = VendorDirectory::default();

        let cart = cart_of(&[ProductCategory::Appliances, ProductCategory::Pharmacy]);
        assert_eq!(directory.line_count(&cart, Vendor::Laurent), 1);
        assert_eq!(directory.line_count(&cart, Vendor::Betty), 1);
        assert_eq!(directory.resolve_vendor(&cart), Vendor::Laurent);
    }

    #[test]
    fn test_unmatched_categories_go_to_first_vendor() {
        // Phones and laptops are in neither category set
        let cart = cart_of(&[ProductCategory::Phones, ProductCategory::Laptops]);
        assert_eq!(VendorDirectory::default().resolve_vendor(&cart), Vendor::Laurent);
    }

    #[test]
    fn test_counts_lines_not_units() {
        let directory = VendorDirectory::default();
        let cart = Cart::from_lines(vec![
            CartLine::new(1, "dress", ProductCategory::Clothing, Vendor::Betty, 10, Usd::from_cents(8_500)).unwrap(),
            CartLine::new(2, "tyre", ProductCategory::Auto, Vendor::Laurent, 1, Usd::from_cents(9_000)).unwrap(),
            CartLine::new(3, "fridge", ProductCategory::Appliances, Vendor::Laurent, 1, Usd::from_cents(40_000)).unwrap(),
        ])
        .unwrap();

        assert_eq!(directory.resolve_vendor(&cart), Vendor::Laurent);
    }
}
