use lbk_shared::Usd;
use serde::{Deserialize, Serialize};
use crate::product::{Product, ProductCategory, ProductId, Vendor};

/// One product in the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub vendor: Vendor,
    pub quantity: u32,
    pub unit_price_usd: Usd,
}

impl CartLine {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        category: ProductCategory,
        vendor: Vendor,
        quantity: u32,
        unit_price_usd: Usd,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity(product_id));
        }

        Ok(Self {
            product_id,
            name: name.into(),
            category,
            vendor,
            quantity,
            unit_price_usd,
        })
    }

    pub fn from_product(product: &Product, quantity: u32) -> Result<Self, CartError> {
        Self::new(
            product.id,
            product.name.clone(),
            product.category,
            product.vendor,
            quantity,
            product.price_usd,
        )
    }

    /// `None` on overflow
    pub fn line_total_usd(&self) -> Option<Usd> {
        self.unit_price_usd.checked_mul(self.quantity)
    }
}

/// Ordered cart, unique by product id.
///
/// Cloning a cart is how callers take a snapshot before quoting or checkout.
/// Serialized as a plain array of lines; decoding re-checks the invariants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines, merging duplicate product ids
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for line in lines {
            cart.add_line(line)?;
        }
        Ok(cart)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of a catalog product
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        self.add_line(CartLine::from_product(product, quantity)?)
    }

    /// Insert a line, or bump the quantity of the existing one
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CartError> {
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity(line.product_id));
        }

        match self.lines.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or(CartError::QuantityOverflow(line.product_id))?;
            }
            None => self.lines.push(line),
        }
        Ok(())
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity(product_id));
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units across lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Σ unit price × quantity, `None` on overflow
    pub fn products_total_usd(&self) -> Option<Usd> {
        self.lines
            .iter()
            .try_fold(Usd::ZERO, |acc, line| acc.checked_add(line.line_total_usd()?))
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Quantity must be at least 1 for product {0}")]
    ZeroQuantity(ProductId),

    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    #[error("Product {0} not found in catalog")]
    UnknownProduct(ProductId),

    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),
}
