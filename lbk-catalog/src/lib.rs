pub mod product;
pub mod cart;
pub mod source;
pub mod store;

pub use product::{Availability, Product, ProductCategory, ProductId, Vendor};
pub use cart::{Cart, CartError, CartLine};
pub use source::{Catalog, CatalogError, CatalogLoader, ProductSource};
pub use store::CartRepository;
pub use lbk_shared::Usd;
