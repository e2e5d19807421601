pub mod pii;
pub mod money;
pub mod models;

pub use pii::Masked;
pub use money::Usd;
