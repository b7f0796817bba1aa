pub mod cocktail;
pub mod health_check;
pub mod order;
pub mod query;
pub mod shop;
pub mod shop_cocktail;
pub mod table;

pub use cocktail::*;
pub use health_check::health_check;
pub use order::*;
pub use shop::*;
pub use shop_cocktail::*;
pub use table::*;
