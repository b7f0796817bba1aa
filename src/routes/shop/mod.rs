mod get;
mod post;

pub use get::{get_shop, list_shops, GetShopError};
pub use post::{create_shop, PostShopError, ShopJson};
