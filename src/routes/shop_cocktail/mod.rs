mod get;
mod post;

pub use get::{get_shop_cocktail, list_shop_cocktails, GetShopCocktailError};
pub use post::{add_shop_cocktails, PostShopCocktailError, ShopCocktailsJson};
