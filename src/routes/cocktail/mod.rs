mod get;
mod post;

pub use get::{get_cocktail, list_cocktails, list_cocktails_by_ids, GetCocktailError};
pub use post::{create_cocktail, CocktailJson, MaterialJson, PostCocktailError, QuantityJson};
