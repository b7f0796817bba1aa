pub mod cocktail;
pub mod entity_name;
pub mod page;
pub mod shop;

pub use cocktail::{Cocktail, CocktailDetail, Material, MaterialQuantity, NewCocktail, NewMaterial};
pub use entity_name::EntityName;
pub use page::Page;
pub use shop::{Order, Shop, ShopCocktail, ShopTable, TableOrder};
