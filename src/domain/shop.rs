use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Shop{
    pub id: i64,
    pub name: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ShopTable{
    pub id: i64,
    pub shop_id: i64
}

// Permission for a shop to sell a cocktail
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShopCocktail{
    pub id: i64,
    pub shop_id: i64,
    pub cocktail_id: i64
}

/// Order placed at a table. `is_provided` only ever moves from false to true.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Order{
    pub id: i64,
    pub table_id: i64,
    pub shop_cocktail_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_provided: bool
}

// Display-ready order line: what was ordered, at which table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TableOrder{
    pub id: i64,
    pub table_id: i64,
    pub name: String,
    pub image_url: String,
    pub is_provided: bool
}
