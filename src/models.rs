use diesel::prelude::{Insertable, Queryable, Selectable};

use crate::domain::{Cocktail, Material, MaterialQuantity, Order, Shop, ShopCocktail, ShopTable, TableOrder};
use crate::schema::{cocktail_materials, cocktails, materials, shop_cocktails, shop_orders, shop_tables, shops};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = cocktails)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CocktailRow{
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64
}

#[derive(Insertable)]
#[diesel(table_name = cocktails)]
pub struct NewCocktailRow<'a>{
    pub name: &'a str,
    pub image_url: Option<&'a str>,
    pub created_at: i64,
    pub updated_at: i64
}

#[derive(Insertable)]
#[diesel(table_name = materials)]
pub struct NewMaterialRow<'a>{
    pub name: &'a str,
    pub created_at: i64,
    pub updated_at: i64
}

#[derive(Insertable)]
#[diesel(table_name = cocktail_materials)]
pub struct NewCocktailMaterialRow<'a>{
    pub cocktail_id: i64,
    pub material_id: i64,
    pub quantity: i64,
    pub unit: &'a str
}

// materials joined with cocktail_materials
#[derive(Queryable, Debug)]
pub struct MaterialQuantityRow{
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit: String
}

#[derive(Queryable, Debug)]
pub struct MaterialNameRow{
    pub id: i64,
    pub name: String
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = shops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShopRow{
    pub id: i64,
    pub name: String
}

#[derive(Insertable)]
#[diesel(table_name = shops)]
pub struct NewShopRow<'a>{
    pub name: &'a str
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = shop_tables)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShopTableRow{
    pub id: i64,
    pub shop_id: i64
}

#[derive(Insertable)]
#[diesel(table_name = shop_tables)]
pub struct NewShopTableRow{
    pub shop_id: i64
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = shop_cocktails)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShopCocktailRow{
    pub id: i64,
    pub shop_id: i64,
    pub cocktail_id: i64
}

#[derive(Insertable)]
#[diesel(table_name = shop_cocktails)]
pub struct NewShopCocktailRow{
    pub shop_id: i64,
    pub cocktail_id: i64
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = shop_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow{
    pub id: i64,
    pub table_id: i64,
    pub shop_cocktail_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_provided: bool
}

#[derive(Insertable)]
#[diesel(table_name = shop_orders)]
pub struct NewOrderRow{
    pub table_id: i64,
    pub shop_cocktail_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_provided: bool
}

// shop_orders joined through shop_cocktails to cocktails
#[derive(Queryable, Debug)]
pub struct TableOrderRow{
    pub id: i64,
    pub table_id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub is_provided: bool
}

impl From<CocktailRow> for Cocktail {
    fn from(row: CocktailRow) -> Self {
        Cocktail{
            id: row.id,
            name: row.name,
            image_url: row.image_url.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at
        }
    }
}

impl From<MaterialQuantityRow> for Material {
    fn from(row: MaterialQuantityRow) -> Self {
        Material{
            id: row.id,
            name: row.name,
            quantity: Some(MaterialQuantity{ quantity: row.quantity, unit: row.unit })
        }
    }
}

impl From<MaterialNameRow> for Material {
    fn from(row: MaterialNameRow) -> Self {
        Material{ id: row.id, name: row.name, quantity: None }
    }
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Shop{ id: row.id, name: row.name }
    }
}

impl From<ShopTableRow> for ShopTable {
    fn from(row: ShopTableRow) -> Self {
        ShopTable{ id: row.id, shop_id: row.shop_id }
    }
}

impl From<ShopCocktailRow> for ShopCocktail {
    fn from(row: ShopCocktailRow) -> Self {
        ShopCocktail{ id: row.id, shop_id: row.shop_id, cocktail_id: row.cocktail_id }
    }
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order{
            id: row.id,
            table_id: row.table_id,
            shop_cocktail_id: row.shop_cocktail_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_provided: row.is_provided
        }
    }
}

impl From<TableOrderRow> for TableOrder {
    fn from(row: TableOrderRow) -> Self {
        TableOrder{
            id: row.id,
            table_id: row.table_id,
            name: row.name,
            image_url: row.image_url.unwrap_or_default(),
            is_provided: row.is_provided
        }
    }
}
