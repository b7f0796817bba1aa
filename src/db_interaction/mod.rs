use std::{error::Error, fmt::Debug, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{Cocktail, CocktailDetail, NewCocktail, Order, Page, Shop, ShopCocktail, ShopTable, TableOrder, EntityName},
    utils::{error_fmt_chain, DbPool, PoolGetError}
};

mod cocktail;
mod orders;
mod shop;
mod table;

pub use cocktail::PgCocktailRepository;
pub use orders::PlaceOrderError;
pub use shop::{AddShopCocktailError, PgShopRepository};

// Error shared by every plain read / write against the database
#[derive(Error)]
pub enum StoreError{
    #[error("Failed to get connection from pool")]
    PoolError(#[from] PoolGetError),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[async_trait]
pub trait CocktailRepository: Send + Sync {
    /// Cocktails in insertion order, optionally filtered by a case-insensitive
    /// substring of the name.
    async fn list(&self, page: Page, keyword: &str) -> Result<Vec<Cocktail>, StoreError>;

    async fn get_detail(&self, cocktail_id: i64) -> Result<Option<CocktailDetail>, StoreError>;

    async fn list_by_ids(&self, cocktail_ids: Vec<i64>) -> Result<Vec<Cocktail>, StoreError>;

    /// Inserts the cocktail and its material associations atomically, reusing
    /// materials whose name already exists.
    async fn create(&self, cocktail: NewCocktail) -> Result<CocktailDetail, StoreError>;
}

#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn list(&self, page: Page) -> Result<Vec<Shop>, StoreError>;

    async fn get(&self, shop_id: i64) -> Result<Option<Shop>, StoreError>;

    async fn create(&self, name: EntityName) -> Result<Shop, StoreError>;

    async fn list_cocktails(&self, shop_id: i64, page: Page) -> Result<Vec<Cocktail>, StoreError>;

    /// All-or-nothing: fails on the first cocktail that does not exist.
    async fn add_cocktails(
        &self,
        shop_id: i64,
        cocktail_ids: Vec<i64>
    ) -> Result<Vec<ShopCocktail>, AddShopCocktailError>;

    /// Materials come without quantities here.
    async fn get_cocktail_detail(
        &self,
        shop_id: i64,
        cocktail_id: i64
    ) -> Result<Option<CocktailDetail>, StoreError>;
}

#[async_trait]
pub trait TableRepository: Send + Sync {
    async fn create(&self, shop_id: i64) -> Result<ShopTable, StoreError>;

    async fn get(&self, shop_id: i64, table_id: i64) -> Result<Option<ShopTable>, StoreError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All-or-nothing: every cocktail must be offered by the shop.
    async fn place(
        &self,
        shop_id: i64,
        table_id: i64,
        cocktail_ids: Vec<i64>
    ) -> Result<Vec<Order>, PlaceOrderError>;

    /// Returns false, without touching anything, when the order is not one of
    /// this shop table's orders.
    async fn mark_provided(&self, shop_id: i64, table_id: i64, order_id: i64) -> Result<bool, StoreError>;

    async fn list_for_table(
        &self,
        shop_id: i64,
        table_id: i64,
        unprovided_only: bool
    ) -> Result<Vec<TableOrder>, StoreError>;

    async fn list_unprovided_for_shop(&self, shop_id: i64, page: Page) -> Result<Vec<TableOrder>, StoreError>;
}

/// Handles injected into the request handlers.
#[derive(Clone)]
pub struct Repositories{
    pub cocktails: Arc<dyn CocktailRepository>,
    pub shops: Arc<dyn ShopRepository>,
    pub tables: Arc<dyn TableRepository>,
    pub orders: Arc<dyn OrderRepository>
}

impl Repositories {
    pub fn postgres(pool: DbPool) -> Self {
        let shop_repository = Arc::new(PgShopRepository::new(pool.clone()));

        Repositories{
            cocktails: Arc::new(PgCocktailRepository::new(pool)),
            shops: shop_repository.clone(),
            tables: shop_repository.clone(),
            orders: shop_repository
        }
    }

    // One object serving every interface, e.g. an in-memory store
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CocktailRepository + ShopRepository + TableRepository + OrderRepository + 'static
    {
        Repositories{
            cocktails: store.clone(),
            shops: store.clone(),
            tables: store.clone(),
            orders: store
        }
    }
}

// Escapes LIKE wildcards so the keyword is matched literally
pub(crate) fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');

    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }

    pattern.push('%');
    pattern
}
