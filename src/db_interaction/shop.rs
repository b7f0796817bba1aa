use std::{error::Error, fmt::Debug};

use async_trait::async_trait;
use diesel::{
    result::{DatabaseErrorKind, Error as DieselError},
    Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use thiserror::Error;

use crate::{
    domain::{Cocktail, CocktailDetail, EntityName, Material, Page, Shop, ShopCocktail},
    models::{CocktailRow, MaterialNameRow, NewShopCocktailRow, NewShopRow, ShopCocktailRow, ShopRow},
    schema::{cocktail_materials, cocktails, materials, shop_cocktails, shops},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, get_pooled_connection, DbConnection, DbPool}
};

use super::{ShopRepository, StoreError};

/// Postgres-backed shop repository; also serves tables and orders.
pub struct PgShopRepository{
    pub(super) pool: DbPool
}

impl PgShopRepository {
    pub fn new(pool: DbPool) -> Self {
        PgShopRepository{ pool }
    }
}

// Error associated with adding cocktails to a shop's menu
#[derive(Error)]
pub enum AddShopCocktailError{
    #[error("Failed to reach the database")]
    StoreError(#[from] StoreError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("cocktail_id: {0} doesn't exist")]
    CocktailNotFound(i64)
}

impl Debug for AddShopCocktailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl From<tokio::task::JoinError> for AddShopCocktailError {
    fn from(e: tokio::task::JoinError) -> Self {
        AddShopCocktailError::StoreError(e.into())
    }
}

#[async_trait]
impl ShopRepository for PgShopRepository {
    #[tracing::instrument(
        "Getting shops from db",
        skip(self)
    )]
    async fn list(&self, page: Page) -> Result<Vec<Shop>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let rows = spawn_blocking_with_tracing(move || {
            shops::table
                .order(shops::id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .select(ShopRow::as_select())
                .load::<ShopRow>(&mut conn)
        })
        .await??;

        Ok(rows.into_iter().map(Shop::from).collect())
    }

    #[tracing::instrument(
        "Getting shop by id from db",
        skip(self)
    )]
    async fn get(&self, shop_id: i64) -> Result<Option<Shop>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let row = spawn_blocking_with_tracing(move || {
            shops::table
                .find(shop_id)
                .select(ShopRow::as_select())
                .first::<ShopRow>(&mut conn)
                .optional()
        })
        .await??;

        Ok(row.map(Shop::from))
    }

    #[tracing::instrument(
        "Inserting shop into the database",
        skip(self)
    )]
    async fn create(&self, name: EntityName) -> Result<Shop, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let row = spawn_blocking_with_tracing(move || {
            diesel::insert_into(shops::table)
                .values(NewShopRow{ name: name.as_ref() })
                .returning(ShopRow::as_returning())
                .get_result::<ShopRow>(&mut conn)
        })
        .await??;

        Ok(row.into())
    }

    #[tracing::instrument(
        "Getting cocktails offered by shop",
        skip(self)
    )]
    async fn list_cocktails(&self, shop_id: i64, page: Page) -> Result<Vec<Cocktail>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let rows = spawn_blocking_with_tracing(move || {
            shop_cocktails::table
                .inner_join(cocktails::table)
                .filter(shop_cocktails::shop_id.eq(shop_id))
                .order(shop_cocktails::id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .select(CocktailRow::as_select())
                .load::<CocktailRow>(&mut conn)
        })
        .await??;

        Ok(rows.into_iter().map(Cocktail::from).collect())
    }

    #[tracing::instrument(
        "Adding cocktails to shop",
        skip(self)
    )]
    async fn add_cocktails(
        &self,
        shop_id: i64,
        cocktail_ids: Vec<i64>
    ) -> Result<Vec<ShopCocktail>, AddShopCocktailError> {
        let mut conn = get_pooled_connection(&self.pool).await.map_err(StoreError::from)?;

        let rows = spawn_blocking_with_tracing(move || {
            conn.transaction::<Vec<ShopCocktailRow>, AddShopCocktailError, _>(|conn| {
                let mut associations = Vec::with_capacity(cocktail_ids.len());

                for cocktail_id in cocktail_ids {
                    associations.push(associate_cocktail(conn, shop_id, cocktail_id)?);
                }

                Ok(associations)
            })
        })
        .await??;

        Ok(rows.into_iter().map(ShopCocktail::from).collect())
    }

    #[tracing::instrument(
        "Getting cocktail detail offered by shop",
        skip(self)
    )]
    async fn get_cocktail_detail(
        &self,
        shop_id: i64,
        cocktail_id: i64
    ) -> Result<Option<CocktailDetail>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let detail = spawn_blocking_with_tracing(move || {
            get_shop_cocktail_detail(&mut conn, shop_id, cocktail_id)
        })
        .await??;

        Ok(detail)
    }
}

fn associate_cocktail(
    conn: &mut DbConnection,
    shop_id: i64,
    cocktail_id: i64
) -> Result<ShopCocktailRow, AddShopCocktailError> {
    let exists = cocktails::table
        .find(cocktail_id)
        .select(cocktails::id)
        .first::<i64>(conn)
        .optional()?
        .is_some();

    if !exists {
        tracing::warn!(shop_id, cocktail_id, "Cocktail does not exist, rolling back");
        return Err(AddShopCocktailError::CocktailNotFound(cocktail_id));
    }

    let existing = shop_cocktails::table
        .filter(shop_cocktails::shop_id.eq(shop_id))
        .filter(shop_cocktails::cocktail_id.eq(cocktail_id))
        .select(ShopCocktailRow::as_select())
        .first::<ShopCocktailRow>(conn)
        .optional()?;

    if let Some(association) = existing {
        return Ok(association);
    }

    let row = diesel::insert_into(shop_cocktails::table)
        .values(NewShopCocktailRow{ shop_id, cocktail_id })
        .returning(ShopCocktailRow::as_returning())
        .get_result::<ShopCocktailRow>(conn)
        .map_err(|e| {
            if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) = &e {
                tracing::warn!(shop_id, cocktail_id, "Shop does not exist, rolling back");
            }
            e
        })?;

    Ok(row)
}

fn get_shop_cocktail_detail(
    conn: &mut DbConnection,
    shop_id: i64,
    cocktail_id: i64
) -> QueryResult<Option<CocktailDetail>> {
    let cocktail = shop_cocktails::table
        .inner_join(cocktails::table)
        .filter(shop_cocktails::shop_id.eq(shop_id))
        .filter(shop_cocktails::cocktail_id.eq(cocktail_id))
        .select(CocktailRow::as_select())
        .first::<CocktailRow>(conn)
        .optional()?;

    let Some(cocktail) = cocktail else {
        return Ok(None);
    };

    let materials = cocktail_materials::table
        .inner_join(materials::table)
        .filter(cocktail_materials::cocktail_id.eq(cocktail_id))
        .order(cocktail_materials::id.asc())
        .select((materials::id, materials::name))
        .load::<MaterialNameRow>(conn)?
        .into_iter()
        .map(Material::from)
        .collect();

    Ok(Some(CocktailDetail::from_cocktail(cocktail.into(), materials)))
}
