use std::{error::Error, fmt::Debug};

use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, ExpressionMethods, JoinOnDsl, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use thiserror::Error;

use crate::{
    domain::{Order, Page, TableOrder},
    models::{NewOrderRow, OrderRow, TableOrderRow},
    schema::{cocktails, shop_cocktails, shop_orders, shop_tables},
    telemetry::spawn_blocking_with_tracing,
    utils::{error_fmt_chain, get_pooled_connection, DbConnection}
};

use super::{OrderRepository, PgShopRepository, StoreError};

// Error associated with placing orders at a table
#[derive(Error)]
pub enum PlaceOrderError{
    #[error("Failed to reach the database")]
    StoreError(#[from] StoreError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("table_id: {table_id} doesn't belong to shop_id: {shop_id}")]
    TableNotFound{ shop_id: i64, table_id: i64 },
    #[error("cocktail_id: {cocktail_id} isn't offered by shop_id: {shop_id}")]
    CocktailNotOffered{ shop_id: i64, cocktail_id: i64 }
}

impl Debug for PlaceOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl From<tokio::task::JoinError> for PlaceOrderError {
    fn from(e: tokio::task::JoinError) -> Self {
        PlaceOrderError::StoreError(e.into())
    }
}

#[async_trait]
impl OrderRepository for PgShopRepository {
    #[tracing::instrument(
        "Creating orders for table",
        skip(self)
    )]
    async fn place(
        &self,
        shop_id: i64,
        table_id: i64,
        cocktail_ids: Vec<i64>
    ) -> Result<Vec<Order>, PlaceOrderError> {
        let mut conn = get_pooled_connection(&self.pool).await.map_err(StoreError::from)?;

        let rows = spawn_blocking_with_tracing(move || {
            conn.transaction::<Vec<OrderRow>, PlaceOrderError, _>(|conn| {
                insert_orders(conn, shop_id, table_id, &cocktail_ids)
            })
        })
        .await??;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    #[tracing::instrument(
        "Marking order as provided",
        skip(self)
    )]
    async fn mark_provided(&self, shop_id: i64, table_id: i64, order_id: i64) -> Result<bool, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let provided = spawn_blocking_with_tracing(move || {
            conn.transaction::<bool, StoreError, _>(|conn| {
                let found = shop_orders::table
                    .inner_join(shop_tables::table)
                    .filter(shop_tables::shop_id.eq(shop_id))
                    .filter(shop_tables::id.eq(table_id))
                    .filter(shop_orders::id.eq(order_id))
                    .select(shop_orders::id)
                    .first::<i64>(conn)
                    .optional()?;

                if found.is_none() {
                    tracing::warn!(shop_id, table_id, order_id, "Order not found for table, nothing to provide");
                    return Ok(false);
                }

                diesel::update(shop_orders::table.find(order_id))
                    .set((
                        shop_orders::is_provided.eq(true),
                        shop_orders::updated_at.eq(Utc::now().timestamp())
                    ))
                    .execute(conn)?;

                Ok(true)
            })
        })
        .await??;

        Ok(provided)
    }

    #[tracing::instrument(
        "Getting orders of table",
        skip(self)
    )]
    async fn list_for_table(
        &self,
        shop_id: i64,
        table_id: i64,
        unprovided_only: bool
    ) -> Result<Vec<TableOrder>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let rows = spawn_blocking_with_tracing(move || {
            let mut query = shop_orders::table
                .inner_join(shop_tables::table)
                .inner_join(shop_cocktails::table.on(shop_cocktails::id.eq(shop_orders::shop_cocktail_id)))
                .inner_join(cocktails::table.on(cocktails::id.eq(shop_cocktails::cocktail_id)))
                .filter(shop_tables::shop_id.eq(shop_id))
                .filter(shop_tables::id.eq(table_id))
                .select((
                    shop_orders::id,
                    shop_orders::table_id,
                    cocktails::name,
                    cocktails::image_url,
                    shop_orders::is_provided
                ))
                .order(shop_orders::id.asc())
                .into_boxed();

            if unprovided_only {
                query = query.filter(shop_orders::is_provided.eq(false));
            }

            query.load::<TableOrderRow>(&mut conn)
        })
        .await??;

        Ok(rows.into_iter().map(TableOrder::from).collect())
    }

    #[tracing::instrument(
        "Getting unprovided orders of shop",
        skip(self)
    )]
    async fn list_unprovided_for_shop(&self, shop_id: i64, page: Page) -> Result<Vec<TableOrder>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let rows = spawn_blocking_with_tracing(move || {
            shop_orders::table
                .inner_join(shop_tables::table)
                .inner_join(shop_cocktails::table.on(shop_cocktails::id.eq(shop_orders::shop_cocktail_id)))
                .inner_join(cocktails::table.on(cocktails::id.eq(shop_cocktails::cocktail_id)))
                .filter(shop_tables::shop_id.eq(shop_id))
                .filter(shop_orders::is_provided.eq(false))
                .select((
                    shop_orders::id,
                    shop_orders::table_id,
                    cocktails::name,
                    cocktails::image_url,
                    shop_orders::is_provided
                ))
                .order(shop_orders::id.asc())
                .limit(page.limit)
                .offset(page.offset)
                .load::<TableOrderRow>(&mut conn)
        })
        .await??;

        Ok(rows.into_iter().map(TableOrder::from).collect())
    }
}

fn insert_orders(
    conn: &mut DbConnection,
    shop_id: i64,
    table_id: i64,
    cocktail_ids: &[i64]
) -> Result<Vec<OrderRow>, PlaceOrderError> {
    let table = shop_tables::table
        .filter(shop_tables::id.eq(table_id))
        .filter(shop_tables::shop_id.eq(shop_id))
        .select(shop_tables::id)
        .first::<i64>(conn)
        .optional()?;

    if table.is_none() {
        tracing::warn!(shop_id, table_id, "Table does not belong to shop, rolling back");
        return Err(PlaceOrderError::TableNotFound{ shop_id, table_id });
    }

    let now = Utc::now().timestamp();
    let mut orders = Vec::with_capacity(cocktail_ids.len());

    for cocktail_id in cocktail_ids.iter().copied() {
        let Some(shop_cocktail_id) = find_shop_cocktail(conn, shop_id, cocktail_id)? else {
            tracing::warn!(shop_id, table_id, cocktail_id, "Cocktail not offered by shop, rolling back");
            return Err(PlaceOrderError::CocktailNotOffered{ shop_id, cocktail_id });
        };

        let order = diesel::insert_into(shop_orders::table)
            .values(NewOrderRow{
                table_id,
                shop_cocktail_id,
                created_at: now,
                updated_at: now,
                is_provided: false
            })
            .returning(OrderRow::as_returning())
            .get_result::<OrderRow>(conn)?;

        orders.push(order);
    }

    Ok(orders)
}

fn find_shop_cocktail(conn: &mut DbConnection, shop_id: i64, cocktail_id: i64) -> QueryResult<Option<i64>> {
    shop_cocktails::table
        .filter(shop_cocktails::shop_id.eq(shop_id))
        .filter(shop_cocktails::cocktail_id.eq(cocktail_id))
        .select(shop_cocktails::id)
        .first::<i64>(conn)
        .optional()
}
