use async_trait::async_trait;
use diesel::{
    result::{DatabaseErrorKind, Error as DieselError},
    ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper
};

use crate::{
    domain::ShopTable,
    models::{NewShopTableRow, ShopTableRow},
    schema::shop_tables,
    telemetry::spawn_blocking_with_tracing,
    utils::get_pooled_connection
};

use super::{PgShopRepository, StoreError, TableRepository};

#[async_trait]
impl TableRepository for PgShopRepository {
    #[tracing::instrument(
        "Inserting table into the database",
        skip(self)
    )]
    async fn create(&self, shop_id: i64) -> Result<ShopTable, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let row = spawn_blocking_with_tracing(move || {
            diesel::insert_into(shop_tables::table)
                .values(NewShopTableRow{ shop_id })
                .returning(ShopTableRow::as_returning())
                .get_result::<ShopTableRow>(&mut conn)
        })
        .await?
        .map_err(|e| {
            if let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) = &e {
                tracing::warn!(shop_id, "Shop does not exist, table not created");
            }
            e
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(
        "Getting table of shop from db",
        skip(self)
    )]
    async fn get(&self, shop_id: i64, table_id: i64) -> Result<Option<ShopTable>, StoreError> {
        let mut conn = get_pooled_connection(&self.pool).await?;

        let row = spawn_blocking_with_tracing(move || {
            shop_tables::table
                .filter(shop_tables::id.eq(table_id))
                .filter(shop_tables::shop_id.eq(shop_id))
                .select(ShopTableRow::as_select())
                .first::<ShopTableRow>(&mut conn)
                .optional()
        })
        .await??;

        Ok(row.map(ShopTable::from))
    }
}
