use actix_web::{web, HttpResponse};

use crate::db_interaction::TableRepository;

use super::TableError;

#[tracing::instrument(
    "Getting table of shop",
    skip(repo)
)]
pub async fn get_table(
    repo: web::Data<dyn TableRepository>,
    path: web::Path<(i64, i64)>
) -> Result<HttpResponse, TableError> {
    let (shop_id, table_id) = path.into_inner();

    let table = repo.get(shop_id, table_id)
        .await?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(table))
}
