use actix_web::{web, HttpResponse};

use crate::db_interaction::TableRepository;

use super::TableError;

#[tracing::instrument(
    "Creating table for shop",
    skip(repo)
)]
pub async fn create_table(
    repo: web::Data<dyn TableRepository>,
    path: web::Path<i64>
) -> Result<HttpResponse, TableError> {
    let shop_id = path.into_inner();

    let table = repo.create(shop_id).await?;

    Ok(HttpResponse::Created().json(table))
}
