use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    db_interaction::{OrderRepository, StoreError},
    routes::query::{ListQuery, QueryParamError},
    utils::{error_fmt_chain, status_text_response}
};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Error)]
pub enum GetOrderError{
    #[error("Invalid query parameters")]
    InvalidQuery(#[from] QueryParamError),
    #[error("Failed to get orders")]
    StoreError(#[from] StoreError)
}

impl Debug for GetOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for GetOrderError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetOrderError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            GetOrderError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Getting list of orders of table",
    skip(repo)
)]
pub async fn list_table_orders(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<(i64, i64)>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, GetOrderError> {
    let (shop_id, table_id) = path.into_inner();
    let unprovided_only = query.unprovided()?;

    let orders = repo.list_for_table(shop_id, table_id, unprovided_only).await?;

    Ok(HttpResponse::Ok().json(orders))
}

/// Only the unprovided orders of a shop can be listed, anything else gets an
/// empty 200.
#[tracing::instrument(
    "Getting list of unprovided orders of shop",
    skip(repo)
)]
pub async fn list_shop_orders(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<i64>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, GetOrderError> {
    let shop_id = path.into_inner();
    let page = query.page(DEFAULT_LIMIT)?;

    if !query.unprovided()? {
        return Ok(HttpResponse::Ok().finish());
    }

    let orders = repo.list_unprovided_for_shop(shop_id, page).await?;

    Ok(HttpResponse::Ok().json(orders))
}
