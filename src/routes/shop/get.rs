use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    db_interaction::{ShopRepository, StoreError},
    routes::query::{ListQuery, QueryParamError},
    utils::{error_fmt_chain, status_text_response}
};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Error)]
pub enum GetShopError{
    #[error("Invalid query parameters")]
    InvalidQuery(#[from] QueryParamError),
    #[error("Failed to get shops")]
    StoreError(#[from] StoreError)
}

impl Debug for GetShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for GetShopError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetShopError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            GetShopError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Getting list of shops",
    skip(repo)
)]
pub async fn list_shops(
    repo: web::Data<dyn ShopRepository>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, GetShopError> {
    let page = query.page(DEFAULT_LIMIT)?;

    let shops = repo.list(page).await?;

    Ok(HttpResponse::Ok().json(shops))
}

#[tracing::instrument(
    "Getting shop by id",
    skip(repo)
)]
pub async fn get_shop(
    repo: web::Data<dyn ShopRepository>,
    path: web::Path<i64>
) -> Result<HttpResponse, GetShopError> {
    let shop_id = path.into_inner();

    let shop = repo.get(shop_id)
        .await?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(shop))
}
