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
pub enum GetShopCocktailError{
    #[error("Invalid query parameters")]
    InvalidQuery(#[from] QueryParamError),
    #[error("Failed to get cocktails of shop")]
    StoreError(#[from] StoreError)
}

impl Debug for GetShopCocktailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for GetShopCocktailError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetShopCocktailError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            GetShopCocktailError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Getting cocktails offered by shop",
    skip(repo)
)]
pub async fn list_shop_cocktails(
    repo: web::Data<dyn ShopRepository>,
    path: web::Path<i64>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, GetShopCocktailError> {
    let shop_id = path.into_inner();
    let page = query.page(DEFAULT_LIMIT)?;

    let cocktails = repo.list_cocktails(shop_id, page).await?;

    Ok(HttpResponse::Ok().json(cocktails))
}

// Materials are listed without quantities
#[tracing::instrument(
    "Getting cocktail detail of shop",
    skip(repo)
)]
pub async fn get_shop_cocktail(
    repo: web::Data<dyn ShopRepository>,
    path: web::Path<(i64, i64)>
) -> Result<HttpResponse, GetShopCocktailError> {
    let (shop_id, cocktail_id) = path.into_inner();

    let detail = repo.get_cocktail_detail(shop_id, cocktail_id)
        .await?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(detail))
}
