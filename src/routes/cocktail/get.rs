use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    db_interaction::{CocktailRepository, StoreError},
    routes::query::{IdsQuery, ListQuery, QueryParamError},
    utils::{error_fmt_chain, status_text_response}
};

const DEFAULT_LIMIT: i64 = 30;

#[derive(Error)]
pub enum GetCocktailError{
    #[error("Invalid query parameters")]
    InvalidQuery(#[from] QueryParamError),
    #[error("Failed to get cocktails")]
    StoreError(#[from] StoreError)
}

impl Debug for GetCocktailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for GetCocktailError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetCocktailError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            GetCocktailError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Getting list of cocktails",
    skip(repo)
)]
pub async fn list_cocktails(
    repo: web::Data<dyn CocktailRepository>,
    query: web::Query<ListQuery>
) -> Result<HttpResponse, GetCocktailError> {
    let page = query.page(DEFAULT_LIMIT)?;

    let cocktails = repo.list(page, query.keyword()).await?;

    Ok(HttpResponse::Ok().json(cocktails))
}

#[tracing::instrument(
    "Getting cocktails by ids",
    skip(repo)
)]
pub async fn list_cocktails_by_ids(
    repo: web::Data<dyn CocktailRepository>,
    query: web::Query<IdsQuery>
) -> Result<HttpResponse, GetCocktailError> {
    let ids = query.ids()?;

    let cocktails = repo.list_by_ids(ids).await?;

    Ok(HttpResponse::Ok().json(cocktails))
}

/// Unknown ids answer 200 with the zero-value detail.
#[tracing::instrument(
    "Getting cocktail detail",
    skip(repo)
)]
pub async fn get_cocktail(
    repo: web::Data<dyn CocktailRepository>,
    path: web::Path<i64>
) -> Result<HttpResponse, GetCocktailError> {
    let cocktail_id = path.into_inner();

    let detail = repo.get_detail(cocktail_id)
        .await?
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(detail))
}
