use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{ShopRepository, StoreError},
    domain::EntityName,
    utils::{error_fmt_chain, status_text_response}
};

#[derive(Deserialize, Debug)]
pub struct ShopJson{
    pub name: String
}

#[derive(Error)]
pub enum PostShopError{
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to create shop")]
    StoreError(#[from] StoreError)
}

impl Debug for PostShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostShopError {
    fn status_code(&self) -> StatusCode {
        match self {
            PostShopError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PostShopError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Posting shop",
    skip(repo)
)]
pub async fn create_shop(
    repo: web::Data<dyn ShopRepository>,
    json: web::Json<ShopJson>
) -> Result<HttpResponse, PostShopError> {
    let name = EntityName::parse(json.0.name)
        .map_err(PostShopError::ValidationError)?;

    let shop = repo.create(name).await?;

    Ok(HttpResponse::Ok().json(shop))
}
