use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{AddShopCocktailError, ShopRepository},
    utils::{error_fmt_chain, status_text_response}
};

#[derive(Deserialize, Debug)]
pub struct ShopCocktailsJson{
    pub cocktail_ids: Vec<i64>
}

#[derive(Error)]
pub enum PostShopCocktailError{
    #[error("Failed to add cocktails to shop")]
    AddShopCocktailError(#[from] AddShopCocktailError)
}

impl Debug for PostShopCocktailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// An unknown cocktail aborts the whole batch and is reported as a server error
impl ResponseError for PostShopCocktailError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Adding cocktails to shop",
    skip(repo)
)]
pub async fn add_shop_cocktails(
    repo: web::Data<dyn ShopRepository>,
    path: web::Path<i64>,
    json: web::Json<ShopCocktailsJson>
) -> Result<HttpResponse, PostShopCocktailError> {
    let shop_id = path.into_inner();

    let associations = repo.add_cocktails(shop_id, json.0.cocktail_ids).await?;

    Ok(HttpResponse::Created().json(associations))
}
