use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{CocktailRepository, StoreError},
    domain::{EntityName, MaterialQuantity, NewCocktail, NewMaterial},
    utils::{error_fmt_chain, status_text_response}
};

#[derive(Deserialize, Debug)]
pub struct CocktailJson{
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub materials: Vec<MaterialJson>
}

#[derive(Deserialize, Debug)]
pub struct MaterialJson{
    pub name: String,
    pub quantity: QuantityJson
}

#[derive(Deserialize, Debug)]
pub struct QuantityJson{
    pub quantity: i64,
    pub unit: String
}

impl TryFrom<CocktailJson> for NewCocktail {
    type Error = String;

    fn try_from(value: CocktailJson) -> Result<Self, Self::Error> {
        let name = EntityName::parse(value.name)?;

        let materials = value.materials
            .into_iter()
            .map(|material| {
                Ok(NewMaterial{
                    name: EntityName::parse(material.name)?,
                    quantity: MaterialQuantity::parse(material.quantity.quantity, material.quantity.unit)?
                })
            })
            .collect::<Result<Vec<NewMaterial>, String>>()?;

        let image_url = value.image_url.filter(|url| !url.trim().is_empty());

        Ok(NewCocktail{ name, image_url, materials })
    }
}

#[derive(Error)]
pub enum PostCocktailError{
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to create cocktail")]
    StoreError(#[from] StoreError)
}

impl Debug for PostCocktailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostCocktailError {
    fn status_code(&self) -> StatusCode {
        match self {
            PostCocktailError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PostCocktailError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Posting cocktail",
    skip(repo, json),
    fields(cocktail_name = %json.name)
)]
pub async fn create_cocktail(
    repo: web::Data<dyn CocktailRepository>,
    json: web::Json<CocktailJson>
) -> Result<HttpResponse, PostCocktailError> {
    let cocktail: NewCocktail = json.0
        .try_into()
        .map_err(PostCocktailError::ValidationError)?;

    let detail = repo.create(cocktail).await?;

    Ok(HttpResponse::Ok().json(detail))
}
