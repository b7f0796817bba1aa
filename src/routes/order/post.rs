use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    db_interaction::{OrderRepository, PlaceOrderError},
    utils::{error_fmt_chain, status_text_response}
};

#[derive(Deserialize, Debug)]
pub struct OrderJson{
    pub cocktail_ids: Vec<i64>
}

#[derive(Error)]
pub enum PostOrderError{
    #[error("Failed to place order")]
    PlaceOrderError(#[from] PlaceOrderError)
}

impl Debug for PostOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostOrderError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

#[tracing::instrument(
    "Posting order",
    skip(repo)
)]
pub async fn place_order(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<(i64, i64)>,
    json: web::Json<OrderJson>
) -> Result<HttpResponse, PostOrderError> {
    let (shop_id, table_id) = path.into_inner();

    let orders = repo.place(shop_id, table_id, json.0.cocktail_ids).await?;

    Ok(HttpResponse::Created().json(orders))
}
