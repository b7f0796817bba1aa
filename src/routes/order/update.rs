use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use thiserror::Error;

use crate::{
    db_interaction::{OrderRepository, StoreError},
    utils::{error_fmt_chain, status_text_response}
};

#[derive(Error)]
pub enum UpdateOrderError{
    #[error("Failed to mark order as provided")]
    StoreError(#[from] StoreError)
}

impl Debug for UpdateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for UpdateOrderError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

/// Marks the order as provided. An order that is not one of this table's is
/// left alone and still answered with 201.
#[tracing::instrument(
    "Updating order status",
    skip(repo)
)]
pub async fn provide_order(
    repo: web::Data<dyn OrderRepository>,
    path: web::Path<(i64, i64, i64)>
) -> Result<HttpResponse, UpdateOrderError> {
    let (shop_id, table_id, order_id) = path.into_inner();

    let provided = repo.mark_provided(shop_id, table_id, order_id).await?;
    tracing::info!(provided, "Order status update finished");

    Ok(HttpResponse::Created().finish())
}
