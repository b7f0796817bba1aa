mod get;
mod post;

pub use get::get_table;
pub use post::create_table;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::{db_interaction::StoreError, utils::status_text_response};

/// Failure of either table endpoint.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct TableError(#[from] StoreError);

impl ResponseError for TableError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}
