use std::{error::Error, fmt::Debug, num::ParseIntError};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Deserialize;
use thiserror::Error;

use crate::{domain::Page, utils::{error_fmt_chain, status_text_response}};

/// Query string shared by the listing endpoints.
///
/// Values are kept raw so that an empty `?limit=` falls back to the default
/// instead of failing deserialization.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery{
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub keyword: Option<String>,
    pub unprovided: Option<String>
}

#[derive(Deserialize, Debug, Default)]
pub struct IdsQuery{
    pub ids: Option<String>
}

#[derive(Error)]
pub enum QueryParamError{
    #[error("{name}={value} is not an integer")]
    InvalidInteger{
        name: &'static str,
        value: String,
        #[source]
        source: ParseIntError
    },
    #[error("{0}")]
    InvalidPage(String),
    #[error("{0} is not a boolean flag")]
    InvalidFlag(String)
}

impl Debug for QueryParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for QueryParamError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        status_text_response(self.status_code())
    }
}

impl ListQuery {
    pub fn page(&self, default_limit: i64) -> Result<Page, QueryParamError> {
        let limit = parse_integer("limit", self.limit.as_deref())?.unwrap_or(default_limit);
        let offset = parse_integer("offset", self.offset.as_deref())?.unwrap_or(0);

        Page::new(limit, offset).map_err(QueryParamError::InvalidPage)
    }

    pub fn keyword(&self) -> &str {
        self.keyword.as_deref().unwrap_or("")
    }

    pub fn unprovided(&self) -> Result<bool, QueryParamError> {
        match self.unprovided.as_deref() {
            None | Some("") => Ok(false),
            Some(value) => parse_flag(value)
        }
    }
}

impl IdsQuery {
    // "1,2,3"; blank entries are skipped
    pub fn ids(&self) -> Result<Vec<i64>, QueryParamError> {
        let Some(raw) = self.ids.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.parse::<i64>().map_err(|source| QueryParamError::InvalidInteger{
                    name: "ids",
                    value: id.to_string(),
                    source
                })
            })
            .collect()
    }
}

fn parse_integer(name: &'static str, value: Option<&str>) -> Result<Option<i64>, QueryParamError> {
    match value {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|source| QueryParamError::InvalidInteger{
                name,
                value: value.to_string(),
                source
            })
    }
}

pub fn parse_flag(value: &str) -> Result<bool, QueryParamError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(QueryParamError::InvalidFlag(other.to_string()))
    }
}
