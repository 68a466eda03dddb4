//! HTTP error responses.
//!
//! Pipeline outcomes (out of scope, unknown customer, prepayment not allowed)
//! are ordinary 200 replies with `success=false`. Only malformed requests and
//! missing resources end up here.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use loandesk_core::error::InputError;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),
}

impl ApiError {
    /// A request missing one or more required body fields.
    pub fn missing(fields: &[&str]) -> Self {
        match fields {
            [one] => Self::BadRequest(format!("Missing required field: {one}")),
            many => Self::BadRequest(format!("Missing required fields: {}", many.join(", "))),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
