//! Error taxonomy shared by every layer of the service.
//!
//! Core functions return `Result<T, ApiError>` and handlers propagate with
//! `?`; the `ResponseError` impl turns each variant into its HTTP status and
//! a `{"detail": ...}` body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::warn;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// An identifier did not resolve to a record.
    #[error("{0}")]
    NotFound(String),

    /// The payload is malformed or misses a required field.
    #[error("{0}")]
    Validation(String),

    /// A key assumed unique matched more than one record.
    #[error("{0}")]
    Conflict(String),

    /// The operation exists but is switched off in this deployment.
    #[error("{0}")]
    Forbidden(String),

    /// The request was understood but the functionality is withheld.
    #[error("{0}")]
    NotImplemented(String),

    /// Fixture data could not be read or parsed at startup.
    #[error("fixture error: {0}")]
    Fixture(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ApiError::Fixture(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = self.to_string();
        warn!("Request rejected ({}): {}", self.status_code(), detail);
        HttpResponse::build(self.status_code()).json(ErrorBody { detail: &detail })
    }
}
