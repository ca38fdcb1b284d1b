use actix_web::{body, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Domain failure taxonomy. Every variant is a deterministic
/// function-of-input failure except `Database`, which carries transport
/// faults from the persistence layer and is the only retryable category.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidState(String),

    #[error("no working days in the period, cannot derive a per-day rate")]
    DivisionByZero,

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("pdf rendering failed: {0}")]
    Pdf(String),
}

impl actix_web::error::ResponseError for Error {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        // The consuming UI reads `error` from the JSON body for its inline
        // message, so every failure keeps this shape.
        HttpResponse::build(self.status_code())
            .json(json!({
                "success": false,
                "error": self.to_string(),
            }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidState(_) | Error::DivisionByZero => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Database(_) | Error::Pdf(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
