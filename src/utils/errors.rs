use actix_web::error::BlockingError;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),
}

impl From<BlockingError> for ApiError {
    fn from(err: BlockingError) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Conflict(message) => {
                HttpResponse::Conflict().json(serde_json::json!({
                    "erro": message,
                    "code": 409
                }))
            },
            ApiError::BadRequest(message) => {
                HttpResponse::BadRequest().json(serde_json::json!({
                    "erro": message,
                    "code": 400
                }))
            },
            ApiError::NotFound(message) => {
                HttpResponse::NotFound().json(serde_json::json!({
                    "erro": message,
                    "code": 404
                }))
            },
            ApiError::InternalServerError(message) => {
                log::error!("internal error: {}", message);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "erro": message,
                    "code": 500
                }))
            },
            ApiError::SqliteError(err) => {
                log::error!("database error: {}", err);
                HttpResponse::ServiceUnavailable().json(serde_json::json!({
                    "erro": "banco de dados indisponível",
                    "code": 503
                }))
            }
        }
    }
}

// ----------------------------- TESTS --------------------------------
