use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {field}: {reason}")]
    ValidationError { field: &'static str, reason: String },

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError { field, reason } => {
                log::warn!("Validation error on {field}: {reason}");
                HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "field": field,
                        "message": reason
                    }
                }))
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                HttpResponse::Unauthorized().json(json!({
                    "success": false,
                    "error": {
                        "code": "AUTH_ERROR",
                        "message": msg
                    }
                }))
            }
            // Covers both "no such offer" and "not yours": the two are
            // indistinguishable on the wire so callers cannot probe for
            // which ids exist.
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "success": false,
                "error": {
                    "code": "NOT_FOUND",
                    "message": msg
                }
            })),
            AppError::DatabaseError(err) => {
                log::error!("Storage error: {err}");
                HttpResponse::ServiceUnavailable().json(json!({
                    "success": false,
                    "error": {
                        "code": "UNAVAILABLE",
                        "message": "Temporarily unavailable"
                    }
                }))
            }
            _ => {
                log::error!("Internal error: {self}");
                HttpResponse::InternalServerError().json(json!({
                    "success": false,
                    "error": {
                        "code": "INTERNAL_ERROR",
                        "message": "Internal server error"
                    }
                }))
            }
        }
    }
}
