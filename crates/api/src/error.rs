//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Authentication errors
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already taken")]
    EmailAlreadyExists,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Unauthorized")]
    Unauthorized,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,
    #[error("Resource already exists")]
    Conflict(String),

    // Internal errors
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::InvalidToken | ApiError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::EmailAlreadyExists | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            // Authentication
            ApiError::InvalidCredentials => ("INVALID_CREDENTIALS", self.to_string()),
            ApiError::EmailAlreadyExists => ("EMAIL_EXISTS", self.to_string()),
            ApiError::InvalidToken => ("INVALID_TOKEN", self.to_string()),
            ApiError::Unauthorized => ("UNAUTHORIZED", self.to_string()),

            // Validation
            ApiError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),

            // Resources
            ApiError::NotFound => ("NOT_FOUND", self.to_string()),
            ApiError::Conflict(msg) => ("CONFLICT", msg.clone()),

            // Internal
            ApiError::Database(_) => ("DATABASE_ERROR", "Database error".to_string()),
            ApiError::Internal => ("INTERNAL_ERROR", self.to_string()),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (self.status(), body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    // PostgreSQL unique violation
                    if code == "23505" {
                        return ApiError::Conflict("Resource already exists".to_string());
                    }
                }
                ApiError::Database(db_err.to_string())
            }
            _ => ApiError::Database(err.to_string()),
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
