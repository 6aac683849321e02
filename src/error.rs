use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{message}")]
    Validation { code: String, message: String },

    #[error("id must be a positive integer")]
    InvalidId,

    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure with an explicit error code, HTTP 400.
    pub fn validation<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self::Validation {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Lookup miss for the named resource, HTTP 404.
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// Uniqueness conflict, HTTP 409.
    pub fn conflict<M: Into<String>>(code: &'static str, message: M) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    /// Machine-readable error code carried in the response envelope.
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Validation { code, .. } => code,
            AppError::InvalidId => "INVALID_ID",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Conflict { code, .. } => code,
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// HTTP status code for the response.
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::Validation { .. } | AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Log by severity. 500-class causes stay server-side; the client
        // only ever sees the generic message.
        match self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {:#}", e);
            }
            AppError::Config(e) => {
                tracing::error!("configuration error: {}", e);
            }
            AppError::Conflict { .. } => {
                tracing::warn!("conflict: {}", self);
            }
            _ => {
                tracing::info!("client error: {}", self);
            }
        }

        let message = match self {
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(json!({
            "error": message,
            "code": self.error_code(),
        }))
    }

    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;
