//! WebServer-specific error types

use axum::http::StatusCode;
use shared::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed: {0}")]
    ServerStartup(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("invalid request: {details}")]
    InvalidRequest { details: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::Config(message.into())
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        WebServerError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// HTTP status the error surfaces as.
    ///
    /// Validation failures are the caller's to fix (404/400/422); anything
    /// else is a server fault. Data corruption maps to 422 with the
    /// offending contest id in the body so it can be corrected upstream.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            WebServerError::Engine(EngineError::DataIntegrity { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            WebServerError::Engine(EngineError::InsufficientRoster { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
