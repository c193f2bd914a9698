//! WebServer-specific error types

use shared::{SharedError, UpstreamFailure};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("HTTP server startup failed: {0}")]
    ServerStartup(String),

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    #[error("Upstream call failed: {service} - {reason}")]
    UpstreamError {
        service: String,
        reason: UpstreamFailure,
    },

    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl WebServerError {
    /// Configuration error from a plain message
    pub fn config(message: impl Into<String>) -> Self {
        WebServerError::ConfigError {
            message: message.into(),
        }
    }

    /// Upstream failure tagged with the service that produced it
    pub fn upstream(service: &str, reason: UpstreamFailure) -> Self {
        WebServerError::UpstreamError {
            service: service.to_string(),
            reason,
        }
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
