//! Shared error types for the villa booking backend

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

/// Failure taxonomy for calls to external managed services (hosted store,
/// payment processor, mail provider). Clients map HTTP status codes into
/// these variants at the request boundary.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpstreamFailure {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Service unavailable")]
    ServiceUnavailable,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl UpstreamFailure {
    /// Map a non-success HTTP status into the failure taxonomy.
    pub fn from_status(status: u16, detail: &str) -> Self {
        match status {
            401 | 403 => UpstreamFailure::AuthenticationFailed,
            429 => UpstreamFailure::RateLimitExceeded,
            503 => UpstreamFailure::ServiceUnavailable,
            _ => UpstreamFailure::ServerError(format!("HTTP {status}: {detail}")),
        }
    }

    /// Transient failures are worth retrying; auth and request shape
    /// problems are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            UpstreamFailure::NetworkError(_)
                | UpstreamFailure::RateLimitExceeded
                | UpstreamFailure::ServiceUnavailable
                | UpstreamFailure::ServerError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            UpstreamFailure::from_status(401, ""),
            UpstreamFailure::AuthenticationFailed
        );
        assert_eq!(
            UpstreamFailure::from_status(403, ""),
            UpstreamFailure::AuthenticationFailed
        );
        assert_eq!(
            UpstreamFailure::from_status(429, ""),
            UpstreamFailure::RateLimitExceeded
        );
        assert_eq!(
            UpstreamFailure::from_status(503, ""),
            UpstreamFailure::ServiceUnavailable
        );
        assert!(matches!(
            UpstreamFailure::from_status(500, "boom"),
            UpstreamFailure::ServerError(_)
        ));
    }

    #[test]
    fn test_transient_classification() {
        assert!(UpstreamFailure::RateLimitExceeded.is_transient());
        assert!(UpstreamFailure::ServiceUnavailable.is_transient());
        assert!(UpstreamFailure::NetworkError("reset".to_string()).is_transient());
        assert!(!UpstreamFailure::AuthenticationFailed.is_transient());
        assert!(!UpstreamFailure::InvalidResponse("bad json".to_string()).is_transient());
    }
}
