//! Adapter error handling
//!
//! Provides typed errors for backend operations. The distinction the
//! rest of the crate relies on: a 404 during probing is not an error
//! (it advances the probe sequence), every other failure is.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the document backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The id does not resolve under any known dialect
    #[error("Document not found")]
    NotFound,

    /// The backend answered with a status that is neither success nor 404
    #[error("Backend returned HTTP {status}: {body}")]
    Transport { status: StatusCode, body: String },

    /// Connection-level failure before any HTTP status was produced
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The active dialect has no backend equivalent for this operation
    #[error("The backend does not support {operation}")]
    Unsupported { operation: &'static str },

    /// Success status, but the body is not usable as the expected shape
    #[error("Malformed backend response: {details}")]
    Malformed { details: String },
}

impl ApiError {
    /// Create a malformed-response error
    pub fn malformed(details: impl Into<String>) -> Self {
        ApiError::Malformed {
            details: details.into(),
        }
    }

    /// The HTTP status carried by this error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport { status, .. } => Some(*status),
            ApiError::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            ApiError::Network(_) => {
                Some("Check the configured backend URL and that the server is running.")
            }
            ApiError::Unsupported { .. } => {
                Some("The configured backend has no endpoint for this operation.")
            }
            _ => None,
        }
    }
}

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = ApiError::Transport {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_unsupported_display() {
        let err = ApiError::Unsupported {
            operation: "delete",
        };

        assert!(err.to_string().contains("delete"));
        assert!(err.recovery_suggestion().is_some());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_not_found_has_no_suggestion() {
        assert!(ApiError::NotFound.recovery_suggestion().is_none());
    }
}
