//! Error types for catalog API requests.

use thiserror::Error;

/// Errors that can occur while talking to the catalog API.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Status reason reported by the service.
        message: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The configured base URL cannot be used to build request URLs.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the service answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status { status: 404, .. } => "The requested shelf or book does not exist.",
            Self::Status { .. } => "The catalog service returned an error.",
            Self::Network(_) => {
                "Could not reach the catalog service. Please check your internet connection."
            }
            Self::Decode(_) => "The catalog service sent an unexpected response.",
            Self::InvalidUrl(_) => "The configured API base URL is invalid.",
        }
    }

    /// Returns whether a manual retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for catalog API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.user_message().contains("internet connection"));

        let err = ApiError::Status {
            status: 404,
            message: "API Error: Not Found".to_string(),
        };
        assert!(err.user_message().contains("does not exist"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::Network("timeout".to_string()).is_retryable());
        assert!(
            ApiError::Status {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_retryable()
        );
        assert!(
            !ApiError::Status {
                status: 404,
                message: "missing".to_string()
            }
            .is_retryable()
        );
        assert!(!ApiError::Decode("eof".to_string()).is_retryable());
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 500,
            message: "API Error: Internal Server Error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (500): API Error: Internal Server Error"
        );
        assert_eq!(ApiError::Network("x".to_string()).status(), None);
    }
}
