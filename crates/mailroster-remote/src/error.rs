//! Error types for remote service operations.

/// Result type alias for remote service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the remote service client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure: the service is unreachable, the request could
    /// not be completed, or the response body was not valid JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request payload could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered but reported the operation unsuccessful.
    #[error("service error: {message}")]
    Service {
        /// Message supplied by the service, passed through verbatim.
        message: String,
    },
}

impl Error {
    /// Creates a service-reported error from an optional message.
    #[must_use]
    pub fn service(message: Option<String>) -> Self {
        Self::Service {
            message: message.unwrap_or_else(|| "unknown error".to_string()),
        }
    }

    /// True when the service itself rejected the operation, as opposed
    /// to a transport failure.
    #[must_use]
    pub const fn is_service_error(&self) -> bool {
        matches!(self, Self::Service { .. })
    }
}
