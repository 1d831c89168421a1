//! User-facing notification types.
//!
//! Every outcome is reported through one transient, dismissible channel;
//! nothing in the core panics or aborts the session. The worst case is a
//! remote snapshot lagging behind local state, reported here.

use crate::error::Error;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation completed.
    Success,
    /// The operation failed or partially failed.
    Error,
}

/// A transient, dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text shown to the user.
    pub message: String,
    /// Display severity.
    pub severity: Severity,
}

impl Notice {
    /// Creates a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Maps an error to its user-facing notice.
    ///
    /// Connectivity problems get a generic message; failures the service
    /// reported carry its message verbatim; everything local displays
    /// as-is.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        let message = match error {
            Error::Remote(remote) if remote.is_service_error() => {
                format!("The server reported a failure: {remote}")
            }
            Error::Remote(_) => {
                "Could not reach the server. Check that it is running.".to_string()
            }
            other => other.to_string(),
        };
        Self::error(message)
    }
}
