//! Error types for the core library.

use thiserror::Error;

use crate::roster::{GroupId, ValidationError};

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Remote service call failed, either in transport or reported by
    /// the service itself.
    #[error("remote error: {0}")]
    Remote(#[from] mailroster_remote::Error),

    /// Input rejected locally before any state change.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No group with the given id exists.
    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    /// An imported file yielded no addresses.
    #[error("the file contained no email addresses")]
    EmptyImport,

    /// Another long-running operation is still in flight.
    #[error("another operation is still in progress")]
    Busy,
}

impl Error {
    /// True when the failure was detected locally, before any remote
    /// call was made.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::GroupNotFound(_) | Self::Busy)
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
