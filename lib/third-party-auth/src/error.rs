//! Error types for the third-party-auth crate.
//!
//! Errors are designed for layered context using rootcause. None of them
//! reach the page: the fetcher logs them and falls back to the manual form.

use std::fmt;

/// Errors from fetching the auth context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The LMS base URL does not form a valid endpoint.
    InvalidEndpoint { url: String, reason: String },
    /// The request never produced a response.
    Transport { reason: String },
    /// The LMS answered with a non-success status.
    Status { status: u16 },
    /// The response body was not a context document.
    Decode { reason: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { url, reason } => {
                write!(f, "invalid context endpoint '{url}': {reason}")
            }
            Self::Transport { reason } => {
                write!(f, "context request failed: {reason}")
            }
            Self::Status { status } => {
                write!(f, "context request returned status {status}")
            }
            Self::Decode { reason } => {
                write!(f, "failed to decode context response: {reason}")
            }
        }
    }
}

impl std::error::Error for FetchError {}
