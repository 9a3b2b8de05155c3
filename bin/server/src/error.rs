//! Domain error types for server operations.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Site settings errors.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings were not installed on the request.
    Unavailable { details: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "site settings unavailable: {}", details)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl SettingsError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SettingsError::Unavailable { .. } => ServerFnError::new("Site settings unavailable"),
        }
    }
}
