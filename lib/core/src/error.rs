//! Error handling foundation for the logistration frontend.
//!
//! This module provides only the `Result` type alias using rootcause.
//! Each crate defines its own domain-specific error types in its own
//! error module; reports carry them up to the layer that decides how a
//! failure is shown (for this frontend, almost always a fallback to the
//! manual form).

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
