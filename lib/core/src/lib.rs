//! Core types and utilities for the logistration frontend.
//!
//! This crate provides the page identifiers, route constants, and error
//! handling shared by the third-party-auth flow and the web UI.

pub mod error;
pub mod page;

pub use error::Result;
pub use page::{AUTH_PARAMS, DEFAULT_REDIRECT_URL, LOGIN_PAGE, Page, REGISTER_PAGE};
