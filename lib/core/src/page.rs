//! Page identifiers and the routes they live on.
//!
//! A [`Page`] names which logistration screen mounted the third-party-auth
//! flow. It keys fetches and selects page-specific copy and URLs; it is never
//! sent to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Route of the login page.
pub const LOGIN_PAGE: &str = "/login";

/// Route of the registration page.
pub const REGISTER_PAGE: &str = "/register";

/// Where the LMS sends a user after registration when no `next` was supplied.
pub const DEFAULT_REDIRECT_URL: &str = "/dashboard";

/// Query parameters the LMS understands for things like auto-enrollment
/// upon login and registration. They are forwarded verbatim when present.
pub const AUTH_PARAMS: &[&str] = &[
    "course_id",
    "enrollment_action",
    "course_mode",
    "email_opt_in",
    "purchase_workflow",
    "next",
    "register_for_free",
    "track",
    "is_account_recovery",
    "variant",
    "host",
    "cta",
];

/// A logistration screen that hosts the third-party-auth flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// The sign-in screen.
    Login,
    /// The account-creation screen.
    Register,
}

impl Page {
    /// Returns the stable identifier for this page.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Returns the route this page is served on.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Login => LOGIN_PAGE,
            Self::Register => REGISTER_PAGE,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
