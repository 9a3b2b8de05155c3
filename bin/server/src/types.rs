//! Shared types used across server functions and UI components.

/// Site name used in alerts when the LMS reports no platform name.
pub const DEFAULT_SITE_NAME: &str = "Open edX";

/// LMS sign-in endpoint the login form posts to.
pub const LOGIN_ENDPOINT: &str = "/api/user/v1/account/login_session/";

/// LMS registration endpoint the register form posts to.
pub const REGISTRATION_ENDPOINT: &str = "/api/user/v2/account/registration/";

/// Deployment settings the pages need in the browser.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SiteSettings {
    /// Base URL of the LMS, e.g. `https://lms.example.com`.
    pub lms_base_url: String,
    /// Shown as the platform name when the context has none.
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

impl SiteSettings {
    /// Returns the LMS base URL without a trailing slash.
    #[must_use]
    pub fn lms_base_url(&self) -> &str {
        self.lms_base_url
            .strip_suffix('/')
            .unwrap_or(&self.lms_base_url)
    }

    /// Returns the absolute LMS URL for `path`.
    #[must_use]
    pub fn lms_url(&self, path: &str) -> String {
        format!("{}{path}", self.lms_base_url())
    }
}
