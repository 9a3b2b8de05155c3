//! External identity provider offerings.
//!
//! Providers are constructed by the LMS and delivered verbatim inside the
//! auth context; the frontend never mutates them.

use logistration_core::Page;
use serde::{Deserialize, Serialize};

/// Icon classes with a dedicated brand glyph. Anything else falls back to a
/// generic sign-in glyph.
pub const SUPPORTED_ICON_CLASSES: &[&str] = &["apple", "facebook", "google", "microsoft"];

/// One external identity provider offering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthProvider {
    /// Stable slug, e.g. `oa2-apple-id`. Hints are matched against this.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Path (relative to the LMS base) that starts the provider's login.
    pub login_url: String,
    /// Path (relative to the LMS base) that starts registration through the provider.
    pub register_url: Option<String>,
    /// Font icon class, e.g. `google`.
    pub icon_class: Option<String>,
    /// Image icon URL; preferred over `icon_class` when present.
    pub icon_image: Option<String>,
    /// When hinted, bypass any UI and redirect immediately.
    pub skip_hinted_login: bool,
    /// The LMS may create the account without showing the registration form.
    pub skip_registration_form: bool,
}

impl AuthProvider {
    /// Creates a provider with the given slug, display name, and login path.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, login_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            login_url: login_url.into(),
            ..Self::default()
        }
    }

    /// Sets the skip-hinted-login flag.
    #[must_use]
    pub fn with_skip_hinted_login(mut self, skip: bool) -> Self {
        self.skip_hinted_login = skip;
        self
    }

    /// Sets the registration path.
    #[must_use]
    pub fn with_register_url(mut self, register_url: impl Into<String>) -> Self {
        self.register_url = Some(register_url.into());
        self
    }

    /// Sets the font icon class.
    #[must_use]
    pub fn with_icon_class(mut self, icon_class: impl Into<String>) -> Self {
        self.icon_class = Some(icon_class.into());
        self
    }

    /// Returns the path a button on `page` should send the user to.
    ///
    /// Registration falls back to the login path when the provider has no
    /// dedicated registration entry point.
    #[must_use]
    pub fn entry_url(&self, page: Page) -> &str {
        match page {
            Page::Login => &self.login_url,
            Page::Register => self.register_url.as_deref().unwrap_or(&self.login_url),
        }
    }

    /// Returns the icon class if it has a dedicated brand glyph.
    #[must_use]
    pub fn supported_icon_class(&self) -> Option<&str> {
        self.icon_class
            .as_deref()
            .filter(|class| SUPPORTED_ICON_CLASSES.contains(class))
    }
}

/// Joins provider display names for prose: `A`, `A or B`, `A, B, or C`.
#[must_use]
pub fn format_provider_names(providers: &[AuthProvider]) -> String {
    match providers {
        [] => String::new(),
        [only] => only.name.clone(),
        [first, second] => format!("{} or {}", first.name, second.name),
        [rest @ .., last] => {
            let head = rest
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head}, or {}", last.name)
        }
    }
}
