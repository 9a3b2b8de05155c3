//! Hinted-login resolution.
//!
//! Decides what a logistration page shows once the auth context is known.
//! The resolver is pure: it returns a [`NavigationCommand`] and leaves the
//! actual navigation to the host.

use crate::provider::AuthProvider;
use crate::query::ProviderHint;
use crate::store::{ApiStatus, AuthContextStore};

/// What the host should do with the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    /// Leave the app for `url` and render nothing.
    Redirect { url: String },
    /// Render one of the page branches.
    Render(RenderBranch),
}

/// A page rendering branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderBranch {
    /// The context is not known yet.
    Loading,
    /// Only the single sign-on entry for the hinted provider.
    ProviderWidget(AuthProvider),
    /// The manual username/password form.
    StandardForm(FormView),
}

/// Third-party-auth decorations of the manual form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    /// Provider the user signed into without a linked account.
    pub account_not_linked: Option<String>,
    /// Linking failure detail reported alongside `account_not_linked`.
    pub link_error: Option<String>,
    /// Social sign-in buttons to offer.
    pub providers: Vec<AuthProvider>,
    /// Institution providers to offer behind the institution button.
    pub secondary_providers: Vec<AuthProvider>,
}

impl FormView {
    /// Returns true if any provider entry point should be shown.
    #[must_use]
    pub fn offers_providers(&self) -> bool {
        !self.providers.is_empty() || !self.secondary_providers.is_empty()
    }
}

/// Resolves a page's branch from the store and the URL's provider hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintResolver {
    lms_base_url: String,
}

impl HintResolver {
    /// Creates a resolver that redirects relative to `lms_base_url`.
    #[must_use]
    pub fn new(lms_base_url: impl Into<String>) -> Self {
        let mut lms_base_url = lms_base_url.into();
        if lms_base_url.ends_with('/') {
            lms_base_url.pop();
        }
        Self { lms_base_url }
    }

    /// Returns the LMS URL for a provider path. Plain concatenation; the base
    /// is not escaped.
    #[must_use]
    pub fn lms_url(&self, path: &str) -> String {
        format!("{}{path}", self.lms_base_url)
    }

    /// Decides the page's branch.
    ///
    /// Nothing is decided before the context arrives. A failed fetch falls
    /// back to the bare form. A provider the user just returned from always
    /// wins over the hint, so they can finish manually.
    #[must_use]
    pub fn resolve(&self, hint: Option<&ProviderHint>, store: &AuthContextStore) -> NavigationCommand {
        let branch = match store.status() {
            ApiStatus::Default | ApiStatus::Pending => RenderBranch::Loading,
            ApiStatus::Failure => RenderBranch::StandardForm(FormView::default()),
            ApiStatus::Complete => return self.resolve_complete(hint, store),
        };
        NavigationCommand::Render(branch)
    }

    fn resolve_complete(
        &self,
        hint: Option<&ProviderHint>,
        store: &AuthContextStore,
    ) -> NavigationCommand {
        let context = store.context();

        if let Some(current) = &context.current_provider {
            return NavigationCommand::Render(RenderBranch::StandardForm(FormView {
                account_not_linked: Some(current.clone()),
                link_error: context.link_error_message().map(str::to_string),
                ..FormView::default()
            }));
        }

        let hinted = hint.and_then(|hint| context.find_provider(hint.as_str()));
        match hinted {
            Some(provider) if provider.skip_hinted_login => NavigationCommand::Redirect {
                url: self.lms_url(&provider.login_url),
            },
            Some(provider) => {
                NavigationCommand::Render(RenderBranch::ProviderWidget(provider.clone()))
            }
            None => NavigationCommand::Render(RenderBranch::StandardForm(FormView {
                providers: context.providers.clone(),
                secondary_providers: context.secondary_providers.clone(),
                ..FormView::default()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthContext;
    use crate::query::QueryParams;

    const BASE: &str = "https://lms.example.com";

    fn complete_store(context: AuthContext) -> AuthContextStore {
        let mut store = AuthContextStore::new();
        store.begin();
        store.success(None, None, Some(context));
        store
    }

    fn apple() -> AuthProvider {
        AuthProvider::new("oa2-apple-id", "Apple", "/auth/login/apple-id/")
    }

    fn hint(id: &str) -> ProviderHint {
        ProviderHint::new(id)
    }

    #[test]
    fn skip_hinted_login_redirects() {
        let store = complete_store(AuthContext {
            providers: vec![AuthProvider::new("x", "X", "/a").with_skip_hinted_login(true)],
            ..AuthContext::default()
        });

        let command = HintResolver::new(BASE).resolve(Some(&hint("x")), &store);

        assert_eq!(
            command,
            NavigationCommand::Redirect {
                url: "https://lms.example.com/a".to_string()
            }
        );
    }

    #[test]
    fn hinted_secondary_provider_redirects() {
        let store = complete_store(AuthContext {
            providers: vec![apple()],
            secondary_providers: vec![
                AuthProvider::new("saml-mit", "MIT", "/auth/login/tpa-saml/?idp=mit")
                    .with_skip_hinted_login(true),
            ],
            ..AuthContext::default()
        });

        let command = HintResolver::new(format!("{BASE}/")).resolve(Some(&hint("saml-mit")), &store);

        assert_eq!(
            command,
            NavigationCommand::Redirect {
                url: "https://lms.example.com/auth/login/tpa-saml/?idp=mit".to_string()
            }
        );
    }

    #[test]
    fn hint_without_skip_renders_single_widget() {
        let store = complete_store(AuthContext {
            providers: vec![apple(), AuthProvider::new("oa2-google", "Google", "/g")],
            ..AuthContext::default()
        });

        let command = HintResolver::new(BASE).resolve(Some(&hint("oa2-apple-id")), &store);

        assert_eq!(command, NavigationCommand::Render(RenderBranch::ProviderWidget(apple())));
    }

    #[test]
    fn unknown_hint_renders_standard_form() {
        let store = complete_store(AuthContext {
            providers: vec![apple()],
            ..AuthContext::default()
        });

        let command = HintResolver::new(BASE).resolve(Some(&hint("zzz")), &store);

        match command {
            NavigationCommand::Render(RenderBranch::StandardForm(form)) => {
                assert_eq!(form.providers, vec![apple()]);
                assert_eq!(form.account_not_linked, None);
            }
            other => panic!("expected standard form, got {other:?}"),
        }
    }

    #[test]
    fn no_hint_renders_standard_form_with_providers() {
        let secondary = AuthProvider::new("saml-mit", "MIT", "/m");
        let store = complete_store(AuthContext {
            providers: vec![apple()],
            secondary_providers: vec![secondary.clone()],
            ..AuthContext::default()
        });

        let command = HintResolver::new(BASE).resolve(None, &store);

        let NavigationCommand::Render(RenderBranch::StandardForm(form)) = command else {
            panic!("expected standard form");
        };
        assert!(form.offers_providers());
        assert_eq!(form.secondary_providers, vec![secondary]);
    }

    #[test]
    fn current_provider_overrides_redirect() {
        let store = complete_store(AuthContext {
            current_provider: Some("Apple".to_string()),
            providers: vec![apple().with_skip_hinted_login(true)],
            ..AuthContext::default()
        });

        let command = HintResolver::new(BASE).resolve(Some(&hint("oa2-apple-id")), &store);

        assert_eq!(
            command,
            NavigationCommand::Render(RenderBranch::StandardForm(FormView {
                account_not_linked: Some("Apple".to_string()),
                ..FormView::default()
            }))
        );
    }

    #[test]
    fn current_provider_carries_link_error() {
        let store = complete_store(AuthContext {
            current_provider: Some("Google".to_string()),
            error_message: Some("That Google account is linked to another user.".to_string()),
            ..AuthContext::default()
        });

        let NavigationCommand::Render(RenderBranch::StandardForm(form)) =
            HintResolver::new(BASE).resolve(None, &store)
        else {
            panic!("expected standard form");
        };
        assert_eq!(form.account_not_linked.as_deref(), Some("Google"));
        assert_eq!(
            form.link_error.as_deref(),
            Some("That Google account is linked to another user.")
        );
        assert!(!form.offers_providers());
    }

    #[test]
    fn pending_and_default_render_only_loading() {
        let resolver = HintResolver::new(BASE);
        let mut store = AuthContextStore::new();
        assert_eq!(
            resolver.resolve(Some(&hint("x")), &store),
            NavigationCommand::Render(RenderBranch::Loading)
        );

        store.begin();
        assert_eq!(
            resolver.resolve(Some(&hint("x")), &store),
            NavigationCommand::Render(RenderBranch::Loading)
        );
        assert_eq!(
            resolver.resolve(None, &store),
            NavigationCommand::Render(RenderBranch::Loading)
        );
    }

    #[test]
    fn cleared_error_returns_to_loading() {
        let mut store = complete_store(AuthContext {
            providers: vec![apple().with_skip_hinted_login(true)],
            ..AuthContext::default()
        });
        store.clear_error_message();

        assert_eq!(
            HintResolver::new(BASE).resolve(Some(&hint("oa2-apple-id")), &store),
            NavigationCommand::Render(RenderBranch::Loading)
        );
    }

    #[test]
    fn failure_falls_back_to_bare_form() {
        let mut store = AuthContextStore::new();
        store.begin();
        store.failure();

        assert_eq!(
            HintResolver::new(BASE).resolve(Some(&hint("oa2-apple-id")), &store),
            NavigationCommand::Render(RenderBranch::StandardForm(FormView::default()))
        );
    }

    #[test]
    fn hint_from_next_drives_widget() {
        let params = QueryParams::parse("?next=/dashboard%3Ftpa_hint%3Doa2-apple-id");
        let store = complete_store(AuthContext {
            providers: vec![apple()],
            ..AuthContext::default()
        });

        let command = HintResolver::new(BASE).resolve(params.provider_hint().as_ref(), &store);

        assert_eq!(command, NavigationCommand::Render(RenderBranch::ProviderWidget(apple())));
    }

    #[test]
    fn lms_url_concatenates() {
        let resolver = HintResolver::new(BASE);
        assert_eq!(
            resolver.lms_url("/auth/login/google"),
            "https://lms.example.com/auth/login/google"
        );
    }
}
