//! Per-page third-party-auth flow.
//!
//! Mounting a page reads the query string, starts the context fetch in the
//! browser, and derives the page's [`NavigationCommand`] from the store.
//! A redirect command leaves the app through a full page load.

use crate::types::SiteSettings;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;
use logistration_core::Page;
use logistration_third_party_auth::{
    AuthContextStore, ContextFetcher, ContextPayload, HintResolver, HttpContextSource,
    NavigationCommand, QueryParams, StoreWriter,
};

/// Store writer over a page-owned signal.
///
/// Once the page unmounts the signal is disposed and writes are dropped.
#[derive(Clone, Copy)]
pub struct SignalStore(RwSignal<AuthContextStore>);

impl StoreWriter for SignalStore {
    fn write(&self, f: impl FnOnce(&mut AuthContextStore)) {
        if self.0.try_update(f).is_none() {
            tracing::debug!("page unmounted; dropping third-party-auth store write");
        }
    }
}

/// Reactive state of one mounted logistration page.
#[derive(Clone, Copy)]
pub struct PageFlow {
    pub page: Page,
    pub store: RwSignal<AuthContextStore>,
    pub command: Memo<NavigationCommand>,
}

impl PageFlow {
    /// Starts the flow for `page`.
    ///
    /// A changed query string issues a new fetch; the fetcher applies only
    /// the newest response.
    pub fn mount(page: Page, site: &SiteSettings) -> Self {
        let search = use_location().search;
        let params = Memo::new(move |_| QueryParams::parse(&search.get()));
        let hint = Memo::new(move |_| params.with(QueryParams::provider_hint));
        let store = RwSignal::new(AuthContextStore::new());

        match HttpContextSource::new(site.lms_base_url()) {
            Ok(source) => {
                let fetcher = ContextFetcher::new(page, source);
                let writer = SignalStore(store);
                // Effects only run in the browser; the server renders the placeholder.
                Effect::new(move || {
                    let hint = hint.get();
                    let payload =
                        params.with(|params| ContextPayload::for_page(page, params, hint.as_ref()));
                    let fetcher = fetcher.clone();
                    spawn_local(async move {
                        fetcher.fetch(&payload, &writer).await;
                    });
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "invalid LMS base URL; showing the manual form");
                store.update(|s| {
                    s.begin();
                    s.failure();
                });
            }
        }

        let resolver = HintResolver::new(site.lms_base_url());
        let command = Memo::new(move |_| {
            let hint = hint.get();
            store.with(|s| resolver.resolve(hint.as_ref(), s))
        });

        Effect::new(move || {
            if let NavigationCommand::Redirect { url } = command.get() {
                tracing::info!(%url, "redirecting to hinted provider");
                navigate_external(&url);
            }
        });

        Self {
            page,
            store,
            command,
        }
    }

    /// Returns the platform name for alerts.
    pub fn platform_name(&self, site: &SiteSettings) -> String {
        self.store
            .with(|s| s.context().platform_name.clone())
            .unwrap_or_else(|| site.site_name.clone())
    }

    /// Clears the account-linking notice before leaving for the other page.
    pub fn switch_page(&self) {
        SignalStore(self.store).write(AuthContextStore::clear_error_message);
    }
}

#[cfg(feature = "hydrate")]
fn navigate_external(url: &str) {
    let Some(window) = web_sys::window() else {
        tracing::warn!("no window to redirect");
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        tracing::warn!(error = ?e, "failed to redirect");
    }
}

#[cfg(not(feature = "hydrate"))]
fn navigate_external(url: &str) {
    tracing::debug!(url, "no browser to redirect");
}

#[cfg(test)]
mod tests {
    use super::*;
    use logistration_third_party_auth::{ApiStatus, AuthContext, RenderBranch};

    #[test]
    fn signal_store_applies_writes() {
        let owner = Owner::new();
        owner.set();

        let signal = RwSignal::new(AuthContextStore::new());
        let writer = SignalStore(signal);
        writer.write(AuthContextStore::begin);
        writer.write(|s| s.success(None, None, Some(AuthContext::default())));

        assert_eq!(signal.with_untracked(|s| s.status()), ApiStatus::Complete);
    }

    #[test]
    fn signal_store_ignores_writes_after_dispose() {
        let owner = Owner::new();
        owner.set();

        let signal = RwSignal::new(AuthContextStore::new());
        let writer = SignalStore(signal);
        signal.dispose();

        writer.write(AuthContextStore::begin);

        assert!(signal.try_with_untracked(|s| s.status()).is_none());
    }

    #[test]
    fn switching_page_clears_link_error() {
        let owner = Owner::new();
        owner.set();

        let mut linked = AuthContextStore::new();
        linked.begin();
        linked.success(
            None,
            None,
            Some(AuthContext {
                current_provider: Some("Google".to_string()),
                error_message: Some("That account is linked to another user.".to_string()),
                ..AuthContext::default()
            }),
        );
        let flow = PageFlow {
            page: Page::Login,
            store: RwSignal::new(linked),
            command: Memo::new(|_| NavigationCommand::Render(RenderBranch::Loading)),
        };

        flow.switch_page();

        flow.store.with_untracked(|s| {
            assert_eq!(s.status(), ApiStatus::Pending);
            assert_eq!(s.context().error_message, None);
            assert_eq!(s.context().current_provider.as_deref(), Some("Google"));
        });
    }
}
