//! Main Leptos application component and routing.

use crate::pages::{LoginPage, RegisterPage};
use crate::types::SiteSettings;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// Server function returning the deployment settings the pages need.
#[server]
pub async fn get_site_settings() -> Result<SiteSettings, ServerFnError> {
    use crate::error::SettingsError;
    use axum::Extension;

    let Extension(settings): Extension<SiteSettings> =
        leptos_axum::extract().await.map_err(|e| {
            tracing::error!(error = %e, "Site settings missing from request");
            SettingsError::Unavailable {
                details: e.to_string(),
            }
            .into_server_error()
        })?;

    Ok(settings)
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Sign in or register"/>
        <Router>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=LoginPage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                </Routes>
            </main>
        </Router>
    }
}
