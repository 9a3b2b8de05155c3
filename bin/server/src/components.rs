//! Third-party sign-in components shared by the login and register pages.

use crate::flow::PageFlow;
use crate::types::SiteSettings;
use leptos::prelude::*;
use logistration_core::{LOGIN_PAGE, Page};
use logistration_third_party_auth::{AuthProvider, FormView};

/// Alert text for a provider sign-in that has no linked account yet.
#[must_use]
pub fn account_not_linked_message(page: Page, provider: &str, platform_name: &str) -> String {
    match page {
        Page::Login => format!(
            "You have successfully signed into {provider}, but your {provider} account does not \
             have a linked {platform_name} account. To link your accounts, sign in now using \
             your {platform_name} password."
        ),
        Page::Register => format!(
            "You've successfully signed into {provider}! We just need a little more information \
             before you start learning with {platform_name}."
        ),
    }
}

/// Tells a user returning from a provider how to finish.
#[component]
pub fn ThirdPartyAuthAlert(page: Page, form: FormView, platform_name: String) -> impl IntoView {
    let Some(provider) = form.account_not_linked else {
        return view! { <span></span> }.into_any();
    };
    let message = account_not_linked_message(page, &provider, &platform_name);
    let heading = (page == Page::Register).then(|| view! { <h4>"Almost done!"</h4> });
    let link_error = form
        .link_error
        .map(|error| view! { <p class="alert-error">{error}</p> });

    view! {
        <div id="tpa-alert" class="alert alert-info" role="alert">
            {heading}
            <p>{message}</p>
            {link_error}
        </div>
    }
    .into_any()
}

/// Provider glyph: the provider image, a supported brand icon, or a generic sign-in icon.
#[component]
pub fn ProviderIcon(provider: AuthProvider) -> impl IntoView {
    if let Some(src) = provider.icon_image.clone() {
        let alt = format!("icon {}", provider.name);
        return view! { <img class="provider-icon-image" src=src alt=alt/> }.into_any();
    }
    let class = match provider.supported_icon_class() {
        Some(icon) => format!("provider-icon fa-brands fa-{icon}"),
        None => "provider-icon fa-solid fa-right-to-bracket".to_string(),
    };
    view! { <i class=class aria-hidden="true"></i> }.into_any()
}

/// Buttons for the primary providers.
#[component]
pub fn SocialAuthProviders(
    page: Page,
    providers: Vec<AuthProvider>,
    site: SiteSettings,
) -> impl IntoView {
    view! {
        <div class="social-auth-providers">
            {providers
                .into_iter()
                .map(|provider| {
                    let href = site.lms_url(provider.entry_url(page));
                    let class = format!("btn-social btn-{}", provider.id);
                    let label = match page {
                        Page::Login => format!("Sign in with {}", provider.name),
                        Page::Register => format!("Create account using {}", provider.name),
                    };
                    view! {
                        <a id=provider.id.clone() class=class href=href rel="external">
                            <ProviderIcon provider=provider.clone()/>
                            <span class="provider-name">{provider.name.clone()}</span>
                            <span class="sr-only">{label}</span>
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// List of institution providers behind the institution button.
#[component]
pub fn InstitutionLogistration(providers: Vec<AuthProvider>, site: SiteSettings) -> impl IntoView {
    view! {
        <div class="institution-providers">
            <h4>"Choose your institution from the list below:"</h4>
            <ul>
                {providers
                    .into_iter()
                    .map(|provider| {
                        let href = site.lms_url(&provider.login_url);
                        view! {
                            <li>
                                <a id=provider.id.clone() href=href rel="external">
                                    {provider.name.clone()}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

/// Provider entry points under the manual form.
#[component]
pub fn ThirdPartyAuth(page: Page, form: FormView, site: SiteSettings) -> impl IntoView {
    if form.account_not_linked.is_some() || !form.offers_providers() {
        return view! { <span></span> }.into_any();
    }

    let (show_institutions, set_show_institutions) = signal(false);
    let heading = match page {
        Page::Login => "Or sign in with:",
        Page::Register => "Or register with:",
    };
    let institution_button = (!form.secondary_providers.is_empty()).then(|| {
        view! {
            <button
                type="button"
                class="btn-institution"
                on:click=move |_| set_show_institutions.update(|shown| *shown = !*shown)
            >
                "Institution/campus credentials"
            </button>
        }
    });
    let secondary = form.secondary_providers;
    let institution_site = site.clone();

    view! {
        <div class="third-party-auth">
            <h4>{heading}</h4>
            {institution_button}
            <SocialAuthProviders page=page providers=form.providers site=site/>
            {move || {
                show_institutions
                    .get()
                    .then(|| {
                        view! {
                            <InstitutionLogistration
                                providers=secondary.clone()
                                site=institution_site.clone()
                            />
                        }
                    })
            }}
        </div>
    }
    .into_any()
}

/// Single sign-on entry for a hinted provider.
#[component]
pub fn EnterpriseSso(provider: AuthProvider, site: SiteSettings) -> impl IntoView {
    let href = site.lms_url(&provider.login_url);
    let prompt = format!(
        "Would you like to sign in using your {} credentials?",
        provider.name
    );
    let class = format!("btn-tpa btn-{}", provider.id);

    view! {
        <div class="enterprise-sso">
            <h3>{prompt}</h3>
            <a id=provider.id.clone() class=class href=href rel="external">
                <ProviderIcon provider=provider.clone()/>
                <span class="provider-name">{provider.name.clone()}</span>
            </a>
            <div class="mt-4">
                <a href=LOGIN_PAGE rel="external" class="btn-outline">
                    "Show me other ways to sign in or register"
                </a>
            </div>
        </div>
    }
}

/// Link to the other logistration page. Leaving clears any account-linking notice.
#[component]
pub fn SwitchPageLink(
    flow: PageFlow,
    target: Page,
    prompt: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <p class="switch-page">
            {prompt}
            <a href=target.path() on:click=move |_| flow.switch_page()>
                {label}
            </a>
        </p>
    }
}

/// Shown while the context is unknown.
#[component]
pub fn LoadingPlaceholder() -> impl IntoView {
    view! {
        <div class="tpa-loading" aria-busy="true">
            <div class="skeleton skeleton-button"></div>
            <div class="skeleton skeleton-button"></div>
        </div>
    }
}
