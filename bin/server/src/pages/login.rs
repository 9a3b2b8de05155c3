//! Login page component.

use crate::app::get_site_settings;
use crate::components::{
    EnterpriseSso, LoadingPlaceholder, SwitchPageLink, ThirdPartyAuth, ThirdPartyAuthAlert,
};
use crate::flow::PageFlow;
use crate::types::{LOGIN_ENDPOINT, SiteSettings};
use crate::validation::{LoginErrors, validate_login};
use leptos::prelude::*;
use logistration_core::Page;
use logistration_third_party_auth::{FormView, NavigationCommand, RenderBranch};

/// Login page.
#[component]
pub fn LoginPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_site_settings());

    view! {
        <div class="logistration-page login-page">
            <h1>"Sign in"</h1>
            <Suspense fallback=move || view! { <LoadingPlaceholder/> }>
                {move || {
                    settings.get().map(|result| {
                        match result {
                            Ok(site) => view! { <LoginContent site=site/> }.into_any(),
                            Err(_) => view! {
                                <p class="error">"Failed to load sign-in options. Please try again."</p>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn LoginContent(site: SiteSettings) -> impl IntoView {
    let flow = PageFlow::mount(Page::Login, &site);

    view! {
        <div class="login-content">
            {move || match flow.command.get() {
                NavigationCommand::Redirect { .. } => view! { <span></span> }.into_any(),
                NavigationCommand::Render(RenderBranch::Loading) => {
                    view! { <LoadingPlaceholder/> }.into_any()
                }
                NavigationCommand::Render(RenderBranch::ProviderWidget(provider)) => {
                    view! { <EnterpriseSso provider=provider site=site.clone()/> }.into_any()
                }
                NavigationCommand::Render(RenderBranch::StandardForm(form)) => {
                    let platform_name = flow.platform_name(&site);
                    view! {
                        <LoginForm flow=flow form=form site=site.clone() platform_name=platform_name/>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// Username/password form, posted natively to the LMS when valid.
#[component]
fn LoginForm(
    flow: PageFlow,
    form: FormView,
    site: SiteSettings,
    platform_name: String,
) -> impl IntoView {
    let (email_or_username, set_email_or_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(LoginErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        let result = validate_login(
            &email_or_username.get_untracked(),
            &password.get_untracked(),
        );
        if !result.is_valid() {
            ev.prevent_default();
        }
        set_errors.set(result);
    };

    let action = site.lms_url(LOGIN_ENDPOINT);

    view! {
        <div class="login-form">
            <ThirdPartyAuthAlert page=Page::Login form=form.clone() platform_name=platform_name/>
            <form method="post" action=action on:submit=on_submit>
                <div class="form-group">
                    <label for="email_or_username">"Username or email"</label>
                    <input
                        id="email_or_username"
                        name="email"
                        type="text"
                        autocomplete="username"
                        prop:value=email_or_username
                        on:input=move |ev| set_email_or_username.set(event_target_value(&ev))
                    />
                    {move || {
                        errors
                            .get()
                            .email_or_username
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        name="password"
                        type="password"
                        autocomplete="current-password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    {move || {
                        errors
                            .get()
                            .password
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
                <button type="submit" class="btn-primary">"Sign in"</button>
            </form>
            <ThirdPartyAuth page=Page::Login form=form site=site/>
            <SwitchPageLink
                flow=flow
                target=Page::Register
                prompt="New here? "
                label="Create an account"
            />
        </div>
    }
}
