//! Registration page component.

use crate::app::get_site_settings;
use crate::components::{
    EnterpriseSso, LoadingPlaceholder, SwitchPageLink, ThirdPartyAuth, ThirdPartyAuthAlert,
};
use crate::flow::PageFlow;
use crate::types::{REGISTRATION_ENDPOINT, SiteSettings};
use crate::validation::{RegistrationErrors, RegistrationForm, validate_registration};
use leptos::prelude::*;
use logistration_core::Page;
use logistration_third_party_auth::{
    AuthContext, FormView, NavigationCommand, RenderBranch, format_provider_names,
};

/// Registration page.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_site_settings());

    view! {
        <div class="logistration-page register-page">
            <h1>"Create an account"</h1>
            <Suspense fallback=move || view! { <LoadingPlaceholder/> }>
                {move || {
                    settings.get().map(|result| {
                        match result {
                            Ok(site) => view! { <RegisterContent site=site/> }.into_any(),
                            Err(_) => view! {
                                <p class="error">"Failed to load registration options. Please try again."</p>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn RegisterContent(site: SiteSettings) -> impl IntoView {
    let flow = PageFlow::mount(Page::Register, &site);

    view! {
        <div class="register-content">
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
                    let prefill = flow.store.with(|s| prefill_from(s.context()));
                    view! {
                        <RegisterForm
                            flow=flow
                            form=form
                            site=site.clone()
                            platform_name=platform_name
                            prefill=prefill
                        />
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// Registration values supplied by a running provider pipeline.
fn prefill_from(context: &AuthContext) -> RegistrationForm {
    let details = context.pipeline_user_details.clone().unwrap_or_default();
    let name = details.name.filter(|name| !name.is_empty()).unwrap_or_else(|| {
        [details.first_name, details.last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    });

    RegistrationForm {
        name,
        username: details.username.unwrap_or_default(),
        email: details.email.unwrap_or_default(),
        password: String::new(),
        country: context.country_code.clone().unwrap_or_default(),
    }
}

/// Account form, posted natively to the LMS when valid.
#[component]
fn RegisterForm(
    flow: PageFlow,
    form: FormView,
    site: SiteSettings,
    platform_name: String,
    prefill: RegistrationForm,
) -> impl IntoView {
    let (values, set_values) = signal(prefill);
    let (errors, set_errors) = signal(RegistrationErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        let result = values.with_untracked(validate_registration);
        if !result.is_valid() {
            ev.prevent_default();
        }
        set_errors.set(result);
    };

    let provider_summary = (!form.providers.is_empty()).then(|| {
        format!(
            "You can also create an account using {}.",
            format_provider_names(&form.providers)
        )
    });
    let action = site.lms_url(REGISTRATION_ENDPOINT);

    view! {
        <div class="register-form">
            <ThirdPartyAuthAlert
                page=Page::Register
                form=form.clone()
                platform_name=platform_name
            />
            <form method="post" action=action on:submit=on_submit>
                <div class="form-group">
                    <label for="name">"Full name"</label>
                    <input
                        id="name"
                        name="name"
                        type="text"
                        autocomplete="name"
                        prop:value=move || values.with(|v| v.name.clone())
                        on:input=move |ev| {
                            set_values.update(|v| v.name = event_target_value(&ev))
                        }
                    />
                    {move || {
                        errors
                            .get()
                            .name
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
                <div class="form-group">
                    <label for="username">"Public username"</label>
                    <input
                        id="username"
                        name="username"
                        type="text"
                        autocomplete="username"
                        prop:value=move || values.with(|v| v.username.clone())
                        on:input=move |ev| {
                            set_values.update(|v| v.username = event_target_value(&ev))
                        }
                    />
                    {move || {
                        errors
                            .get()
                            .username
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        autocomplete="email"
                        prop:value=move || values.with(|v| v.email.clone())
                        on:input=move |ev| {
                            set_values.update(|v| v.email = event_target_value(&ev))
                        }
                    />
                    {move || {
                        errors
                            .get()
                            .email
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        name="password"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || values.with(|v| v.password.clone())
                        on:input=move |ev| {
                            set_values.update(|v| v.password = event_target_value(&ev))
                        }
                    />
                    {move || {
                        errors
                            .get()
                            .password
                            .map(|message| view! { <p class="field-error">{message}</p> })
                    }}
                </div>
                <div class="form-group">
                    <label for="country">"Country or region"</label>
                    <input
                        id="country"
                        name="country"
                        type="text"
                        autocomplete="country"
                        prop:value=move || values.with(|v| v.country.clone())
                        on:input=move |ev| {
                            set_values.update(|v| v.country = event_target_value(&ev))
                        }
                    />
                </div>
                <button type="submit" class="btn-primary">"Create an account"</button>
            </form>
            {provider_summary.map(|summary| view! { <p class="tpa-summary">{summary}</p> })}
            <ThirdPartyAuth page=Page::Register form=form site=site/>
            <SwitchPageLink
                flow=flow
                target=Page::Login
                prompt="Already have an account? "
                label="Sign in"
            />
        </div>
    }
}
