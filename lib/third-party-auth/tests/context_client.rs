//! HTTP tests for the context source and fetcher against a mock LMS.

use logistration_core::Page;
use logistration_third_party_auth::{
    ApiStatus, AuthContextStore, ContextFetcher, ContextPayload, ContextSource, FetchOutcome,
    HintResolver, HttpContextSource, NavigationCommand, QueryParams, RenderBranch,
};
use serde_json::json;
use std::cell::RefCell;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context_body() -> serde_json::Value {
    json!({
        "registration_fields": {
            "fields": {"country": {"name": "country", "type": "select"}}
        },
        "optional_fields": {
            "fields": {"gender": {"name": "gender"}},
            "extended_profile": []
        },
        "context_data": {
            "current_provider": null,
            "finish_auth_url": null,
            "providers": [
                {
                    "id": "oa2-apple-id",
                    "name": "Apple",
                    "icon_class": "apple",
                    "icon_image": null,
                    "login_url": "/auth/login/apple-id/?auth_entry=login&next=%2Fdashboard",
                    "register_url": "/auth/login/apple-id/?auth_entry=register&next=%2Fdashboard",
                    "skip_hinted_login": false,
                    "skip_registration_form": false
                }
            ],
            "secondary_providers": [
                {
                    "id": "saml-mit",
                    "name": "MIT",
                    "login_url": "/auth/login/tpa-saml/?auth_entry=login&idp=mit",
                    "skip_hinted_login": true
                }
            ],
            "pipeline_user_details": null,
            "country_code": "US",
            "error_message": null
        }
    })
}

#[tokio::test]
async fn fetch_sends_payload_and_decodes_context() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mfe_context"))
        .and(query_param("tpa_hint", "oa2-apple-id"))
        .and(query_param("course_id", "course-v1:edX+DemoX+Demo"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(context_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = QueryParams::parse("?course_id=course-v1%3AedX%2BDemoX%2BDemo&tpa_hint=oa2-apple-id");
    let hint = params.provider_hint();
    let payload = ContextPayload::for_page(Page::Login, &params, hint.as_ref());

    let source = HttpContextSource::new(&mock_server.uri()).expect("valid base url");
    let response = source.fetch_context(&payload).await.expect("context");

    let context = response.context_data.expect("context data");
    assert_eq!(context.providers.len(), 1);
    assert_eq!(context.providers[0].id, "oa2-apple-id");
    assert_eq!(context.secondary_providers[0].id, "saml-mit");
    assert!(context.secondary_providers[0].skip_hinted_login);
    assert_eq!(context.country_code.as_deref(), Some("US"));
    let fields = response.registration_fields.expect("registration fields");
    assert!(fields.fields.contains_key("country"));
}

#[tokio::test]
async fn server_error_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mfe_context"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = HttpContextSource::new(&mock_server.uri()).expect("valid base url");
    let result = source.fetch_context(&ContextPayload::default()).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("500"));
}

#[tokio::test]
async fn malformed_body_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mfe_context"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let source = HttpContextSource::new(&mock_server.uri()).expect("valid base url");
    let result = source.fetch_context(&ContextPayload::default()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn register_page_flow_redirects_hinted_institution() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mfe_context"))
        .and(query_param("redirect_to", "/dashboard"))
        .and(query_param("tpa_hint", "saml-mit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(context_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = QueryParams::parse("tpa_hint=saml-mit");
    let hint = params.provider_hint();
    let payload = ContextPayload::for_page(Page::Register, &params, hint.as_ref());

    let source = HttpContextSource::new(&mock_server.uri()).expect("valid base url");
    let fetcher = ContextFetcher::new(Page::Register, source);
    let store = RefCell::new(AuthContextStore::new());

    assert_eq!(fetcher.fetch(&payload, &store).await, FetchOutcome::Completed);

    let command = HintResolver::new(mock_server.uri()).resolve(hint.as_ref(), &store.borrow());
    assert_eq!(
        command,
        NavigationCommand::Redirect {
            url: format!(
                "{}/auth/login/tpa-saml/?auth_entry=login&idp=mit",
                mock_server.uri()
            )
        }
    );
}

#[tokio::test]
async fn unreachable_lms_falls_back_to_form() {
    // Nothing listens on the discard port.
    let source = HttpContextSource::new("http://127.0.0.1:9").expect("valid base url");
    let fetcher = ContextFetcher::new(Page::Login, source);
    let store = RefCell::new(AuthContextStore::new());

    let outcome = fetcher.fetch(&ContextPayload::default(), &store).await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(store.borrow().status(), ApiStatus::Failure);
    assert!(matches!(
        HintResolver::new("http://127.0.0.1:9").resolve(None, &store.borrow()),
        NavigationCommand::Render(RenderBranch::StandardForm(_))
    ));
}

#[tokio::test]
async fn empty_extended_profile_still_redirects_hinted_provider() {
    let mock_server = MockServer::start().await;

    for extended_profile in [json!({}), json!(null)] {
        let mut body = context_body();
        body["optional_fields"]["extended_profile"] = extended_profile;

        Mock::given(method("GET"))
            .and(path("/api/mfe_context"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        let params = QueryParams::parse("?tpa_hint=saml-mit");
        let hint = params.provider_hint();
        let payload = ContextPayload::for_page(Page::Login, &params, hint.as_ref());
        let source = HttpContextSource::new(&mock_server.uri()).expect("valid base url");
        let fetcher = ContextFetcher::new(Page::Login, source);
        let store = RefCell::new(AuthContextStore::new());

        assert_eq!(fetcher.fetch(&payload, &store).await, FetchOutcome::Completed);
        assert!(store.borrow().optional_fields().extended_profile.is_empty());
        assert!(matches!(
            HintResolver::new(mock_server.uri()).resolve(hint.as_ref(), &store.borrow()),
            NavigationCommand::Redirect { .. }
        ));
    }
}

#[tokio::test]
async fn legacy_body_without_context_data_is_read_from_root() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mfe_context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "providers": [
                {
                    "id": "oa2-apple-id",
                    "name": "Apple",
                    "login_url": "/auth/login/apple-id/?auth_entry=login"
                }
            ],
            "pipeline_user_details": {"fullname": "Ada Lovelace"}
        })))
        .mount(&mock_server)
        .await;

    let source = HttpContextSource::new(&mock_server.uri()).expect("valid base url");
    let response = source
        .fetch_context(&ContextPayload::default())
        .await
        .expect("context");

    let context = response.context_data.expect("context data");
    assert_eq!(context.providers[0].id, "oa2-apple-id");
    assert_eq!(
        context
            .pipeline_user_details
            .and_then(|details| details.name)
            .as_deref(),
        Some("Ada Lovelace")
    );
}
