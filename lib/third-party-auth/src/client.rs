//! HTTP access to the LMS context endpoint.

use crate::context::ContextResponse;
use crate::error::FetchError;
use crate::query::ContextPayload;
use async_trait::async_trait;
use logistration_core::Result;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};
use url::Url;

/// Path of the context endpoint, relative to the LMS base URL.
pub const CONTEXT_PATH: &str = "/api/mfe_context";

/// Something that can produce an auth context for a payload.
///
/// Futures are not required to be `Send`: the flow runs on a single-threaded
/// event loop, and the browser fetch API is not `Send`.
#[async_trait(?Send)]
pub trait ContextSource {
    /// Fetches the context for `payload`.
    async fn fetch_context(
        &self,
        payload: &ContextPayload,
    ) -> Result<ContextResponse, FetchError>;
}

/// Context source backed by `GET <lms>/api/mfe_context`.
#[derive(Debug, Clone)]
pub struct HttpContextSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpContextSource {
    /// Creates a source for the given LMS base URL.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidEndpoint` if the base URL does not form an
    /// absolute endpoint URL.
    pub fn new(lms_base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(reqwest::Client::new(), lms_base_url)
    }

    /// Creates a source that sends requests through `client`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidEndpoint` if the base URL does not form an
    /// absolute endpoint URL.
    pub fn with_client(
        client: reqwest::Client,
        lms_base_url: &str,
    ) -> Result<Self, FetchError> {
        let raw = format!("{}{CONTEXT_PATH}", lms_base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| FetchError::InvalidEndpoint {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Returns the endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ContextSource for HttpContextSource {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint))]
    async fn fetch_context(
        &self,
        payload: &ContextPayload,
    ) -> Result<ContextResponse, FetchError> {
        let request = self
            .client
            .get(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .query(payload.pairs());

        // The LMS reads the session cookie to find a running pipeline.
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await.map_err(|e| FetchError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .json::<ContextResponse>()
            .await
            .map_err(|e| FetchError::Decode {
                reason: e.to_string(),
            })?;

        debug!(
            providers = body.context_data.as_ref().map_or(0, |c| c.providers.len()),
            "context response decoded"
        );

        Ok(body)
    }
}
