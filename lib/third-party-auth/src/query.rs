//! Query-string reading: provider hints and the context request payload.

use logistration_core::{AUTH_PARAMS, DEFAULT_REDIRECT_URL, Page};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query parameter carrying a provider hint.
pub const TPA_HINT_PARAM: &str = "tpa_hint";

/// Query parameter carrying the post-auth redirect target.
pub const NEXT_PARAM: &str = "next";

/// Payload key for the registration redirect target.
pub const REDIRECT_TO_PARAM: &str = "redirect_to";

/// Decoded query parameters of the current URL, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a query string, with or without its leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    /// Builds from already-decoded pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the provider hint this URL carries, if any.
    ///
    /// An explicit `tpa_hint` wins; otherwise the hint is scraped out of `next`.
    #[must_use]
    pub fn provider_hint(&self) -> Option<ProviderHint> {
        self.get(TPA_HINT_PARAM)
            .filter(|hint| !hint.is_empty())
            .map(ProviderHint::new)
            .or_else(|| self.get(NEXT_PARAM).and_then(hint_from_next))
    }

    /// Returns the LMS auth parameters present on this URL.
    #[must_use]
    pub fn auth_params(&self) -> Vec<(String, String)> {
        AUTH_PARAMS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value.to_string())))
            .collect()
    }
}

/// Best-effort scrape of a hint embedded in a `next` redirect target.
///
/// Everything after the first `tpa_hint=` is taken as the hint, to the end of
/// the string. This is not a nested URL parse: a doubly encoded `next` will
/// not yield a hint.
#[must_use]
pub fn hint_from_next(next: &str) -> Option<ProviderHint> {
    let marker = "tpa_hint=";
    let start = next.find(marker)? + marker.len();
    let hint = &next[start..];
    (!hint.is_empty()).then(|| ProviderHint::new(hint))
}

/// Identifier of the provider the caller wants pre-selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderHint(String);

impl ProviderHint {
    /// Creates a hint from a provider slug.
    #[must_use]
    pub fn new(hint: impl Into<String>) -> Self {
        Self(hint.into())
    }

    /// Returns the hint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query payload for the context request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContextPayload {
    pairs: Vec<(String, String)>,
}

impl ContextPayload {
    /// Builds the payload a page sends for the given URL.
    ///
    /// Login forwards the LMS auth parameters. Registration additionally
    /// names where to go afterwards. Both carry the resolved hint.
    #[must_use]
    pub fn for_page(page: Page, params: &QueryParams, hint: Option<&ProviderHint>) -> Self {
        let mut payload = Self {
            pairs: params.auth_params(),
        };
        if page == Page::Register {
            let redirect_to = params
                .get(NEXT_PARAM)
                .filter(|next| !next.is_empty())
                .unwrap_or(DEFAULT_REDIRECT_URL);
            payload.set(REDIRECT_TO_PARAM, redirect_to);
        }
        if let Some(hint) = hint {
            payload.set(TPA_HINT_PARAM, hint.as_str());
        }
        payload
    }

    /// Sets `key`, replacing any earlier value.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the payload as key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}
