//! The fetched third-party-auth context and the wire shape it arrives in.
//!
//! The LMS sends snake_case JSON. Every attribute is optional on the wire and
//! defaults when absent, so a partial `context_data` object yields a fully
//! populated [`AuthContext`] rather than one that inherits earlier values.
//!
//! Older LMS releases send the context at the top level of the body instead
//! of under `context_data`; both shapes decode to the same response.

use crate::provider::AuthProvider;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile fields pre-filled by the external provider's pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineUserDetails {
    #[serde(alias = "fullname")]
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Aggregate third-party-auth state for the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthContext {
    /// Provider the user just returned from without a linked account.
    pub current_provider: Option<String>,
    /// URL that completes a pending external-auth pipeline.
    pub finish_auth_url: Option<String>,
    /// Primary (social) providers, in display order.
    pub providers: Vec<AuthProvider>,
    /// Secondary (institution) providers, in display order.
    pub secondary_providers: Vec<AuthProvider>,
    /// Profile fields supplied by the pipeline.
    pub pipeline_user_details: Option<PipelineUserDetails>,
    /// Whether the LMS asks for the registration form to submit itself.
    pub auto_submit_reg_form: bool,
    /// Country detected by the LMS.
    pub country_code: Option<String>,
    /// Account-linking failure detail; only meaningful with `current_provider`.
    pub error_message: Option<String>,
    /// Platform name the LMS wants shown in copy.
    pub platform_name: Option<String>,
    /// Where to send a newly registered user.
    pub welcome_page_redirect_url: Option<String>,
}

impl AuthContext {
    /// Iterates primary then secondary providers.
    pub fn all_providers(&self) -> impl Iterator<Item = &AuthProvider> {
        self.providers.iter().chain(self.secondary_providers.iter())
    }

    /// Finds a provider by slug across both lists.
    #[must_use]
    pub fn find_provider(&self, id: &str) -> Option<&AuthProvider> {
        self.all_providers().find(|provider| provider.id == id)
    }

    /// Returns the account-linking error, honoured only alongside a current provider.
    #[must_use]
    pub fn link_error_message(&self) -> Option<&str> {
        self.current_provider
            .as_ref()
            .and(self.error_message.as_deref())
    }
}

/// Dynamic registration field descriptions, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptions {
    #[serde(deserialize_with = "map_or_empty")]
    pub fields: Map<String, Value>,
}

/// Optional profile field descriptions offered after registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalFields {
    #[serde(deserialize_with = "map_or_empty")]
    pub fields: Map<String, Value>,
    /// Extended profile field names. `null`, `{}` or any other non-list
    /// value decodes as empty.
    #[serde(deserialize_with = "list_or_empty")]
    pub extended_profile: Vec<String>,
}

fn map_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Body of `GET /api/mfe_context`.
///
/// When `context_data` is absent or null, the context is read from the body
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextResponse {
    pub registration_fields: Option<FieldDescriptions>,
    pub optional_fields: Option<OptionalFields>,
    pub context_data: Option<AuthContext>,
}

impl<'de> Deserialize<'de> for ContextResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let body = Map::<String, Value>::deserialize(deserializer)?;

        let registration_fields = section::<_, D::Error>(&body, "registration_fields")?;
        let optional_fields = section::<_, D::Error>(&body, "optional_fields")?;
        let context_data = match section::<AuthContext, D::Error>(&body, "context_data")? {
            Some(context) => context,
            None => AuthContext::deserialize(Value::Object(body))
                .map_err(<D::Error as de::Error>::custom)?,
        };

        Ok(Self {
            registration_fields,
            optional_fields,
            context_data: Some(context_data),
        })
    }
}

/// Decodes `body[key]`, treating a missing or null entry as absent.
fn section<T, E>(body: &Map<String, Value>, key: &str) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value.clone())
            .map(Some)
            .map_err(|e| E::custom(format!("{key}: {e}"))),
    }
}
