//! The auth context store and its state machine.
//!
//! The store is owned by the page that mounted it and has exactly one writer,
//! the context fetcher. Transitions are pure replacements of state:
//!
//! ```text
//! Default ──begin──▶ Pending ──success──▶ Complete
//!                       │                    │
//!                       └──failure──▶ Failure │
//!                       ▲                    │
//!                       └─clear_error_message┘
//! ```

use crate::context::{AuthContext, FieldDescriptions, OptionalFields};
use crate::provider::AuthProvider;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;

/// Progress of the context fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    /// Nothing requested yet.
    #[default]
    Default,
    /// A request is in flight, or an error notice was cleared.
    Pending,
    /// The context arrived.
    Complete,
    /// The request failed.
    Failure,
}

impl ApiStatus {
    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known provider lists, available only once the context has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownProviders<'a> {
    pub primary: &'a [AuthProvider],
    pub secondary: &'a [AuthProvider],
}

/// Holds the fetched auth context for one mounted page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthContextStore {
    status: ApiStatus,
    field_descriptions: Map<String, Value>,
    optional_fields: OptionalFields,
    context: AuthContext,
}

impl AuthContextStore {
    /// Creates an empty store in the `Default` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started.
    pub fn begin(&mut self) {
        self.status = ApiStatus::Pending;
    }

    /// Stores a fetched context, replacing the previous one wholesale.
    ///
    /// Missing sections become their empty-shaped defaults; nothing from the
    /// previous context survives.
    pub fn success(
        &mut self,
        field_descriptions: Option<FieldDescriptions>,
        optional_fields: Option<OptionalFields>,
        context: Option<AuthContext>,
    ) {
        self.field_descriptions = field_descriptions.unwrap_or_default().fields;
        self.optional_fields = optional_fields.unwrap_or_default();
        self.context = context.unwrap_or_default();
        self.status = ApiStatus::Complete;
    }

    /// Marks the fetch as failed. No server detail is retained.
    pub fn failure(&mut self) {
        self.status = ApiStatus::Failure;
        self.context.error_message = None;
    }

    /// Clears a displayed account-link error and re-arms error display.
    pub fn clear_error_message(&mut self) {
        self.status = ApiStatus::Pending;
        self.context.error_message = None;
    }

    /// Returns the fetch status.
    #[must_use]
    pub fn status(&self) -> ApiStatus {
        self.status
    }

    /// Returns true once the context has arrived.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == ApiStatus::Complete
    }

    /// Returns the stored context. Provider lists in it are only meaningful
    /// when [`is_complete`](Self::is_complete); prefer [`providers`](Self::providers).
    #[must_use]
    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    /// Returns the provider lists, or `None` while they are not yet known.
    #[must_use]
    pub fn providers(&self) -> Option<KnownProviders<'_>> {
        self.is_complete().then(|| KnownProviders {
            primary: &self.context.providers,
            secondary: &self.context.secondary_providers,
        })
    }

    /// Returns the registration field descriptions.
    #[must_use]
    pub fn field_descriptions(&self) -> &Map<String, Value> {
        &self.field_descriptions
    }

    /// Returns the optional profile field descriptions.
    #[must_use]
    pub fn optional_fields(&self) -> &OptionalFields {
        &self.optional_fields
    }
}

/// Write access to a store owned elsewhere.
///
/// Hosts implement this for whatever cell holds their store (a `RefCell`, a
/// reactive signal). Implementations must drop the write silently when the
/// owning page is gone.
pub trait StoreWriter {
    /// Applies `f` to the store.
    fn write(&self, f: impl FnOnce(&mut AuthContextStore));
}

impl StoreWriter for RefCell<AuthContextStore> {
    fn write(&self, f: impl FnOnce(&mut AuthContextStore)) {
        f(&mut self.borrow_mut());
    }
}
