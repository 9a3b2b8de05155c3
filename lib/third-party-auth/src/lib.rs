//! Third-party authentication for the logistration pages.
//!
//! This crate provides:
//! - The fetched auth context (`AuthContext`, `AuthProvider`) and its wire shape
//! - The per-page store and its state machine (`AuthContextStore`, `ApiStatus`)
//! - Query-string reading: provider hints and the context request payload
//! - The context fetcher with request-generation fencing (`ContextFetcher`)
//! - Hinted-login resolution (`HintResolver`, `NavigationCommand`)
//!
//! # Example
//!
//! ```
//! use logistration_third_party_auth::{
//!     AuthContext, AuthContextStore, AuthProvider, HintResolver, NavigationCommand, QueryParams,
//! };
//!
//! let params = QueryParams::parse("?tpa_hint=saml-mit");
//!
//! let mut store = AuthContextStore::new();
//! store.begin();
//! store.success(
//!     None,
//!     None,
//!     Some(AuthContext {
//!         secondary_providers: vec![
//!             AuthProvider::new("saml-mit", "MIT", "/auth/login/tpa-saml/?idp=mit")
//!                 .with_skip_hinted_login(true),
//!         ],
//!         ..AuthContext::default()
//!     }),
//! );
//!
//! let command = HintResolver::new("https://lms.example.com")
//!     .resolve(params.provider_hint().as_ref(), &store);
//!
//! assert_eq!(
//!     command,
//!     NavigationCommand::Redirect {
//!         url: "https://lms.example.com/auth/login/tpa-saml/?idp=mit".to_string()
//!     }
//! );
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod fetcher;
pub mod provider;
pub mod query;
pub mod resolver;
pub mod store;

// Re-export main types at crate root
pub use client::{CONTEXT_PATH, ContextSource, HttpContextSource};
pub use context::{
    AuthContext, ContextResponse, FieldDescriptions, OptionalFields, PipelineUserDetails,
};
pub use error::FetchError;
pub use fetcher::{ContextFetcher, FetchOutcome, FetchTicket};
pub use provider::{AuthProvider, SUPPORTED_ICON_CLASSES, format_provider_names};
pub use query::{ContextPayload, ProviderHint, QueryParams, hint_from_next};
pub use resolver::{FormView, HintResolver, NavigationCommand, RenderBranch};
pub use store::{ApiStatus, AuthContextStore, KnownProviders, StoreWriter};
