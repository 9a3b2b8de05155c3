//! Drives the auth context store from a context source.
//!
//! Each mounted page owns one fetcher. Every `fetch` takes a new generation;
//! a response is applied only while its generation is still the newest, so a
//! slow stale response can never overwrite a fresher one.

use crate::client::ContextSource;
use crate::query::ContextPayload;
use crate::store::{AuthContextStore, StoreWriter};
use logistration_core::Page;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Span, debug, info, instrument, warn};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: Page,
    pub generation: u64,
}

/// What a fetch did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The context was stored.
    Completed,
    /// The store was marked failed.
    Failed,
    /// A newer fetch started first; the response was discarded.
    Superseded,
}

/// Fetches the auth context for one page and writes it into a store.
#[derive(Debug, Clone)]
pub struct ContextFetcher<S> {
    page: Page,
    source: S,
    generation: Arc<AtomicU64>,
}

impl<S: ContextSource> ContextFetcher<S> {
    /// Creates a fetcher for `page`.
    #[must_use]
    pub fn new(page: Page, source: S) -> Self {
        Self {
            page,
            source,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the page this fetcher serves.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// Returns the underlying context source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn issue_ticket(&self) -> FetchTicket {
        FetchTicket {
            page: self.page,
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Requests the context for `payload` and records the result in `store`.
    ///
    /// Marks the store pending, then complete or failed. Errors are logged
    /// and never returned; the page falls back to its manual form.
    #[instrument(skip_all, fields(page = %self.page, generation = tracing::field::Empty))]
    pub async fn fetch<W: StoreWriter>(&self, payload: &ContextPayload, store: &W) -> FetchOutcome {
        let ticket = self.issue_ticket();
        Span::current().record("generation", ticket.generation);

        debug!(params = payload.pairs().len(), "requesting third-party-auth context");
        store.write(AuthContextStore::begin);

        let result = self.source.fetch_context(payload).await;

        if !self.is_current(ticket) {
            debug!("discarding superseded third-party-auth context response");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                info!(
                    providers = response.context_data.as_ref().map_or(0, |c| c.providers.len()),
                    secondary_providers = response
                        .context_data
                        .as_ref()
                        .map_or(0, |c| c.secondary_providers.len()),
                    "third-party-auth context loaded"
                );
                store.write(move |s| {
                    s.success(
                        response.registration_fields,
                        response.optional_fields,
                        response.context_data,
                    );
                });
                FetchOutcome::Completed
            }
            Err(e) => {
                warn!(error = %e, "third-party-auth context unavailable");
                store.write(AuthContextStore::failure);
                FetchOutcome::Failed
            }
        }
    }
}
