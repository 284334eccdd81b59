//! Search client abstraction.
//!
//! This module defines the trait the orchestrator talks to. Implementations
//! issue exactly one outbound request per call: no caching, no retry.

use crate::types::{SearchQuery, SearchResult};
use opschat_core::AppResult;

/// Trait for ranked document search backends.
///
/// Implementations return results in the backend's descending-relevance
/// order and never carry more entries than `query.limit`. A structurally
/// valid but empty backend response is an empty `Vec`, not an error.
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Get the provider name (e.g., "http").
    fn provider_name(&self) -> &str;

    /// Run one ranked search against the backend.
    ///
    /// # Errors
    /// Returns an error on connectivity failures, non-success HTTP status,
    /// or an unparseable payload. Callers are expected to recover locally
    /// (empty result set plus a user-visible notice) rather than abort.
    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchResult>>;
}
