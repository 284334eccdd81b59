//! Search integration crate for opschat.
//!
//! This crate provides a backend-agnostic abstraction for querying a ranked
//! document search service. The backend itself (index construction, ranking,
//! scoring) is an opaque collaborator; this crate only shapes requests and
//! normalizes responses.
//!
//! # Example
//! ```no_run
//! use opschat_search::{HttpSearchClient, SearchClient, SearchQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpSearchClient::new("http://localhost:8080", "operations_docs");
//! let query = SearchQuery::new("site monitoring requirements", 5)?;
//! let results = client.search(&query).await?;
//! println!("{} documents", results.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::SearchClient;
pub use providers::HttpSearchClient;
pub use types::{SearchQuery, SearchResult};
