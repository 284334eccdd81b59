//! HTTP search backend implementation.
//!
//! Issues a JSON POST against `<base>/api/search` and normalizes the ranked
//! response. The wire contract:
//!
//! request:  `{ "index_identifier": "...", "query_text": "...", "limit": 5 }`
//! response: `{ "results": [ { "title"?, "content", "score" }, ... ] }`
//!
//! An absent or empty `results` field is a valid empty response.

use crate::client::SearchClient;
use crate::types::{SearchQuery, SearchResult};
use opschat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Search API request format.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    index_identifier: &'a str,
    query_text: &'a str,
    limit: u32,
}

/// Search API response format.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// HTTP search client.
pub struct HttpSearchClient {
    /// Base URL for the search backend
    base_url: String,

    /// Identifier of the document index to query
    index: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpSearchClient {
    /// Create a new client for the given backend and index.
    pub fn new(base_url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            index: index.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SearchClient for HttpSearchClient {
    fn provider_name(&self) -> &str {
        "http"
    }

    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchResult>> {
        tracing::info!(
            index = %self.index,
            limit = query.limit,
            "Sending search request"
        );

        let request = SearchRequest {
            index_identifier: &self.index,
            query_text: &query.text,
            limit: query.limit,
        };
        let url = format!("{}/api/search", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Failed to reach search backend: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Search(format!(
                "Search backend error ({}): {}",
                status, error_text
            )));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Failed to parse search response: {}", e)))?;

        tracing::debug!(
            count = search_response.results.len(),
            "Received search results"
        );

        Ok(search_response.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpSearchClient::new("http://localhost:8080", "operations_docs");
        assert_eq!(client.provider_name(), "http");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.index, "operations_docs");
    }

    #[test]
    fn test_request_serialization() {
        let request = SearchRequest {
            index_identifier: "operations_docs",
            query_text: "site monitoring",
            limit: 10,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["index_identifier"], "operations_docs");
        assert_eq!(json["query_text"], "site monitoring");
        assert_eq!(json["limit"], 10);
    }

    #[test]
    fn test_response_missing_results_field() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_response_with_results() {
        let body = r#"{
            "results": [
                {"title": "Monitoring SOP v3", "content": "Visit cadence...", "score": 0.91},
                {"content": "Untitled body", "score": 0.4}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].title.as_deref(), Some("Monitoring SOP v3"));
        assert!(response.results[1].title.is_none());
    }
}
