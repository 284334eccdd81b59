//! Search request and result types.

use opschat_core::config::{MAX_SEARCH_LIMIT, MIN_SEARCH_LIMIT};
use opschat_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Fallback title for documents the backend returns without one.
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

/// A single ranked document returned by the search backend.
///
/// Results carry no identity beyond their position in the containing
/// list; the backend's descending-relevance order is preserved as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Document title, if the backend supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Full document content (never truncated at this layer)
    #[serde(default)]
    pub content: String,

    /// Relevance score as supplied by the backend
    #[serde(default)]
    pub score: f64,
}

impl SearchResult {
    /// Document title, defaulting to "Untitled Document".
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED_DOCUMENT)
    }
}

/// An ephemeral per-turn search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Natural-language query text
    pub text: String,

    /// Maximum number of results, always within [1, 10]
    pub limit: u32,
}

impl SearchQuery {
    /// Create a validated query.
    ///
    /// # Errors
    /// Returns `AppError::Search` if `text` is blank or `limit` falls
    /// outside the accepted range.
    pub fn new(text: impl Into<String>, limit: u32) -> AppResult<Self> {
        let text = text.into();

        if text.trim().is_empty() {
            return Err(AppError::Search("Query text must not be blank".to_string()));
        }

        if !(MIN_SEARCH_LIMIT..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(AppError::Search(format!(
                "Result limit {} is outside the accepted range [{}, {}]",
                limit, MIN_SEARCH_LIMIT, MAX_SEARCH_LIMIT
            )));
        }

        Ok(Self { text, limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_or_default() {
        let titled = SearchResult {
            title: Some("Monitoring SOP v3".to_string()),
            content: "...".to_string(),
            score: 0.91,
        };
        assert_eq!(titled.title_or_default(), "Monitoring SOP v3");

        let untitled = SearchResult {
            title: None,
            content: "...".to_string(),
            score: 0.5,
        };
        assert_eq!(untitled.title_or_default(), UNTITLED_DOCUMENT);
    }

    #[test]
    fn test_query_validation() {
        assert!(SearchQuery::new("monitoring", 1).is_ok());
        assert!(SearchQuery::new("monitoring", 10).is_ok());
        assert!(SearchQuery::new("monitoring", 0).is_err());
        assert!(SearchQuery::new("monitoring", 11).is_err());
        assert!(SearchQuery::new("   ", 5).is_err());
    }

    #[test]
    fn test_result_deserialization_defaults() {
        // Backend may omit title, content, or score per-entry
        let result: SearchResult = serde_json::from_str(r#"{"score": 0.4}"#).unwrap();
        assert!(result.title.is_none());
        assert_eq!(result.content, "");
        assert_eq!(result.score, 0.4);
    }
}
