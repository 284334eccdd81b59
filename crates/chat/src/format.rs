//! Result formatting.
//!
//! Two pure views over a ranked result list: a markdown sources panel shown
//! to the user, and a compact context block fed to the prompt builder. Both
//! truncate for presentation only; the underlying result content is never
//! mutated, so the two views can use different limits independently.

use opschat_search::SearchResult;
use std::fmt::Write;

/// Maximum entries shown in the sources panel.
pub const DISPLAY_TOP_K: usize = 3;

/// Maximum preview length (in chars) per sources-panel entry.
pub const DISPLAY_PREVIEW_CHARS: usize = 300;

/// Maximum entries used for prompt context.
pub const CONTEXT_TOP_K: usize = 2;

/// Maximum content length (in chars) per context entry.
pub const CONTEXT_CHARS: usize = 1000;

/// Fixed message shown when retrieval produced nothing.
pub const NO_RESULTS_MESSAGE: &str = "No relevant documents found for your query.";

/// Render a ranked result list as a markdown sources panel.
///
/// Shows up to [`DISPLAY_TOP_K`] entries with title, two-decimal relevance
/// score, and a content preview hard-truncated to [`DISPLAY_PREVIEW_CHARS`]
/// characters followed by an ellipsis marker. Returns
/// [`NO_RESULTS_MESSAGE`] for an empty list.
pub fn format_for_display(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut formatted = String::from("**📚 Found the following relevant documents:**\n\n");

    for (i, result) in results.iter().take(DISPLAY_TOP_K).enumerate() {
        let preview = preview(&result.content, DISPLAY_PREVIEW_CHARS);

        let _ = write!(
            formatted,
            "**{}. {}**\n*Relevance Score: {:.2}*\n\n{}\n\n---\n\n",
            i + 1,
            result.title_or_default(),
            result.score,
            preview
        );
    }

    formatted
}

/// Render a ranked result list as a prompt context block.
///
/// Uses up to [`CONTEXT_TOP_K`] entries, each clipped to [`CONTEXT_CHARS`]
/// characters, joined by blank lines. Returns an empty string for an empty
/// list; never shown directly to the user.
pub fn format_for_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .take(CONTEXT_TOP_K)
        .map(|result| {
            format!(
                "Document: {}\nContent: {}",
                result.title_or_default(),
                clip(&result.content, CONTEXT_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Truncate to `max_chars` characters, appending an ellipsis marker when
/// anything was cut. Char-based so multi-byte content stays valid.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// Truncate to `max_chars` characters with no marker.
fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
