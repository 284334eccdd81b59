//! Generation client abstraction and request/response types.

use opschat_core::AppResult;
use serde::{Deserialize, Serialize};

/// Fixed answer substituted when the backend replies with nothing usable.
pub const EMPTY_RESPONSE_FALLBACK: &str =
    "I apologize, but I couldn't generate a response at this time.";

/// Fixed answer substituted by callers when the backend call itself fails.
pub const GENERATION_ERROR_FALLBACK: &str =
    "I encountered an error while processing your request.";

/// Generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The fully assembled prompt text
    pub prompt: String,

    /// Model identifier (e.g., "llama3.1-8b")
    pub model: String,
}

impl GenerationRequest {
    /// Create a new generation request.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
        }
    }
}

/// Generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated answer text
    pub text: String,

    /// Model that produced the answer
    pub model: String,
}

/// Trait for generation backends.
///
/// Implementations send one request per call, with no retry and no timeout
/// configuration beyond the transport default. An empty or whitespace-only
/// backend reply is normalized to [`EMPTY_RESPONSE_FALLBACK`] and returned
/// as success; only transport-level faults surface as errors.
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// Get the provider name (e.g., "http").
    fn provider_name(&self) -> &str;

    /// Perform a prompt-to-text completion.
    async fn complete(&self, request: &GenerationRequest) -> AppResult<GenerationResponse>;
}
