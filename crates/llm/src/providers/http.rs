//! HTTP generation backend implementation.
//!
//! Issues a JSON POST against `<base>/api/complete`. The wire contract:
//!
//! request:  `{ "model_identifier": "...", "prompt_text": "..." }`
//! response: `{ "text": "..." }` or a bare JSON string
//!
//! The prompt is embedded in a JSON body, so quote characters and other
//! transport-hostile input are escaped by serialization.

use crate::client::{
    GenerationClient, GenerationRequest, GenerationResponse, EMPTY_RESPONSE_FALLBACK,
};
use opschat_core::{AppError, AppResult};
use serde::Serialize;

/// Generation API request format.
#[derive(Debug, Serialize)]
struct CompleteRequest<'a> {
    model_identifier: &'a str,
    prompt_text: &'a str,
}

/// HTTP generation client.
pub struct HttpGenerationClient {
    /// Base URL for the generation backend
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpGenerationClient {
    /// Create a new client for the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Pull the answer text out of the backend payload.
    ///
    /// Accepts either `{ "text": "..." }` or a backend-native bare string.
    fn extract_text(payload: &serde_json::Value) -> Option<String> {
        match payload {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .get("text")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl GenerationClient for HttpGenerationClient {
    fn provider_name(&self) -> &str {
        "http"
    }

    async fn complete(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        tracing::info!(model = %request.model, "Sending generation request");

        let complete_request = CompleteRequest {
            model_identifier: &request.model,
            prompt_text: &request.prompt,
        };
        let url = format!("{}/api/complete", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&complete_request)
            .send()
            .await
            .map_err(|e| {
                AppError::Generation(format!("Failed to reach generation backend: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Generation(format!(
                "Generation backend error ({}): {}",
                status, error_text
            )));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            AppError::Generation(format!("Failed to parse generation response: {}", e))
        })?;

        let text = match Self::extract_text(&payload) {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                tracing::warn!("Generation backend returned an empty response");
                EMPTY_RESPONSE_FALLBACK.to_string()
            }
        };

        tracing::debug!(chars = text.len(), "Received generated answer");

        Ok(GenerationResponse {
            text,
            model: request.model.clone(),
        })
    }
}
