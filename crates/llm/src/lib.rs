//! Generation backend integration crate for opschat.
//!
//! This crate provides a provider-agnostic abstraction for turning a fully
//! assembled prompt into answer text. The backend itself (model weights,
//! decoding) is an opaque collaborator; no decoding parameters are exposed
//! to callers beyond the fixed model identifier.
//!
//! # Example
//! ```no_run
//! use opschat_llm::{GenerationClient, GenerationRequest, providers::HttpGenerationClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpGenerationClient::new("http://localhost:8080");
//! let request = GenerationRequest::new("Summarize the SOP.", "llama3.1-8b");
//! let response = client.complete(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{
    GenerationClient, GenerationRequest, GenerationResponse, EMPTY_RESPONSE_FALLBACK,
    GENERATION_ERROR_FALLBACK,
};
pub use factory::create_client;
pub use providers::HttpGenerationClient;
