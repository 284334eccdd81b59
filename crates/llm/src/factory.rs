//! Generation provider factory.
//!
//! This module creates generation clients based on application
//! configuration, keeping the orchestrator independent of the concrete
//! backend implementation.

use crate::client::GenerationClient;
use crate::providers::HttpGenerationClient;
use std::sync::Arc;

/// Create a generation client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier (currently only "http")
/// * `endpoint` - Backend base URL
///
/// # Errors
/// Returns an error message if the provider is unknown.
pub fn create_client(provider: &str, endpoint: &str) -> Result<Arc<dyn GenerationClient>, String> {
    match provider.to_lowercase().as_str() {
        "http" => {
            let client = HttpGenerationClient::new(endpoint);
            Ok(Arc::new(client))
        }
        _ => Err(format!("Unknown generation provider: {}", provider)),
    }
}
