//! Command handlers for the opschat CLI.

pub mod ask;
pub mod chat;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;

use opschat_chat::ChatEngine;
use opschat_core::{config::AppConfig, AppError, AppResult};
use opschat_search::HttpSearchClient;
use std::sync::Arc;

/// Wire the configured backends into a chat engine.
pub(crate) fn build_engine(config: &AppConfig) -> AppResult<ChatEngine> {
    let search = Arc::new(HttpSearchClient::new(
        config.search_endpoint.as_str(),
        config.search_index.as_str(),
    ));

    let generation = opschat_llm::create_client("http", &config.generation_endpoint)
        .map_err(AppError::Config)?;

    Ok(ChatEngine::new(search, generation, config.model.as_str()))
}
