//! Configuration management for the opschat CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (opschat.yaml)
//!
//! The configuration covers the two backend endpoints (search and
//! generation), the fixed model identifier, and the default search limit.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default number of documents retrieved per query.
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

/// Lowest accepted search limit.
pub const MIN_SEARCH_LIMIT: u32 = 1;

/// Highest accepted search limit. The search client never expands past this.
pub const MAX_SEARCH_LIMIT: u32 = 10;

/// Default model identifier for the generation backend.
pub const DEFAULT_MODEL: &str = "llama3.1-8b";

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Base URL of the search backend
    pub search_endpoint: String,

    /// Identifier of the document index to query
    pub search_index: String,

    /// Base URL of the generation backend
    pub generation_endpoint: String,

    /// Model identifier sent with every generation request
    pub model: String,

    /// Default number of documents to retrieve per query
    pub search_limit: u32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    search: Option<SearchConfig>,
    generation: Option<GenerationConfig>,
    chat: Option<ChatConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchConfig {
    endpoint: Option<String>,
    index: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenerationConfig {
    endpoint: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatConfig {
    limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            search_endpoint: "http://localhost:8080".to_string(),
            search_index: "operations_docs".to_string(),
            generation_endpoint: "http://localhost:8080".to_string(),
            model: DEFAULT_MODEL.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `OPSCHAT_CONFIG`: Path to config file
    /// - `OPSCHAT_SEARCH_ENDPOINT`: Search backend base URL
    /// - `OPSCHAT_SEARCH_INDEX`: Document index identifier
    /// - `OPSCHAT_GENERATION_ENDPOINT`: Generation backend base URL
    /// - `OPSCHAT_MODEL`: Model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("OPSCHAT_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if one is present
        if let Some(config_path) = config.config_file.clone() {
            if !config_path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    config_path
                )));
            }
            config = config.merge_yaml(&config_path)?;
        } else {
            let default_path = PathBuf::from("opschat.yaml");
            if default_path.exists() {
                config = config.merge_yaml(&default_path)?;
            }
        }

        // Environment variables override YAML config
        if let Ok(endpoint) = std::env::var("OPSCHAT_SEARCH_ENDPOINT") {
            config.search_endpoint = endpoint;
        }

        if let Ok(index) = std::env::var("OPSCHAT_SEARCH_INDEX") {
            config.search_index = index;
        }

        if let Ok(endpoint) = std::env::var("OPSCHAT_GENERATION_ENDPOINT") {
            config.generation_endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("OPSCHAT_MODEL") {
            config.model = model;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(search) = config_file.search {
            if let Some(endpoint) = search.endpoint {
                result.search_endpoint = endpoint;
            }
            if let Some(index) = search.index {
                result.search_index = index;
            }
        }

        if let Some(generation) = config_file.generation {
            if let Some(endpoint) = generation.endpoint {
                result.generation_endpoint = endpoint;
            }
            if let Some(model) = generation.model {
                result.model = model;
            }
        }

        if let Some(chat) = config_file.chat {
            if let Some(limit) = chat.limit {
                result.search_limit = limit;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        search_endpoint: Option<String>,
        generation_endpoint: Option<String>,
        model: Option<String>,
        limit: Option<u32>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(endpoint) = search_endpoint {
            self.search_endpoint = endpoint;
        }

        if let Some(endpoint) = generation_endpoint {
            self.generation_endpoint = endpoint;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(limit) = limit {
            self.search_limit = limit;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate the final configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.search_endpoint.trim().is_empty() {
            return Err(AppError::Config(
                "Search endpoint must not be empty".to_string(),
            ));
        }

        if self.generation_endpoint.trim().is_empty() {
            return Err(AppError::Config(
                "Generation endpoint must not be empty".to_string(),
            ));
        }

        if self.search_index.trim().is_empty() {
            return Err(AppError::Config(
                "Search index identifier must not be empty".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model identifier must not be empty".to_string()));
        }

        if !(MIN_SEARCH_LIMIT..=MAX_SEARCH_LIMIT).contains(&self.search_limit) {
            return Err(AppError::Config(format!(
                "Search limit {} is outside the accepted range [{}, {}]",
                self.search_limit, MIN_SEARCH_LIMIT, MAX_SEARCH_LIMIT
            )));
        }

        Ok(())
    }
}
