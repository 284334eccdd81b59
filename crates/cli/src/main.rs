//! Opschat CLI
//!
//! Main entry point for the opschat command-line tool: a retrieval-augmented
//! chat over an operations document index, with answers generated from the
//! retrieved context.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand};
use opschat_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Opschat CLI - chat with your operations documents
#[derive(Parser, Debug)]
#[command(name = "opschat")]
#[command(about = "Retrieval-augmented chat over operations documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "OPSCHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Search backend base URL
    #[arg(long, global = true, env = "OPSCHAT_SEARCH_ENDPOINT")]
    search_endpoint: Option<String>,

    /// Generation backend base URL
    #[arg(long, global = true, env = "OPSCHAT_GENERATION_ENDPOINT")]
    generation_endpoint: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "OPSCHAT_MODEL")]
    model: Option<String>,

    /// Number of documents to retrieve per query (1-10)
    #[arg(short, long, global = true)]
    limit: Option<u32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive chat session
    Chat(ChatCommand),

    /// Ask a single question and exit
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.search_endpoint,
        cli.generation_endpoint,
        cli.model,
        cli.limit,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Opschat CLI starting");
    tracing::debug!("Search endpoint: {}", config.search_endpoint);
    tracing::debug!("Generation endpoint: {}", config.generation_endpoint);
    tracing::debug!("Model: {}", config.model);

    // Route to command handlers
    let result = match cli.command {
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
