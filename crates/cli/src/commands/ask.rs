//! Ask command handler.
//!
//! Runs a single retrieval-augmented turn and prints the answer with its
//! sources.

use clap::Args;
use opschat_chat::ChatSession;
use opschat_core::{config::AppConfig, AppResult};

/// Ask a single question and exit
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip printing the sources panel
    #[arg(long)]
    pub no_sources: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let engine = super::build_engine(config)?;
        let mut session = ChatSession::new(config.search_limit)?;

        let turn = engine.run_turn(&mut session, &self.question).await?;

        for notice in &turn.notices {
            tracing::warn!("{}", notice.message);
            eprintln!("⚠ {}", notice.message);
        }

        if self.json {
            let output = serde_json::json!({
                "question": self.question,
                "answer": turn.answer,
                "sources": turn.sources,
                "notices": turn.notices,
                "model": config.model,
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| opschat_core::AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", turn.answer);

            if !self.no_sources {
                println!("\n📖 Source Documents\n");
                println!("{}", turn.sources);
            }
        }

        Ok(())
    }
}
