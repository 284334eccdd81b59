//! Chat command handler.
//!
//! Interactive REPL over the conversation pipeline. The session transcript
//! lives in memory for the duration of the process; one turn is fully
//! rendered before the next input is read.

use clap::Args;
use opschat_chat::{ChatSession, Role};
use opschat_core::{config::AppConfig, AppError, AppResult};
use std::io::{BufRead, Write};

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Skip printing the sources panel after each answer
    #[arg(long)]
    pub no_sources: bool,
}

const HELP_TEXT: &str = "\
Commands:
  /help       Show this help
  /history    Print the conversation so far
  /limit N    Set the number of documents to retrieve (1-10)
  /clear      Clear the conversation history
  /quit       Exit

Example questions:
  What are the site monitoring requirements?
  How do we handle protocol deviations?
  What are the data quality standards?
  What are the GCP requirements for site management?
  How do we prepare for regulatory inspections?
";

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting interactive chat");

        let engine = super::build_engine(config)?;
        let mut session = ChatSession::new(config.search_limit)?;

        println!("🔍 Operations Document Chat");
        println!("Ask about operational procedures, SOPs, or monitoring guidelines.");
        println!("Type /help for commands.\n");

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("you> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next() else {
                // EOF ends the session
                println!();
                break;
            };
            let line = line?;
            let input = line.trim();

            if input.is_empty() {
                continue;
            }

            if let Some(command) = input.strip_prefix('/') {
                if self.handle_command(command, &mut session)? {
                    break;
                }
                continue;
            }

            match engine.run_turn(&mut session, input).await {
                Ok(turn) => {
                    for notice in &turn.notices {
                        tracing::warn!("{}", notice.message);
                        eprintln!("⚠ {}", notice.message);
                    }

                    println!("\nassistant> {}\n", turn.answer);

                    if !self.no_sources {
                        println!("📖 Source Documents\n");
                        println!("{}", turn.sources);
                    }
                }
                Err(AppError::EmptyInput) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    /// Handle a slash command. Returns true when the session should end.
    fn handle_command(&self, command: &str, session: &mut ChatSession) -> AppResult<bool> {
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or("");

        match name {
            "quit" | "exit" => return Ok(true),
            "help" => println!("{}", HELP_TEXT),
            "clear" => {
                session.clear_history();
                println!("History cleared.");
            }
            "history" => {
                if session.transcript.is_empty() {
                    println!("No conversation yet.");
                } else {
                    for turn in session.transcript.iter() {
                        let label = match turn.role {
                            Role::User => "you",
                            Role::Assistant => "assistant",
                        };
                        println!("{}> {}\n", label, turn.content);
                    }
                }
            }
            "limit" => match parts.next().map(str::parse::<u32>) {
                Some(Ok(limit)) => match session.set_limit(limit) {
                    Ok(()) => println!("Search limit set to {}.", limit),
                    Err(e) => eprintln!("⚠ {}", e),
                },
                _ => eprintln!("⚠ Usage: /limit N (1-10)"),
            },
            _ => eprintln!("⚠ Unknown command: /{}. Type /help for commands.", name),
        }

        Ok(false)
    }
}
