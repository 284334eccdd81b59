//! Conversation pipeline for opschat.
//!
//! This crate holds the retrieval-augmented generation pipeline:
//! - Result formatting (sources panel and prompt context block)
//! - Prompt construction from a fixed instruction template
//! - The per-session conversation transcript
//! - The orchestrator that drives one full turn:
//!   search -> format -> prompt -> generate -> record -> render
//!
//! Backend faults never escape a turn. Each external call degrades to a
//! default value plus a user-visible [`Notice`], so a single backend hiccup
//! never loses the already-recorded question or ends the session.

pub mod format;
pub mod notice;
pub mod orchestrator;
pub mod prompt;
pub mod session;
pub mod transcript;

// Re-export main types
pub use format::{format_for_context, format_for_display, NO_RESULTS_MESSAGE};
pub use notice::{Notice, NoticeKind};
pub use orchestrator::{ChatEngine, RenderedTurn};
pub use prompt::build_prompt;
pub use session::ChatSession;
pub use transcript::{ConversationTurn, Role, Transcript};
