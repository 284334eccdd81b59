//! Chat session state.
//!
//! The session object owns everything that outlives a single turn: the
//! transcript and the configured search limit. It is created by the hosting
//! shell and passed by mutable reference into each turn, which keeps the
//! orchestrator free of hidden globals and trivially testable.

use crate::transcript::Transcript;
use opschat_core::config::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, MIN_SEARCH_LIMIT};
use opschat_core::{AppError, AppResult};

/// Per-session mutable state. One session never shares state with another.
#[derive(Debug, Clone)]
pub struct ChatSession {
    /// Running conversation transcript
    pub transcript: Transcript,

    /// Search limit for upcoming turns, always within [1, 10]
    limit: u32,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            transcript: Transcript::new(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl ChatSession {
    /// Create a fresh session with an empty transcript and a validated limit.
    pub fn new(limit: u32) -> AppResult<Self> {
        let mut session = Self::default();
        session.set_limit(limit)?;
        Ok(session)
    }

    /// Current search limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Update the search limit for upcoming turns.
    ///
    /// # Errors
    /// Returns `AppError::Config` if `limit` falls outside [1, 10].
    pub fn set_limit(&mut self, limit: u32) -> AppResult<()> {
        if !(MIN_SEARCH_LIMIT..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(AppError::Config(format!(
                "Search limit {} is outside the accepted range [{}, {}]",
                limit, MIN_SEARCH_LIMIT, MAX_SEARCH_LIMIT
            )));
        }

        self.limit = limit;
        Ok(())
    }

    /// Reset the transcript to empty. The next turn starts fresh.
    pub fn clear_history(&mut self) {
        self.transcript.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = ChatSession::new(5).unwrap();
        assert!(session.transcript.is_empty());
        assert_eq!(session.limit(), 5);
    }

    #[test]
    fn test_default_limit() {
        let session = ChatSession::default();
        assert_eq!(session.limit(), DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_limit_validation() {
        assert!(ChatSession::new(0).is_err());
        assert!(ChatSession::new(11).is_err());
        assert!(ChatSession::new(1).is_ok());
        assert!(ChatSession::new(10).is_ok());

        let mut session = ChatSession::default();
        assert!(session.set_limit(12).is_err());
        // Failed update leaves the previous limit in place
        assert_eq!(session.limit(), DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_clear_history() {
        let mut session = ChatSession::default();
        session.transcript.push_user("q");
        session.transcript.push_assistant("a");

        session.clear_history();
        assert!(session.transcript.is_empty());
        // Limit survives a history reset
        assert_eq!(session.limit(), DEFAULT_SEARCH_LIMIT);
    }
}
