//! Conversation orchestration.
//!
//! Drives one full turn: receive question -> record it -> search ->
//! format context -> build prompt -> generate -> record answer -> render.
//! Conceptual phases per turn: Idle -> AwaitingSearch -> AwaitingGeneration
//! -> Rendered, processed strictly in sequence; the next input is not
//! accepted until the previous turn has rendered.
//!
//! Both backend calls are fail-soft: a search fault degrades to an empty
//! result set, a generation fault to a fixed fallback answer, each paired
//! with a [`Notice`] for the hosting shell. The user's question is recorded
//! before retrieval starts, so a failed turn never loses what was asked.

use crate::format::{format_for_context, format_for_display};
use crate::notice::Notice;
use crate::prompt::build_prompt;
use crate::session::ChatSession;
use opschat_core::{AppError, AppResult};
use opschat_llm::{GenerationClient, GenerationRequest, GENERATION_ERROR_FALLBACK};
use opschat_search::{SearchClient, SearchQuery, SearchResult};
use std::sync::Arc;

/// Render instructions for one completed turn.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RenderedTurn {
    /// The assistant's answer text
    pub answer: String,

    /// Sources panel, display-formatted from the same ranked result set
    /// that fed the prompt context
    pub sources: String,

    /// Non-fatal backend notices collected during the turn
    pub notices: Vec<Notice>,
}

/// The per-turn pipeline over a search backend and a generation backend.
///
/// Holds no session state; callers own a [`ChatSession`] and pass it into
/// each turn by mutable reference.
pub struct ChatEngine {
    search: Arc<dyn SearchClient>,
    generation: Arc<dyn GenerationClient>,
    model: String,
}

impl ChatEngine {
    /// Create an engine over the given backends.
    pub fn new(
        search: Arc<dyn SearchClient>,
        generation: Arc<dyn GenerationClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            search,
            generation,
            model: model.into(),
        }
    }

    /// Process one conversation turn.
    ///
    /// Appends exactly one user turn and one assistant turn to the session
    /// transcript. Backend faults never escape; they degrade to defaults
    /// plus notices in the returned [`RenderedTurn`].
    ///
    /// # Errors
    /// `AppError::EmptyInput` for a blank submission (nothing is recorded),
    /// `AppError::Prompt` if template rendering itself fails.
    pub async fn run_turn(
        &self,
        session: &mut ChatSession,
        input: &str,
    ) -> AppResult<RenderedTurn> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AppError::EmptyInput);
        }

        tracing::info!(limit = session.limit(), "Starting turn");

        // Record the question before any backend work so the transcript
        // stays accurate even when the rest of the turn degrades.
        session.transcript.push_user(input);

        let mut notices = Vec::new();

        let (results, search_notice) = self.retrieve(input, session.limit()).await;
        if let Some(notice) = search_notice {
            notices.push(notice);
        }

        let context = format_for_context(&results);
        let prompt = build_prompt(input, &context)?;

        let (answer, generation_notice) = self.generate(&prompt).await;
        if let Some(notice) = generation_notice {
            notices.push(notice);
        }

        session.transcript.push_assistant(answer.as_str());

        tracing::info!(
            results = results.len(),
            notices = notices.len(),
            transcript_len = session.transcript.len(),
            "Turn rendered"
        );

        Ok(RenderedTurn {
            answer,
            sources: format_for_display(&results),
            notices,
        })
    }

    /// Fail-soft search: a backend fault becomes an empty result set plus
    /// a notice, so one failed retrieval never aborts the turn.
    async fn retrieve(&self, input: &str, limit: u32) -> (Vec<SearchResult>, Option<Notice>) {
        let query = match SearchQuery::new(input, limit) {
            Ok(query) => query,
            Err(e) => {
                // Input and limit are validated upstream; treat a rejection
                // here the same as a backend fault.
                tracing::error!("Rejected search query: {}", e);
                return (Vec::new(), Some(Notice::retrieval(format!(
                    "Error searching documents: {}",
                    e
                ))));
            }
        };

        match self.search.search(&query).await {
            Ok(results) => (results, None),
            Err(e) => {
                tracing::error!("Search backend fault: {}", e);
                (
                    Vec::new(),
                    Some(Notice::retrieval(format!("Error searching documents: {}", e))),
                )
            }
        }
    }

    /// Fail-soft generation: a backend fault becomes the fixed error
    /// fallback answer plus a notice. An empty backend reply is already
    /// normalized to its own fallback inside the client.
    async fn generate(&self, prompt: &str) -> (String, Option<Notice>) {
        let request = GenerationRequest::new(prompt, self.model.as_str());

        match self.generation.complete(&request).await {
            Ok(response) => (response.text, None),
            Err(e) => {
                tracing::error!("Generation backend fault: {}", e);
                (
                    GENERATION_ERROR_FALLBACK.to_string(),
                    Some(Notice::generation(format!(
                        "Error generating response: {}",
                        e
                    ))),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NO_RESULTS_MESSAGE;
    use crate::notice::NoticeKind;
    use crate::transcript::Role;
    use opschat_llm::GenerationResponse;
    use std::sync::Mutex;

    /// Search backend returning a fixed result list, recording the limit
    /// each outbound request carried.
    struct StaticSearch {
        results: Vec<SearchResult>,
        seen_limits: Mutex<Vec<u32>>,
    }

    impl StaticSearch {
        fn new(results: Vec<SearchResult>) -> Self {
            Self {
                results,
                seen_limits: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self::new(Vec::new())
        }
    }

    #[async_trait::async_trait]
    impl SearchClient for StaticSearch {
        fn provider_name(&self) -> &str {
            "static"
        }

        async fn search(&self, query: &SearchQuery) -> AppResult<Vec<SearchResult>> {
            self.seen_limits.lock().unwrap().push(query.limit);
            Ok(self.results.clone())
        }
    }

    /// Search backend that always faults.
    struct FailingSearch;

    #[async_trait::async_trait]
    impl SearchClient for FailingSearch {
        fn provider_name(&self) -> &str {
            "failing"
        }

        async fn search(&self, _query: &SearchQuery) -> AppResult<Vec<SearchResult>> {
            Err(AppError::Search("connection refused".to_string()))
        }
    }

    /// Generation backend echoing the prompt it received.
    struct RecordingGeneration {
        seen_prompts: Mutex<Vec<String>>,
    }

    impl RecordingGeneration {
        fn new() -> Self {
            Self {
                seen_prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl GenerationClient for RecordingGeneration {
        fn provider_name(&self) -> &str {
            "recording"
        }

        async fn complete(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
            self.seen_prompts.lock().unwrap().push(request.prompt.clone());
            Ok(GenerationResponse {
                text: "Monitoring visits occur per the SOP.".to_string(),
                model: request.model.clone(),
            })
        }
    }

    /// Generation backend that always faults.
    struct FailingGeneration;

    #[async_trait::async_trait]
    impl GenerationClient for FailingGeneration {
        fn provider_name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _request: &GenerationRequest) -> AppResult<GenerationResponse> {
            Err(AppError::Generation("backend exploded".to_string()))
        }
    }

    fn monitoring_results() -> Vec<SearchResult> {
        vec![
            SearchResult {
                title: Some("Monitoring SOP v3".to_string()),
                content: "Sites are monitored on a quarterly cadence.".to_string(),
                score: 0.91,
            },
            SearchResult {
                title: Some("Site Visit Checklist".to_string()),
                content: "Checklist for interim monitoring visits.".to_string(),
                score: 0.77,
            },
        ]
    }

    #[tokio::test]
    async fn test_happy_path_turn() {
        let search = Arc::new(StaticSearch::new(monitoring_results()));
        let generation = Arc::new(RecordingGeneration::new());
        let engine = ChatEngine::new(search.clone(), generation.clone(), "llama3.1-8b");
        let mut session = ChatSession::default();

        let turn = engine
            .run_turn(&mut session, "What are the site monitoring requirements?")
            .await
            .unwrap();

        // Source panel lists both results with two-decimal scores
        assert!(turn.sources.contains("Monitoring SOP v3"));
        assert!(turn.sources.contains("0.91"));
        assert!(turn.sources.contains("Site Visit Checklist"));
        assert!(turn.sources.contains("0.77"));
        assert!(turn.notices.is_empty());

        // Prompt context carried both titles and their content
        let prompts = generation.seen_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Document: Monitoring SOP v3"));
        assert!(prompts[0].contains("Document: Site Visit Checklist"));
        assert!(prompts[0].contains("quarterly cadence"));

        // Transcript grew by exactly one exchange
        assert_eq!(session.transcript.len(), 2);
        let roles: Vec<Role> = session.transcript.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn test_zero_results_still_generates() {
        let search = Arc::new(StaticSearch::empty());
        let generation = Arc::new(RecordingGeneration::new());
        let engine = ChatEngine::new(search, generation.clone(), "llama3.1-8b");
        let mut session = ChatSession::default();

        let turn = engine.run_turn(&mut session, "abc").await.unwrap();

        assert_eq!(turn.sources, NO_RESULTS_MESSAGE);
        assert!(turn.notices.is_empty());

        // The generation backend was still invoked, with an empty context
        let prompts = generation.seen_prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("CONTEXT FROM CRO OPERATIONS DOCUMENTS:\n\n"));

        assert_eq!(session.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_search_fault_degrades_to_empty_context() {
        let search = Arc::new(FailingSearch);
        let generation = Arc::new(RecordingGeneration::new());
        let engine = ChatEngine::new(search, generation.clone(), "llama3.1-8b");
        let mut session = ChatSession::default();

        let turn = engine.run_turn(&mut session, "anything").await.unwrap();

        assert_eq!(turn.notices.len(), 1);
        assert_eq!(turn.notices[0].kind, NoticeKind::Retrieval);
        assert!(turn.notices[0].message.contains("connection refused"));
        assert_eq!(turn.sources, NO_RESULTS_MESSAGE);

        // Turn still completed: generation ran, both sides were recorded
        assert_eq!(generation.seen_prompts.lock().unwrap().len(), 1);
        assert_eq!(session.transcript.len(), 2);
    }

    #[tokio::test]
    async fn test_generation_fault_substitutes_fallback() {
        let search = Arc::new(StaticSearch::new(monitoring_results()));
        let generation = Arc::new(FailingGeneration);
        let engine = ChatEngine::new(search, generation, "llama3.1-8b");
        let mut session = ChatSession::default();

        let turn = engine.run_turn(&mut session, "anything").await.unwrap();

        assert_eq!(turn.answer, GENERATION_ERROR_FALLBACK);
        assert_eq!(turn.notices.len(), 1);
        assert_eq!(turn.notices[0].kind, NoticeKind::Generation);

        // The fallback answer is what lands in the transcript
        assert_eq!(session.transcript.len(), 2);
        let last = session.transcript.iter().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, GENERATION_ERROR_FALLBACK);
    }

    #[tokio::test]
    async fn test_blank_input_records_nothing() {
        let search = Arc::new(StaticSearch::empty());
        let generation = Arc::new(RecordingGeneration::new());
        let engine = ChatEngine::new(search, generation.clone(), "llama3.1-8b");
        let mut session = ChatSession::default();

        let result = engine.run_turn(&mut session, "   ").await;
        assert!(matches!(result, Err(AppError::EmptyInput)));
        assert!(session.transcript.is_empty());
        assert!(generation.seen_prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_outbound_limit_is_carried_exactly() {
        let search = Arc::new(StaticSearch::empty());
        let generation = Arc::new(RecordingGeneration::new());
        let engine = ChatEngine::new(search.clone(), generation, "llama3.1-8b");
        let mut session = ChatSession::new(10).unwrap();

        engine.run_turn(&mut session, "query").await.unwrap();

        let limits = search.seen_limits.lock().unwrap();
        assert_eq!(limits.as_slice(), &[10]);
    }

    #[tokio::test]
    async fn test_clear_history_mid_session() {
        let search = Arc::new(StaticSearch::new(monitoring_results()));
        let generation = Arc::new(RecordingGeneration::new());
        let engine = ChatEngine::new(search, generation, "llama3.1-8b");
        let mut session = ChatSession::default();

        engine.run_turn(&mut session, "first question").await.unwrap();
        assert_eq!(session.transcript.len(), 2);

        session.clear_history();
        assert_eq!(session.transcript.len(), 0);

        // Next turn starts fresh
        engine.run_turn(&mut session, "second question").await.unwrap();
        assert_eq!(session.transcript.len(), 2);
        assert_eq!(
            session.transcript.iter().next().unwrap().content,
            "second question"
        );
    }
}
