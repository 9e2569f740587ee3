//! Retrieval-augmented question answering over the course corpus.
//!
//! [`RagSystem`] wires the retrieval store, the tool registry, the agent,
//! and session history into a single query pipeline.

use crate::agent::Agent;
use crate::config::Settings;
use crate::error::Result;
use crate::llm::ModelClient;
use crate::session::SessionManager;
use crate::store::RetrievalStore;
use crate::tools::{OutlineTool, SearchTool, SourceAttribution, ToolRegistry};
use std::sync::Arc;
use tracing::debug;

/// An answer together with the sources that informed it.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Provenance of the retrieved content the answer drew on.
    pub sources: Vec<SourceAttribution>,
}

/// Question-answering pipeline over a course corpus.
///
/// One registry serves one query at a time: `query` holds an internal
/// lock for its full duration so the attribution buffer is drained and
/// cleared by exactly one caller. For parallel queries, create one
/// `RagSystem` per in-flight query.
pub struct RagSystem {
    agent: Agent,
    registry: ToolRegistry,
    sessions: SessionManager,
    query_lock: tokio::sync::Mutex<()>,
}

impl RagSystem {
    /// Assemble the pipeline: both retrieval tools over the store, the
    /// agent over the model client, sessions per the settings.
    pub fn new(
        client: Arc<dyn ModelClient>,
        store: Arc<dyn RetrievalStore>,
        settings: &Settings,
    ) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SearchTool::new(store.clone())));
        registry.register(Arc::new(OutlineTool::new(store)));

        Self {
            agent: Agent::new(client).with_max_rounds(settings.model.max_rounds),
            registry,
            sessions: SessionManager::new(settings.session.max_history),
            query_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Start a new conversation session.
    pub fn create_session(&self) -> String {
        self.sessions.create_session()
    }

    /// Forget a session's history.
    pub fn clear_session(&self, session_id: &str) {
        self.sessions.clear_session(session_id);
    }

    /// Answer a question, optionally within a session.
    pub async fn query(&self, question: &str, session_id: Option<&str>) -> Result<RagResponse> {
        let _guard = self.query_lock.lock().await;

        let prompt = format!("Answer this question about course materials: {}", question);
        let history = session_id.and_then(|id| self.sessions.get_history(id));

        let answer = match self
            .agent
            .respond(&prompt, history.as_deref(), Some(&self.registry))
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                // Leave no attributions behind for the next query.
                self.registry.clear_sources();
                return Err(e);
            }
        };

        let sources = self.registry.drain_sources();
        self.registry.clear_sources();

        if let Some(id) = session_id {
            self.sessions.add_exchange(id, question, &answer);
        }

        debug!(sources = sources.len(), "Query answered");
        Ok(RagResponse { answer, sources })
    }
}
