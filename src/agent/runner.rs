//! Agent with a bounded tool-calling round loop.
//!
//! A round is one cycle of tool-call request, dispatch, result turn, and
//! the next model call. The loop is a small state machine: the round cap
//! is a transition guard, so a query can never cost more than
//! `max_rounds + 1` model calls no matter how persistently the model
//! keeps requesting tools.

use crate::error::Result;
use crate::llm::{CompletionRequest, ContentBlock, Message, ModelClient, ModelReply, StopReason};
use crate::tools::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default behavioral policy sent as the system instruction.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are an assistant specialized in course materials, with retrieval tools for course information.

Tool usage:
- Use 'get_course_outline' for questions about course structure: lesson lists, course overviews, what a course covers.
- Use 'search_course_content' for questions about specific course content or detailed educational materials.
- You may use up to 2 tool calls in separate steps when needed, for example fetching a course outline first and then searching the content of a specific lesson.
- If a tool yields no results, state this clearly without offering alternatives.

Response protocol:
- Answer general-knowledge questions from your own knowledge without using tools.
- Provide direct answers only. Do not describe your reasoning process, tool usage, or question analysis.
- Keep answers brief, clear, and educational, with examples when they aid understanding."#;

/// Default number of tool rounds allowed per query.
const DEFAULT_MAX_ROUNDS: usize = 2;

/// State of the round loop for one query.
enum RoundState {
    /// Waiting for the next model reply.
    AwaitingModel,
    /// The reply requested tools that still need dispatching.
    DispatchingTools(ModelReply),
    /// The reply terminates the query.
    Done(ModelReply),
}

/// Drives a model through zero or more retrieval-tool rounds to a final
/// text answer.
pub struct Agent {
    client: Arc<dyn ModelClient>,
    system_prompt: String,
    max_rounds: usize,
}

impl Agent {
    /// Create an agent with the default policy and round cap.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set the maximum number of tool rounds per query.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Answer a query, optionally with prior-conversation context and a
    /// tool registry the model may call into.
    ///
    /// `history` is treated as an inert text blob appended to the system
    /// instruction. Tool failures feed back to the model as result text;
    /// only model-client failures abort the query.
    pub async fn respond(
        &self,
        query: &str,
        history: Option<&str>,
        tools: Option<&ToolRegistry>,
    ) -> Result<String> {
        info!(query = %query, "Answering query");

        let system = match history {
            Some(history) => format!(
                "{}\n\nPrevious conversation:\n{}",
                self.system_prompt, history
            ),
            None => self.system_prompt.clone(),
        };

        let specs = tools.map(|r| r.specs()).unwrap_or_default();
        let mut messages = vec![Message::user(query)];
        let mut rounds_completed = 0;

        let mut state = RoundState::AwaitingModel;
        let reply = loop {
            state = match state {
                RoundState::AwaitingModel => {
                    debug!(
                        round = rounds_completed,
                        messages = messages.len(),
                        "Requesting completion"
                    );
                    let reply = self
                        .client
                        .complete(CompletionRequest {
                            system: system.clone(),
                            messages: messages.clone(),
                            tools: specs.clone(),
                        })
                        .await?;
                    self.classify(reply, rounds_completed, tools.is_some())
                }

                RoundState::DispatchingTools(reply) => {
                    let Some(registry) = tools else {
                        // classify() never routes here without a registry.
                        break reply;
                    };

                    let mut result_blocks = Vec::new();
                    for block in &reply.content {
                        if let ContentBlock::ToolUse { id, name, input } = block {
                            debug!(tool = %name, id = %id, "Dispatching tool call");
                            let outcome = registry.dispatch(name, input).await;
                            result_blocks.push(ContentBlock::tool_result(
                                id.clone(),
                                outcome.content,
                                outcome.is_error,
                            ));
                        }
                    }

                    // One assistant turn with the requests, one user turn
                    // aggregating every result from this round, ids intact.
                    messages.push(Message::assistant_blocks(reply.content));
                    messages.push(Message::user_blocks(result_blocks));
                    rounds_completed += 1;
                    RoundState::AwaitingModel
                }

                RoundState::Done(reply) => break reply,
            };
        };

        match reply.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!("Terminating reply contained no text block");
                Ok(String::new())
            }
        }
    }

    /// Decide where a fresh reply sends the loop.
    fn classify(&self, reply: ModelReply, rounds_completed: usize, have_tools: bool) -> RoundState {
        if reply.stop_reason != StopReason::ToolUse {
            return RoundState::Done(reply);
        }
        if !have_tools {
            warn!("Model stopped for tool use but no tools were supplied");
            return RoundState::Done(reply);
        }
        if reply.tool_uses().next().is_none() {
            warn!("Model stopped for tool use but sent no tool-call blocks");
            return RoundState::Done(reply);
        }
        if rounds_completed >= self.max_rounds {
            debug!(
                rounds = rounds_completed,
                "Round limit reached; leaving remaining tool calls unexecuted"
            );
            return RoundState::Done(reply);
        }
        RoundState::DispatchingTools(reply)
    }
}
