//! Retrieval tools and the registry the model dispatches through.
//!
//! A tool is a named capability the model may invoke mid-conversation:
//! it advertises a [`ToolSpec`] and executes against JSON arguments,
//! returning result text plus any source attributions for content it
//! quoted. The [`ToolRegistry`] owns dispatch-by-name and the per-query
//! attribution buffer.

mod outline;
mod search;

pub use outline::OutlineTool;
pub use search::SearchTool;

use crate::error::Result;
use crate::llm::ToolSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// A provenance record shown to the end user alongside an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttribution {
    /// Human-readable label, e.g. `Introduction to MCP - Lesson 1`.
    pub label: String,
    /// Link to the attributed material, if known.
    pub link: Option<String>,
}

/// The value a tool execution produces: result text plus attributions.
///
/// Tools return sources per call instead of keeping them on instance
/// state, so nothing about a query lingers on the tool itself.
#[derive(Debug, Clone)]
pub struct ToolReply {
    pub content: String,
    pub sources: Vec<SourceAttribution>,
}

impl ToolReply {
    /// A reply with no attributions.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sources: Vec::new(),
        }
    }

    /// A reply carrying attributions.
    pub fn with_sources(content: impl Into<String>, sources: Vec<SourceAttribution>) -> Self {
        Self {
            content: content.into(),
            sources,
        }
    }
}

/// Trait for tools the model can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Machine-readable schema advertised to the model.
    fn spec(&self) -> ToolSpec;

    /// Execute against the model-supplied arguments.
    ///
    /// An `Err` means the call itself failed (bad arguments, store
    /// failure); "found nothing" answers are `Ok` with explanatory text.
    async fn execute(&self, args: &serde_json::Value) -> Result<ToolReply>;
}

/// Outcome of a dispatch, tagged so callers can tell a failed call from
/// a successful one that returned a not-found answer. Only `content`
/// crosses the model boundary.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub content: String,
    pub is_error: bool,
}

/// Registry of available tools.
///
/// Holds the attribution buffer for one query at a time: the caller must
/// drain and clear it before reusing the registry for the next query.
/// [`crate::rag::RagSystem`] serializes whole queries for exactly this
/// reason.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
    sources: Mutex<Vec<SourceAttribution>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            sources: Mutex::new(Vec::new()),
        }
    }

    /// Register a tool. The last registration for a given name wins,
    /// keeping the original registration order.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.spec().name;
        match self.index.get(&name) {
            Some(&pos) => self.tools[pos] = tool,
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Schemas of all registered tools, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Dispatch a call by name. Never fails: unknown names and tool
    /// errors become result text the model can recover from.
    pub async fn dispatch(&self, name: &str, args: &serde_json::Value) -> DispatchOutcome {
        let tool = match self.index.get(name) {
            Some(&pos) => &self.tools[pos],
            None => {
                warn!(tool = name, "Dispatch requested for unknown tool");
                return DispatchOutcome {
                    content: format!("Tool '{}' not found.", name),
                    is_error: true,
                };
            }
        };

        match tool.execute(args).await {
            Ok(reply) => {
                if !reply.sources.is_empty() {
                    self.sources.lock().unwrap().extend(reply.sources);
                }
                DispatchOutcome {
                    content: reply.content,
                    is_error: false,
                }
            }
            Err(e) => {
                warn!(tool = name, error = %e, "Tool execution failed");
                DispatchOutcome {
                    content: e.to_string(),
                    is_error: true,
                }
            }
        }
    }

    /// The attributions accumulated by this query's dispatches, in the
    /// order they were produced.
    pub fn drain_sources(&self) -> Vec<SourceAttribution> {
        self.sources.lock().unwrap().clone()
    }

    /// Empty the attribution buffer. Call exactly once after reading
    /// sources, before the next query reuses the registry.
    pub fn clear_sources(&self) {
        self.sources.lock().unwrap().clear();
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
