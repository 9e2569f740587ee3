//! Laere - Course Material Question Answering
//!
//! A CLI tool and library for asking questions about a corpus of course
//! material, answered by a language model that can call retrieval tools.
//!
//! The name "Laere" comes from the Norwegian/Scandinavian word for "learn."
//!
//! # Overview
//!
//! Laere allows you to:
//! - Index pre-chunked course material into a searchable store
//! - Ask questions answered with content retrieved from your courses
//! - See source attributions for every excerpt an answer drew on
//! - Hold multi-turn conversations that remember recent exchanges
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `llm` - Model-client abstraction and conversation types
//! - `store` - Retrieval-store abstraction over the course corpus
//! - `tools` - Retrieval tools and the registry the model dispatches through
//! - `agent` - Bounded-round tool-calling agent
//! - `session` - Conversation-session management
//! - `rag` - Question-answering pipeline wiring it all together
//!
//! # Example
//!
//! ```rust,no_run
//! use laere::config::Settings;
//! use laere::llm::AnthropicClient;
//! use laere::rag::RagSystem;
//! use laere::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!
//!     let store = Arc::new(MemoryStore::new());
//!     store.load_dir(&settings.corpus_dir())?;
//!
//!     let client = Arc::new(AnthropicClient::from_settings(&settings.model)?);
//!     let rag = RagSystem::new(client, store, &settings);
//!
//!     let response = rag.query("What is MCP?", None).await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod rag;
pub mod session;
pub mod store;
pub mod tools;

pub use error::{LaereError, Result};
