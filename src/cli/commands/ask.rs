//! Ask command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::llm::AnthropicClient;
use crate::rag::RagSystem;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(question: &str, corpus: Option<&PathBuf>, settings: Settings) -> Result<()> {
    let store = super::load_store(corpus, &settings)?;
    let client = Arc::new(AnthropicClient::from_settings(&settings.model)?);
    let rag = RagSystem::new(client, store, &settings);

    let spinner = Output::spinner("Searching course materials...");

    match rag.query(question, None).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::source(&source.label, source.link.as_deref());
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
