//! Interactive chat command.

use crate::cli::Output;
use crate::config::Settings;
use crate::llm::AnthropicClient;
use crate::rag::RagSystem;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Run the interactive chat command.
///
/// One session spans the whole loop, so follow-up questions see the
/// recent conversation.
pub async fn run_chat(corpus: Option<&PathBuf>, settings: Settings) -> Result<()> {
    let store = super::load_store(corpus, &settings)?;
    let client = Arc::new(AnthropicClient::from_settings(&settings.model)?);
    let rag = RagSystem::new(client, store, &settings);
    let session = rag.create_session();

    println!("\n{}", style("Laere Chat").bold().cyan());
    println!(
        "{}\n",
        style("Type your questions, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            rag.clear_session(&session);
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        match rag.query(input, Some(&session)).await {
            Ok(response) => {
                spinner.finish_and_clear();
                println!("\n{} {}\n", style("Laere:").cyan().bold(), response.answer);

                for source in &response.sources {
                    match &source.link {
                        Some(link) => {
                            println!("  {}", style(format!("{} ({})", source.label, link)).dim())
                        }
                        None => println!("  {}", style(&source.label).dim()),
                    }
                }
                if !response.sources.is_empty() {
                    println!();
                }
            }
            Err(e) => {
                spinner.finish_and_clear();
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
