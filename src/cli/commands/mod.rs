//! CLI command implementations.

mod ask;
mod chat;
mod courses;

pub use ask::run_ask;
pub use chat::run_chat;
pub use courses::run_courses;

use crate::cli::Output;
use crate::config::Settings;
use crate::store::MemoryStore;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Load the course corpus into an in-memory store.
///
/// Uses the given directory when supplied, otherwise the configured
/// corpus path.
fn load_store(corpus: Option<&PathBuf>, settings: &Settings) -> Result<Arc<MemoryStore>> {
    let dir = corpus.cloned().unwrap_or_else(|| settings.corpus_dir());

    let store = MemoryStore::with_max_results(settings.search.max_results);
    let loaded = store
        .load_dir(&dir)
        .with_context(|| format!("Failed to load corpus from {}", dir.display()))?;

    if loaded == 0 {
        Output::info(&format!(
            "No course files found in {}. Add *.json course files to index content.",
            dir.display()
        ));
    }

    Ok(Arc::new(store))
}
