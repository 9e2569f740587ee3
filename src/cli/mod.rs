//! CLI module for Laere.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Laere - Course Material Question Answering
///
/// A CLI tool for asking questions about a corpus of course material.
/// The name "Laere" comes from the Norwegian/Scandinavian word for "learn."
#[derive(Parser, Debug)]
#[command(name = "laere")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about the indexed course material
    Ask {
        /// The question to ask
        question: String,

        /// Directory of course JSON files (overrides the configured corpus)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Start an interactive chat session
    Chat {
        /// Directory of course JSON files (overrides the configured corpus)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// List indexed courses
    Courses {
        /// Directory of course JSON files (overrides the configured corpus)
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}
