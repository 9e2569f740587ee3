//! Tool-calling agent for answering course-material questions.

mod runner;

pub use runner::{Agent, DEFAULT_SYSTEM_PROMPT};
