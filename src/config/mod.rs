//! Configuration management for Laere.

mod settings;

pub use settings::{
    CorpusSettings, GeneralSettings, ModelSettings, SearchSettings, SessionSettings, Settings,
};
