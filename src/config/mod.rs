//! Configuration module for Notat.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{ChunkPrompts, Prompts, SynthesisPrompts};
pub use settings::{
    ChunkingSettings, DownloadSettings, GeneralSettings, NotesSettings, PromptSettings,
    Settings, SummarySettings, TranscriptionSettings,
};
