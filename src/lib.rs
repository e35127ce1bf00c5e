//! Notat - YouTube Study Notes
//!
//! A CLI tool that turns a YouTube video into structured Markdown study notes.
//!
//! The name "Notat" comes from the Norwegian/Scandinavian word for "note."
//!
//! # Overview
//!
//! Notat runs a linear, forward-only pipeline:
//!
//! 1. Download the best audio stream for a video (yt-dlp + ffmpeg)
//! 2. Transcribe it with OpenAI Whisper
//! 3. Split the transcript into character-bounded chunks
//! 4. Summarize each chunk with a language model, in order
//! 5. Synthesize one Markdown document with six fixed top-level sections
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `audio_source` - Video input parsing and metadata
//! - `audio` - Audio download and processing
//! - `transcription` - Speech-to-text transcription
//! - `chunking` - Transcript chunking
//! - `summarize` - Per-chunk summarization and final synthesis
//! - `notes` - Notes document composition
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use notat::config::Settings;
//! use notat::orchestrator::{NotesOptions, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator
//!         .generate_notes("dQw4w9WgXcQ", &NotesOptions::default())
//!         .await?;
//!     println!("Wrote {}", result.output_path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod audio_source;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod notes;
pub mod openai;
pub mod orchestrator;
pub mod summarize;
pub mod transcription;

pub use error::{NotatError, Result};
