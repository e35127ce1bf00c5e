//! Transcription module for Notat.
//!
//! Handles speech-to-text transcription over the OpenAI Whisper API. Long
//! audio is split into bounded-duration pieces that are transcribed one at a
//! time, in order.

mod models;
mod whisper;

pub use models::{format_timestamp, Transcript, TranscriptSegment};
pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file into a time-ordered transcript.
    ///
    /// `language` is an optional ISO 639-1 hint; None lets the model detect.
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Transcript>;
}
