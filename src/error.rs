//! Error types for Notat.

use thiserror::Error;

/// Library-level error type for Notat operations.
///
/// Variants are named after the pipeline stage that produced them, so the
/// top-level error message always identifies the failing stage.
#[derive(Error, Debug)]
pub enum NotatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Audio download failed: {0}")]
    AudioDownload(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Failed to compose notes: {0}")]
    Compose(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Notat operations.
pub type Result<T> = std::result::Result<T, NotatError>;
