//! Pipeline orchestrator for Notat.
//!
//! Runs the forward-only pipeline for one video: fetch audio, transcribe,
//! chunk, summarize, compose. Each stage consumes the previous stage's
//! complete output; a failed stage aborts the run and there is no resumption.

use crate::audio::download_audio;
use crate::audio_source::{VideoSource, YoutubeSource};
use crate::chunking::chunk_transcript;
use crate::config::{Prompts, Settings};
use crate::error::{NotatError, Result};
use crate::notes::{stitch_sections, NotesDocument, SynthesisMode};
use crate::openai::create_client;
use crate::summarize::{RetryPolicy, Summarizer};
use crate::transcription::{format_timestamp, Transcriber, WhisperTranscriber};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Pipeline stages, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Transcribing,
    Chunking,
    Summarizing,
    Composing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Fetching => write!(f, "fetching"),
            Stage::Transcribing => write!(f, "transcribing"),
            Stage::Chunking => write!(f, "chunking"),
            Stage::Summarizing => write!(f, "summarizing"),
            Stage::Composing => write!(f, "composing"),
        }
    }
}

/// Per-run options, typically from the command line.
#[derive(Debug, Clone)]
pub struct NotesOptions {
    /// Destination Markdown file.
    pub output: PathBuf,
    /// Override the summary model.
    pub model: Option<String>,
    /// Language hint for transcription.
    pub language: Option<String>,
    /// Override the chunk size bound.
    pub max_chars: Option<usize>,
    /// Keep the downloaded audio file instead of deleting it.
    pub keep_audio: bool,
    /// Override the synthesis mode.
    pub synthesis: Option<SynthesisMode>,
}

impl Default for NotesOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("notes.md"),
            model: None,
            language: None,
            max_chars: None,
            keep_audio: false,
            synthesis: None,
        }
    }
}

/// The main orchestrator for the notes pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    temp_dir: PathBuf,
}

impl Orchestrator {
    /// Create a new orchestrator from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let temp_dir = settings.temp_dir();
        std::fs::create_dir_all(&temp_dir)?;

        Ok(Self {
            settings,
            prompts,
            temp_dir,
        })
    }

    /// Run the full pipeline for one video and write the notes document.
    #[instrument(skip(self, options), fields(input = %input))]
    pub async fn generate_notes(&self, input: &str, options: &NotesOptions) -> Result<NotesResult> {
        let max_chars = options.max_chars.unwrap_or(self.settings.chunking.max_chars);
        if max_chars == 0 {
            return Err(NotatError::InvalidInput(
                "chunk size must be greater than zero".to_string(),
            ));
        }

        // The API client's lifecycle is scoped to this run
        let client = create_client();
        let transcriber = WhisperTranscriber::new(
            client.clone(),
            &self.settings.transcription.model,
            self.settings.transcription.chunk_duration_seconds,
        );

        let summary_model = options
            .model
            .as_deref()
            .unwrap_or(&self.settings.summary.model);
        let retry = RetryPolicy {
            max_retries: self.settings.summary.max_retries,
            retry_delay: Duration::from_secs(self.settings.summary.retry_delay_seconds),
        };
        let summarizer =
            Summarizer::new(client, summary_model, retry).with_prompts(self.prompts.clone());

        // Fetching: validate input, fetch metadata, download audio
        info!("Stage: {}", Stage::Fetching);
        let source = VideoSource::parse(input)?;
        let youtube = YoutubeSource::new();

        eprintln!("  Fetching metadata...");
        let metadata = youtube.fetch_metadata(&source).await?;
        eprintln!("  Title: {}", metadata.title);

        if let Some(duration) = metadata.duration_seconds {
            eprintln!("  Duration: {}", format_timestamp(duration as f64));
            if duration > self.settings.transcription.max_duration_seconds {
                return Err(NotatError::InvalidInput(format!(
                    "Video duration ({} seconds) exceeds maximum ({} seconds)",
                    duration, self.settings.transcription.max_duration_seconds
                )));
            }
        }

        eprintln!("  Downloading audio...");
        let audio_path = download_audio(
            &metadata.source_url,
            &metadata.id,
            &self.temp_dir,
            &self.settings.download,
        )
        .await?;

        // Transcribing
        info!("Stage: {}", Stage::Transcribing);
        eprintln!("  Transcribing...");
        let language = options
            .language
            .as_deref()
            .or(self.settings.transcription.language.as_deref());
        let transcript = transcriber.transcribe(&audio_path, language).await?;
        eprintln!(
            "  Transcription complete ({} segments)",
            transcript.segments.len()
        );

        // The audio artifact is only needed for transcription
        if !options.keep_audio {
            if let Err(e) = std::fs::remove_file(&audio_path) {
                warn!("Failed to clean up audio file: {}", e);
            }
        }

        if transcript.is_empty() {
            return Err(NotatError::Transcription(
                "transcription produced no text".to_string(),
            ));
        }

        // Chunking
        info!("Stage: {}", Stage::Chunking);
        let chunks = chunk_transcript(&transcript.full_text, max_chars);
        if chunks.is_empty() {
            return Err(NotatError::Transcription(
                "transcript contains no usable text".to_string(),
            ));
        }
        eprintln!("  Split transcript into {} chunk(s)", chunks.len());

        // Summarizing: strictly in order, one chunk at a time
        info!("Stage: {}", Stage::Summarizing);
        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} Summarizing [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap()
                .progress_chars("█▓░"),
        );

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            match summarizer.summarize_chunk(chunk, &metadata.title).await {
                Ok(summary) => {
                    summaries.push(summary);
                    pb.inc(1);
                }
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            }
        }
        pb.finish_and_clear();

        // Composing
        info!("Stage: {}", Stage::Composing);
        eprintln!("  Composing notes...");
        let mode = options.synthesis.unwrap_or_else(|| {
            self.settings
                .notes
                .synthesis
                .parse()
                .unwrap_or_default()
        });

        let body = match mode {
            SynthesisMode::Model => summarizer.synthesize(&summaries, &metadata.title).await?,
            SynthesisMode::Stitch => stitch_sections(&summaries),
        };

        let document = NotesDocument::compose(&body, &metadata);
        document.write(&options.output)?;

        Ok(NotesResult {
            video_id: metadata.id,
            title: metadata.title,
            chunks: chunks.len(),
            output_path: options.output.clone(),
        })
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct NotesResult {
    /// Video ID.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Number of transcript chunks summarized.
    pub chunks: usize,
    /// Path the notes document was written to.
    pub output_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_input_fails_before_any_download() {
        let mut settings = Settings::default();
        let dir = tempfile::tempdir().unwrap();
        settings.general.temp_dir = dir.path().to_string_lossy().into_owned();

        let orchestrator = Orchestrator::new(settings).unwrap();
        let err = orchestrator
            .generate_notes("not a url", &NotesOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, NotatError::InvalidInput(_)));
        // Nothing was downloaded
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_zero_chunk_size_is_rejected() {
        let mut settings = Settings::default();
        let dir = tempfile::tempdir().unwrap();
        settings.general.temp_dir = dir.path().to_string_lossy().into_owned();

        let orchestrator = Orchestrator::new(settings).unwrap();
        let options = NotesOptions {
            max_chars: Some(0),
            ..NotesOptions::default()
        };

        let err = orchestrator
            .generate_notes("dQw4w9WgXcQ", &options)
            .await
            .unwrap_err();
        assert!(matches!(err, NotatError::InvalidInput(_)));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Fetching.to_string(), "fetching");
        assert_eq!(Stage::Composing.to_string(), "composing");
    }
}
