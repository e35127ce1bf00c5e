//! OpenAI Whisper transcription implementation.

use super::{Transcriber, Transcript, TranscriptSegment};
use crate::audio::split_audio;
use crate::error::{NotatError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{AudioResponseFormat, CreateTranscriptionRequestArgs};
use async_openai::Client;
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info, instrument};

/// OpenAI Whisper-based transcriber.
///
/// The client is constructed by the caller and passed in; audio longer than
/// `chunk_duration_seconds` is split and transcribed piece by piece, in order.
pub struct WhisperTranscriber {
    client: Client<OpenAIConfig>,
    model: String,
    chunk_duration_seconds: u32,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber.
    pub fn new(client: Client<OpenAIConfig>, model: &str, chunk_duration_seconds: u32) -> Self {
        Self {
            client,
            model: model.to_string(),
            chunk_duration_seconds,
        }
    }

    /// Transcribe a single audio file (no splitting).
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe_single(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<Vec<TranscriptSegment>> {
        debug!("Transcribing audio file");

        let file_bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| NotatError::Transcription(format!("cannot read audio file: {}", e)))?;

        let mut request_builder = CreateTranscriptionRequestArgs::default();
        request_builder
            .file(async_openai::types::AudioInput::from_vec_u8(
                audio_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("audio.mp3")
                    .to_string(),
                file_bytes,
            ))
            .model(&self.model)
            .response_format(AudioResponseFormat::VerboseJson);

        if let Some(lang) = language {
            request_builder.language(lang);
        }

        let request = request_builder
            .build()
            .map_err(|e| NotatError::Transcription(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .transcribe_verbose_json(request)
            .await
            .map_err(|e| NotatError::OpenAI(format!("Whisper API error: {}", e)))?;

        // Parse segments from verbose JSON response
        let segments: Vec<TranscriptSegment> = response
            .segments
            .map(|segs| {
                segs.iter()
                    .map(|s| {
                        TranscriptSegment::new(
                            s.start as f64,
                            s.end as f64,
                            s.text.trim().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_else(|| {
                // Fallback: create single segment from full text
                vec![TranscriptSegment::new(
                    0.0,
                    response.duration as f64,
                    response.text.trim().to_string(),
                )]
            });

        debug!("Transcribed {} segments", segments.len());
        Ok(segments)
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path, language: Option<&str>) -> Result<Transcript> {
        let video_id = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let temp_dir = tempfile::tempdir()?;
        let pieces = split_audio(audio_path, temp_dir.path(), self.chunk_duration_seconds).await?;

        if pieces.len() == 1 {
            // No splitting needed
            let segments = self.transcribe_single(audio_path, language).await?;
            return Ok(Transcript::new(video_id, segments));
        }

        info!("Transcribing {} audio pieces with {}", pieces.len(), self.model);

        // Strictly sequential: one piece at a time, in playback order
        let mut all_segments = Vec::new();
        for (idx, (piece_path, time_offset)) in pieces.iter().enumerate() {
            let mut segments = self
                .transcribe_single(piece_path, language)
                .await
                .map_err(|e| {
                    NotatError::Transcription(format!(
                        "Piece {} at {:.0}s failed: {}",
                        idx, time_offset, e
                    ))
                })?;

            // Adjust timestamps by the piece's offset into the full audio
            for segment in &mut segments {
                segment.start_seconds += time_offset;
                segment.end_seconds += time_offset;
            }
            all_segments.extend(segments);
        }

        drop(temp_dir);

        Ok(Transcript::new(video_id, all_segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::create_client_with_config;
    use std::time::Duration;

    #[tokio::test]
    async fn test_missing_audio_file_fails() {
        let config = OpenAIConfig::new().with_api_key("test-key");
        let client = create_client_with_config(config, Duration::from_secs(5));
        let transcriber = WhisperTranscriber::new(client, "whisper-1", 600);

        let err = transcriber
            .transcribe_single(Path::new("/tmp/notat-does-not-exist.mp3"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, NotatError::Transcription(_)));
    }
}
