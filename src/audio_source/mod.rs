//! Video source parsing and metadata for Notat.

mod youtube;

pub use youtube::YoutubeSource;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A validated video source.
///
/// Construction performs well-formedness checks only; whether the video is
/// actually available is discovered later by yt-dlp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    /// 11-character YouTube video ID.
    pub video_id: String,
    /// Canonical watch URL.
    pub url: String,
}

impl VideoSource {
    /// Parse a YouTube URL or bare 11-character video ID.
    pub fn parse(input: &str) -> Result<Self> {
        YoutubeSource::new().resolve(input)
    }
}

/// Metadata about a video, fetched before download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Video ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u32>,
    /// Canonical watch URL.
    pub source_url: String,
    /// Channel or uploader name (if available).
    pub channel: Option<String>,
    /// Publication date (if available).
    pub published_at: Option<DateTime<Utc>>,
}
