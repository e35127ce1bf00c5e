//! YouTube input parsing and metadata fetching.

use super::{MediaMetadata, VideoSource};
use crate::error::{NotatError, Result};
use regex::Regex;
use url::Url;

/// YouTube input parser and metadata client.
pub struct YoutubeSource {
    video_id_regex: Regex,
}

impl YoutubeSource {
    pub fn new() -> Self {
        // A video ID is exactly 11 characters of [A-Za-z0-9_-]
        let video_id_regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex");
        Self { video_id_regex }
    }

    /// Resolve an input string to a validated video source.
    pub fn resolve(&self, input: &str) -> Result<VideoSource> {
        let input = input.trim();
        let video_id = self.extract_video_id(input).ok_or_else(|| {
            NotatError::InvalidInput(format!("not a YouTube URL or video ID: {}", input))
        })?;

        Ok(VideoSource {
            url: format!("https://www.youtube.com/watch?v={}", video_id),
            video_id,
        })
    }

    /// Extract a video ID from a URL or bare ID.
    ///
    /// Accepts watch, youtu.be, embed, shorts, live and /v/ URL forms, with or
    /// without a scheme, plus bare 11-character IDs.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        if self.video_id_regex.is_match(input) {
            return Some(input.to_string());
        }

        let candidate = if input.contains("://") {
            input.to_string()
        } else if input.starts_with("www.")
            || input.starts_with("m.")
            || input.starts_with("youtube.com")
            || input.starts_with("youtu.be")
        {
            format!("https://{}", input)
        } else {
            return None;
        };

        let url = Url::parse(&candidate).ok()?;
        let host = url
            .host_str()?
            .trim_start_matches("www.")
            .trim_start_matches("m.");

        let id = match host {
            "youtu.be" => url.path_segments()?.next().map(str::to_string),
            "youtube.com" | "youtube-nocookie.com" => {
                let mut segments = url.path_segments()?;
                match segments.next() {
                    Some("watch") => url
                        .query_pairs()
                        .find(|(k, _)| k == "v")
                        .map(|(_, v)| v.into_owned()),
                    Some("embed") | Some("shorts") | Some("live") | Some("v") => {
                        segments.next().map(str::to_string)
                    }
                    _ => None,
                }
            }
            _ => None,
        }?;

        if self.video_id_regex.is_match(&id) {
            Some(id)
        } else {
            None
        }
    }

    /// Fetch metadata using yt-dlp.
    pub async fn fetch_metadata(&self, source: &VideoSource) -> Result<MediaMetadata> {
        let output = tokio::process::Command::new("yt-dlp")
            .args([
                "--dump-json",
                "--no-download",
                "--no-warnings",
                &source.url,
            ])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotatError::ToolNotFound("yt-dlp".to_string())
                } else {
                    NotatError::VideoSource(format!("Failed to run yt-dlp: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NotatError::VideoNotFound(format!(
                "Video {} not found or unavailable: {}",
                source.video_id,
                stderr.trim()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&json_str)
            .map_err(|e| NotatError::VideoSource(format!("Failed to parse yt-dlp output: {}", e)))?;

        let title = json["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();

        let duration = json["duration"].as_f64().map(|d| d as u32);

        let channel = json["channel"]
            .as_str()
            .or_else(|| json["uploader"].as_str())
            .map(|s| s.to_string());

        let published_at = json["upload_date"].as_str().and_then(|date_str| {
            // yt-dlp returns date as YYYYMMDD
            if date_str.len() == 8 {
                chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            } else {
                None
            }
        });

        Ok(MediaMetadata {
            id: source.video_id.clone(),
            title,
            duration_seconds: duration,
            source_url: source.url.clone(),
            channel,
            published_at,
        })
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_url_forms() {
        let source = YoutubeSource::new();

        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_bare() {
        let source = YoutubeSource::new();
        assert_eq!(
            source.extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_video_id_rejects_invalid() {
        let source = YoutubeSource::new();

        assert_eq!(source.extract_video_id("not a url"), None);
        assert_eq!(source.extract_video_id(""), None);
        assert_eq!(source.extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        // Wrong ID length
        assert_eq!(source.extract_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn test_parse_canonicalizes_url() {
        let source = VideoSource::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(source.video_id, "dQw4w9WgXcQ");
        assert_eq!(source.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_parse_invalid_is_invalid_input() {
        let err = VideoSource::parse("not a url").unwrap_err();
        assert!(matches!(err, NotatError::InvalidInput(_)));
    }
}
