//! Notes document composition.
//!
//! Builds the final Markdown document with six fixed top-level sections and
//! writes it to disk. The document is written once and never mutated.

mod stitch;

pub use stitch::stitch_sections;

use crate::audio_source::MediaMetadata;
use crate::error::{NotatError, Result};
use crate::transcription::format_timestamp;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The six fixed top-level headings, in document order.
pub const SECTION_HEADINGS: [&str; 6] = [
    "Executive Summary",
    "Full Outline",
    "Detailed Notes",
    "Key Concepts & Definitions",
    "Memorable Examples / Analogies",
    "Action Items / Takeaways",
];

/// How the final document body is produced from the chunk notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMode {
    /// One final language-model call merges the chunk notes.
    #[default]
    Model,
    /// Deterministic reorganization of the chunk notes' subsections.
    Stitch,
}

impl std::str::FromStr for SynthesisMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" | "llm" => Ok(SynthesisMode::Model),
            "stitch" => Ok(SynthesisMode::Stitch),
            _ => Err(format!("Unknown synthesis mode: {}", s)),
        }
    }
}

impl std::fmt::Display for SynthesisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthesisMode::Model => write!(f, "model"),
            SynthesisMode::Stitch => write!(f, "stitch"),
        }
    }
}

/// The final composed Markdown artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesDocument {
    pub markdown: String,
}

impl NotesDocument {
    /// Compose the document from a synthesized body and video metadata.
    ///
    /// Guarantees all six top-level headings are present; a missing section
    /// is appended with an explicit "None" body.
    pub fn compose(body: &str, metadata: &MediaMetadata) -> Self {
        let mut markdown = String::new();

        // Source attribution stays a blockquote so the six headings remain
        // the only top-level headings
        markdown.push_str(&format!("> Notes generated from \"{}\"", metadata.title));
        if let Some(duration) = metadata.duration_seconds {
            markdown.push_str(&format!(" ({})", format_timestamp(duration as f64)));
        }
        markdown.push_str(&format!("\n> {}\n\n", metadata.source_url));

        markdown.push_str(body.trim());
        markdown.push('\n');

        for heading in SECTION_HEADINGS {
            if !has_heading(&markdown, heading) {
                markdown.push_str(&format!("\n# {}\n\n_None._\n", heading));
            }
        }

        Self { markdown }
    }

    /// Write the document to `path`, overwriting any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                NotatError::Compose(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        std::fs::write(path, &self.markdown)
            .map_err(|e| NotatError::Compose(format!("cannot write {}: {}", path.display(), e)))
    }
}

/// Check whether a top-level heading for `section` is present.
///
/// Tolerant of suffixes the model may add, e.g. "(if any)".
fn has_heading(markdown: &str, section: &str) -> bool {
    let wanted = section.to_lowercase();
    markdown.lines().any(|line| {
        line.trim()
            .strip_prefix("# ")
            .map(|rest| rest.trim().to_lowercase().starts_with(&wanted))
            .unwrap_or(false)
    })
}
