//! Integration tests for notat
//!
//! These tests validate the integration between components without requiring
//! external tools, API keys, or network access.

use notat::audio_source::{MediaMetadata, VideoSource};
use notat::chunking::{chunk_text, chunk_transcript};
use notat::config::{Prompts, Settings};
use notat::error::NotatError;
use notat::notes::{stitch_sections, NotesDocument, SynthesisMode, SECTION_HEADINGS};
use notat::summarize::SectionSummary;
use notat::transcription::{Transcript, TranscriptSegment};

// ============================================================================
// Config Integration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_default_synthesis_mode_is_model() {
        let settings = Settings::default();
        let mode: SynthesisMode = settings.notes.synthesis.parse().unwrap();
        assert_eq!(mode, SynthesisMode::Model);
    }

    #[test]
    fn test_prompts_carry_chunk_placeholder() {
        let prompts = Prompts::default();
        assert!(prompts.chunk.user.contains("{{chunk}}"));
        assert!(prompts.synthesis.user.contains("{{chunk_notes}}"));
    }
}

// ============================================================================
// Input Validation Tests
// ============================================================================

mod input_tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected_before_any_work() {
        let err = VideoSource::parse("not a url").unwrap_err();
        assert!(matches!(err, NotatError::InvalidInput(_)));
    }

    #[test]
    fn test_url_forms_resolve_to_same_source() {
        let a = VideoSource::parse("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let b = VideoSource::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        let c = VideoSource::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}

// ============================================================================
// Transcript to Chunks Tests
// ============================================================================

mod transcript_chunk_tests {
    use super::*;

    fn transcript(texts: &[&str]) -> Transcript {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, t)| TranscriptSegment::new(i as f64 * 5.0, (i + 1) as f64 * 5.0, t.to_string()))
            .collect();
        Transcript::new("test_video".to_string(), segments)
    }

    #[test]
    fn test_transcript_text_flows_into_chunks() {
        let t = transcript(&[
            "The first segment talks about ownership.",
            "The second covers borrowing rules.",
            "The third explains lifetimes.",
        ]);

        let chunks = chunk_transcript(&t.full_text, 60);
        assert!(!chunks.is_empty());

        let reconstructed = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(reconstructed, t.full_text);
    }

    #[test]
    fn test_empty_transcript_yields_no_chunks() {
        let t = transcript(&[]);
        assert!(t.is_empty());
        assert!(chunk_transcript(&t.full_text, 60).is_empty());
    }

    #[test]
    fn test_transcript_at_exact_limit_is_one_chunk() {
        let t = transcript(&["Exactly sized text."]);
        let len = t.full_text.chars().count();

        let chunks = chunk_text(&t.full_text, len);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], t.full_text);
    }
}

// ============================================================================
// Composition Tests
// ============================================================================

mod composition_tests {
    use super::*;

    fn metadata() -> MediaMetadata {
        MediaMetadata {
            id: "dQw4w9WgXcQ".to_string(),
            title: "Ownership in Practice".to_string(),
            duration_seconds: Some(240),
            source_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            channel: Some("Rust Talks".to_string()),
            published_at: None,
        }
    }

    fn chunk_notes() -> Vec<SectionSummary> {
        vec![
            SectionSummary {
                order: 0,
                text: "### Summary\nOwnership moves values. A move invalidates the source.\n\n\
                       ### Key Points\n- Values have one owner\n- Moves transfer ownership\n\n\
                       ### Concepts & Definitions\n- Move: transfer of ownership\n\n\
                       ### Examples / Analogies\n- Handing over a library book"
                    .to_string(),
            },
            SectionSummary {
                order: 1,
                text: "### Summary\nBorrowing lends access without transfer. The borrow checker enforces it.\n\n\
                       ### Key Points\n- Shared borrows are read-only\n- Mutable borrows are exclusive\n\n\
                       ### Concepts & Definitions\n- Borrow: temporary access\n\n\
                       ### Examples / Analogies\n- None noted."
                    .to_string(),
            },
        ]
    }

    #[test]
    fn test_stitched_document_has_all_sections() {
        let body = stitch_sections(&chunk_notes());
        let doc = NotesDocument::compose(&body, &metadata());

        for heading in SECTION_HEADINGS {
            assert!(
                doc.markdown.contains(&format!("# {}", heading)),
                "missing heading {}",
                heading
            );
        }

        // Executive Summary is non-empty: chunk overviews flowed in
        assert!(doc.markdown.contains("Ownership moves values."));
        // Detailed notes preserve chunk order
        let part1 = doc.markdown.find("Values have one owner").unwrap();
        let part2 = doc.markdown.find("Shared borrows are read-only").unwrap();
        assert!(part1 < part2);
    }

    #[test]
    fn test_document_written_to_requested_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("notes.md");

        let body = stitch_sections(&chunk_notes());
        let doc = NotesDocument::compose(&body, &metadata());
        doc.write(&out).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, doc.markdown);
        assert!(written.contains("Ownership in Practice"));
    }

    #[test]
    fn test_partial_model_output_is_repaired() {
        // A model response that dropped four sections still yields a
        // well-formed document
        let body = "# Executive Summary\n\nShort.\n\n# Detailed Notes\n\nBody.";
        let doc = NotesDocument::compose(body, &metadata());

        for heading in SECTION_HEADINGS {
            assert!(doc.markdown.contains(&format!("# {}", heading)));
        }
        assert_eq!(doc.markdown.matches("_None._").count(), 4);
    }
}
