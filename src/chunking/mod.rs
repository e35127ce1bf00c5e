//! Transcript chunking for Notat.
//!
//! Splits transcript text into ordered, character-bounded chunks that fit a
//! language model's input window. Chunks are non-overlapping and their
//! concatenation (modulo boundary whitespace) reconstructs the transcript.

mod text;

pub use text::chunk_text;

use serde::{Deserialize, Serialize};

/// A bounded-size slice of a transcript, sent to the language model in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptChunk {
    /// Order of this chunk within the transcript.
    pub order: usize,
    /// Text content.
    pub content: String,
}

/// Split a transcript's text into ordered chunks of at most `max_chars` characters.
pub fn chunk_transcript(text: &str, max_chars: usize) -> Vec<TranscriptChunk> {
    chunk_text(text, max_chars)
        .into_iter()
        .enumerate()
        .map(|(order, content)| TranscriptChunk { order, content })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_transcript_orders_chunks() {
        let chunks = chunk_transcript("One sentence here. Another sentence here.", 25);
        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
        }
    }

    #[test]
    fn test_chunk_transcript_empty() {
        assert!(chunk_transcript("", 100).is_empty());
        assert!(chunk_transcript("   \n\t  ", 100).is_empty());
    }
}
