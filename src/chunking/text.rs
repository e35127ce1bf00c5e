//! Character-bounded, sentence-aware text splitting.

/// Split text into chunks of at most `max_chars` characters.
///
/// Sentence boundaries are preferred: sentences are packed greedily into
/// chunks up to the bound. A single sentence longer than the bound is split
/// at the last whitespace inside the bound, or exactly at the bound when it
/// contains no whitespace at all. Whitespace-only input yields no chunks.
///
/// Sizes are measured in characters (Unicode scalar values), never bytes.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    assert!(max_chars > 0, "chunk size must be positive");

    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        for piece in split_oversized(sentence, max_chars) {
            let piece_len = char_len(piece);
            // +1 for the joining space
            let needed = if current.is_empty() {
                piece_len
            } else {
                piece_len + 1
            };

            if current_len + needed > max_chars && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if current.is_empty() {
                current.push_str(piece);
                current_len = piece_len;
            } else {
                current.push(' ');
                current.push_str(piece);
                current_len += piece_len + 1;
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split text into sentence units, trimmed, in order.
///
/// A unit ends after a terminator (. ! ?) followed by whitespace; the
/// terminator stays with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev_terminator = false;

    for (idx, ch) in text.char_indices() {
        if prev_terminator && ch.is_whitespace() {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = idx;
        }
        prev_terminator = matches!(ch, '.' | '!' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Split a single sentence that exceeds the bound.
///
/// Cuts at the last whitespace within the bound; a run with no whitespace is
/// cut at the bound exactly.
fn split_oversized(sentence: &str, max_chars: usize) -> Vec<&str> {
    if char_len(sentence) <= max_chars {
        return vec![sentence];
    }

    let mut pieces = Vec::new();
    let mut rest = sentence;

    while char_len(rest) > max_chars {
        let limit = byte_index(rest, max_chars);
        let window = &rest[..limit];

        let (piece, remainder) = match window.rfind(char::is_whitespace) {
            Some(pos) if pos > 0 => (window[..pos].trim_end(), rest[pos..].trim_start()),
            _ => (window, &rest[limit..]),
        };

        if !piece.is_empty() {
            pieces.push(piece);
        }
        rest = remainder;
    }

    if !rest.is_empty() {
        pieces.push(rest);
    }

    pieces
}

/// Byte index of the `chars`-th character (or the end of the string).
fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
