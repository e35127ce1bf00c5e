//! Deterministic merge of chunk notes into the six fixed sections.
//!
//! Used when the synthesis mode is `stitch`: no extra model call, the chunk
//! notes' subsections are reorganized directly. Chunk order is preserved
//! throughout.

use super::SECTION_HEADINGS;
use crate::summarize::SectionSummary;

/// Subsection headings the chunk prompt asks for.
const SUMMARY: &str = "Summary";
const KEY_POINTS: &str = "Key Points";
const CONCEPTS: &str = "Concepts & Definitions";
const EXAMPLES: &str = "Examples / Analogies";

/// Build the six-section document body from ordered chunk notes.
pub fn stitch_sections(summaries: &[SectionSummary]) -> String {
    let notes: Vec<ChunkNote> = summaries.iter().map(ChunkNote::parse).collect();

    let mut out = String::new();

    // Executive Summary: the per-chunk summary paragraphs, in order
    push_heading(&mut out, SECTION_HEADINGS[0]);
    let overviews: Vec<&str> = notes.iter().filter_map(|n| n.summary.as_deref()).collect();
    if overviews.is_empty() {
        out.push_str("_None._\n");
    } else {
        for overview in overviews {
            out.push_str(overview);
            out.push_str("\n\n");
        }
    }

    // Full Outline: one entry per chunk, led by its summary's first sentence
    push_heading(&mut out, SECTION_HEADINGS[1]);
    for note in &notes {
        let lead = note
            .summary
            .as_deref()
            .map(first_sentence)
            .unwrap_or("(no summary)");
        out.push_str(&format!("{}. {}\n", note.order + 1, lead));
    }

    // Detailed Notes: per-chunk key points under part headings
    push_heading(&mut out, SECTION_HEADINGS[2]);
    for note in &notes {
        out.push_str(&format!("## Part {}\n\n", note.order + 1));
        let body = note.key_points.as_deref().unwrap_or(&note.raw);
        out.push_str(body.trim());
        out.push_str("\n\n");
    }

    // Key Concepts & Definitions: collected concept bullets, in chunk order
    push_heading(&mut out, SECTION_HEADINGS[3]);
    push_collected(&mut out, notes.iter().filter_map(|n| n.concepts.as_deref()));

    // Memorable Examples / Analogies
    push_heading(&mut out, SECTION_HEADINGS[4]);
    push_collected(&mut out, notes.iter().filter_map(|n| n.examples.as_deref()));

    // Action Items / Takeaways: the chunk prompt doesn't collect these
    push_heading(&mut out, SECTION_HEADINGS[5]);
    out.push_str("None explicitly stated.\n");

    out
}

/// One chunk note, parsed into its expected subsections.
struct ChunkNote {
    order: usize,
    raw: String,
    summary: Option<String>,
    key_points: Option<String>,
    concepts: Option<String>,
    examples: Option<String>,
}

impl ChunkNote {
    fn parse(summary: &SectionSummary) -> Self {
        let mut note = Self {
            order: summary.order,
            raw: summary.text.clone(),
            summary: None,
            key_points: None,
            concepts: None,
            examples: None,
        };

        for (heading, body) in split_subsections(&summary.text) {
            if body.is_empty() {
                continue;
            }
            let heading = heading.to_lowercase();
            if heading.starts_with(&SUMMARY.to_lowercase()) {
                note.summary = Some(body);
            } else if heading.starts_with(&KEY_POINTS.to_lowercase()) {
                note.key_points = Some(body);
            } else if heading.starts_with(&CONCEPTS.to_lowercase()) {
                note.concepts = Some(body);
            } else if heading.starts_with(&EXAMPLES.to_lowercase()) {
                note.examples = Some(body);
            }
        }

        note
    }
}

/// Split chunk-note Markdown on `###` headings into (heading, body) pairs.
fn split_subsections(text: &str) -> Vec<(String, String)> {
    let mut sections = Vec::new();
    let mut heading: Option<String> = None;
    let mut body = String::new();

    for line in text.lines() {
        if let Some(h) = line.trim().strip_prefix("###") {
            if let Some(prev) = heading.take() {
                sections.push((prev, body.trim().to_string()));
            }
            heading = Some(h.trim().to_string());
            body = String::new();
        } else if heading.is_some() {
            body.push_str(line);
            body.push('\n');
        }
    }

    if let Some(prev) = heading {
        sections.push((prev, body.trim().to_string()));
    }

    sections
}

/// First sentence of a paragraph, or its first line.
fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    let line = text.lines().next().unwrap_or(text);

    match line.find(['.', '!', '?']) {
        Some(pos) => &line[..=pos],
        None => line,
    }
}

fn push_heading(out: &mut String, heading: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("# {}\n\n", heading));
}

/// Append collected subsection bodies, skipping "None noted." placeholders.
fn push_collected<'a>(out: &mut String, bodies: impl Iterator<Item = &'a str>) {
    let mut wrote_any = false;

    for body in bodies {
        let meaningful: Vec<&str> = body
            .lines()
            .filter(|line| {
                let trimmed = line.trim().trim_start_matches('-').trim();
                !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("none noted.")
            })
            .collect();

        if !meaningful.is_empty() {
            out.push_str(&meaningful.join("\n"));
            out.push('\n');
            wrote_any = true;
        }
    }

    if !wrote_any {
        out.push_str("_None._\n");
    }
}
