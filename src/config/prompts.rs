//! Prompt templates for Notat.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    /// Prompts for per-chunk note generation.
    pub chunk: ChunkPrompts,
    /// Prompts for the final synthesis pass.
    pub synthesis: SynthesisPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for generating notes from one transcript chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ChunkPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are generating high-quality notes from a transcript slice.

Write clean Markdown that reads like real notes someone would keep.

Rules:
- Be detailed and specific, but do not invent facts.
- If the transcript is unclear, say so briefly (e.g., "unclear/garbled here").
- Keep the structure consistent and scannable."#
                .to_string(),

            user: r#"The transcript slice below is from the video "{{title}}".

Return ONLY this Markdown (no extra commentary):

### Summary
A short paragraph (3-6 sentences) capturing the main idea(s) and how the speaker develops them.

### Key Points
- 8-16 bullets with the main claims, reasoning steps, and important details.
- Prefer concrete wording over generic phrasing.

### Concepts & Definitions
- A compact list of terms + what they mean in this context.
- If there aren't many terms, include fewer (quality over quantity).

### Examples / Analogies
- List concrete examples or analogies used and what they illustrate.
- If none: write "- None noted."

Transcript slice:
{{chunk}}"#
                .to_string(),
        }
    }
}

/// Prompts for synthesizing chunk notes into the final document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SynthesisPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are synthesizing multiple chunk notes into one polished set of notes.

Output MUST be valid Markdown and include ONLY these top-level headings, in this exact order:

# Executive Summary
# Full Outline
# Detailed Notes
# Key Concepts & Definitions
# Memorable Examples / Analogies
# Action Items / Takeaways

Guidelines:
- Be detailed, but readable and not repetitive.
- Preserve the speaker's progression of ideas (early, middle, end).
- Do not include discussion/exam questions.
- Do not invent sources or add citations.
- If the content contains uncertainty or garbled parts, you may briefly note that.

Depth requirements:
- Executive Summary: 6-12 strong bullets (not generic).
- Full Outline: hierarchical outline with multiple levels where appropriate.
- Detailed Notes: the main body. Use subheadings, and include claims with their
  support and implications, methods/processes/steps (if any), tradeoffs and
  caveats (if any), and contrasting viewpoints (if present).
- Key Concepts & Definitions: clear, content-grounded definitions (alphabetize when reasonable).
- Memorable Examples / Analogies: include what each example was used to prove or clarify.
- Action Items / Takeaways: list explicit recommendations or practical steps; if none, write "None explicitly stated.""#
                .to_string(),

            user: r#"The chunk notes below are from the video "{{title}}", in order.

Here are the chunk notes to synthesize:

{{chunk_notes}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load chunk prompts if file exists
            let chunk_path = custom_path.join("chunk.toml");
            if chunk_path.exists() {
                let content = std::fs::read_to_string(&chunk_path)?;
                prompts.chunk = toml::from_str(&content)?;
            }

            // Load synthesis prompts if file exists
            let synthesis_path = custom_path.join("synthesis.toml");
            if synthesis_path.exists() {
                let content = std::fs::read_to_string(&synthesis_path)?;
                prompts.synthesis = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.chunk.system.is_empty());
        assert!(!prompts.synthesis.system.is_empty());
        // The synthesis prompt pins the six fixed headings
        for heading in crate::notes::SECTION_HEADINGS {
            assert!(prompts.synthesis.system.contains(heading));
        }
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_custom_variables_merge() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("style".to_string(), "terse".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("chunk".to_string(), "text".to_string());

        let rendered = prompts.render_with_custom("{{style}}: {{chunk}}", &vars);
        assert_eq!(rendered, "terse: text");
    }
}
