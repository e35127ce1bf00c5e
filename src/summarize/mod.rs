//! Per-chunk summarization and final synthesis.
//!
//! Sends each transcript chunk to a language model with a fixed instruction
//! template and collects one section summary per chunk, in chunk order. The
//! same client also performs the final synthesis call that merges the chunk
//! notes into the six-section document body.

use crate::chunking::TranscriptChunk;
use crate::config::Prompts;
use crate::error::{NotatError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Language-model output for one chunk, ordered to match chunk order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Order of the chunk this summary belongs to.
    pub order: usize,
    /// Free-form Markdown notes for the chunk.
    pub text: String,
}

/// Retry policy for model calls: a fixed number of retries with a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            retry_delay: Duration::from_secs(2),
        }
    }
}

/// Chat-completion summarizer with an explicitly constructed client.
pub struct Summarizer {
    client: Client<OpenAIConfig>,
    model: String,
    retry: RetryPolicy,
    prompts: Prompts,
}

impl Summarizer {
    /// Create a new summarizer.
    pub fn new(client: Client<OpenAIConfig>, model: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            model: model.to_string(),
            retry,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Produce notes for a single chunk.
    #[instrument(skip(self, chunk, title), fields(chunk = chunk.order))]
    pub async fn summarize_chunk(
        &self,
        chunk: &TranscriptChunk,
        title: &str,
    ) -> Result<SectionSummary> {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), title.to_string());
        vars.insert("chunk".to_string(), chunk.content.clone());

        let user_prompt = self.prompts.render_with_custom(&self.prompts.chunk.user, &vars);
        let text = self
            .complete_with_retry(&self.prompts.chunk.system, &user_prompt)
            .await?;

        Ok(SectionSummary {
            order: chunk.order,
            text,
        })
    }

    /// Merge the ordered chunk notes into the final six-section document body.
    pub async fn synthesize(&self, summaries: &[SectionSummary], title: &str) -> Result<String> {
        // A divider per chunk keeps the sequence visible to the model
        let chunk_notes = summaries
            .iter()
            .map(|s| format!("## Chunk {}\n\n{}", s.order + 1, s.text.trim()))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), title.to_string());
        vars.insert("chunk_notes".to_string(), chunk_notes);

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.synthesis.user, &vars);

        self.complete_with_retry(&self.prompts.synthesis.system, &user_prompt)
            .await
    }

    /// One chat call, retried per the policy. An empty response counts as a
    /// failure and consumes a retry.
    async fn complete_with_retry(&self, system: &str, user: &str) -> Result<String> {
        let attempts = self.retry.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                warn!("Retrying model call (attempt {}/{})", attempt, attempts);
                tokio::time::sleep(self.retry.retry_delay).await;
            }

            match self.complete(system, user).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    debug!("Model call attempt {} failed: {}", attempt, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| NotatError::Summarization("no attempts were made".to_string())))
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| NotatError::Summarization(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| NotatError::Summarization(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| NotatError::Summarization(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| NotatError::OpenAI(format!("Chat completion failed: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| NotatError::Summarization("Empty response from model".to_string()))
    }
}
