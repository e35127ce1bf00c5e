//! Mock API tests for the summarizer.
//!
//! A local wiremock server stands in for the OpenAI chat endpoint, so retry
//! behavior and ordering can be validated without credentials or network.

use async_openai::config::OpenAIConfig;
use notat::chunking::TranscriptChunk;
use notat::error::NotatError;
use notat::openai::create_client_with_config;
use notat::summarize::{RetryPolicy, SectionSummary, Summarizer};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAT_PATH: &str = "/v1/chat/completions";

fn chat_response(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 0,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
            "logprobs": null
        }]
    })
}

fn empty_choices_response() -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 0,
        "model": "gpt-4o-mini",
        "choices": []
    })
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        retry_delay: Duration::from_millis(10),
    }
}

async fn summarizer_for(server: &MockServer, retry: RetryPolicy) -> Summarizer {
    let config = OpenAIConfig::new()
        .with_api_key("test-key")
        .with_api_base(format!("{}/v1", server.uri()));
    let client = create_client_with_config(config, Duration::from_secs(5));
    Summarizer::new(client, "gpt-4o-mini", retry)
}

#[tokio::test]
async fn summarize_chunk_returns_ordered_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("### Summary\nNotes.")))
        .mount(&server)
        .await;

    let summarizer = summarizer_for(&server, fast_retry(1)).await;
    let chunk = TranscriptChunk {
        order: 4,
        content: "Some transcript text.".to_string(),
    };

    let summary = summarizer.summarize_chunk(&chunk, "A Video").await.unwrap();
    assert_eq!(summary.order, 4);
    assert_eq!(summary.text, "### Summary\nNotes.");
}

#[tokio::test]
async fn summarize_retries_once_after_empty_response() {
    let server = MockServer::start().await;

    // First call yields no choices, the retry succeeds
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_choices_response()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Recovered.")))
        .mount(&server)
        .await;

    let summarizer = summarizer_for(&server, fast_retry(1)).await;
    let chunk = TranscriptChunk {
        order: 0,
        content: "text".to_string(),
    };

    let summary = summarizer.summarize_chunk(&chunk, "A Video").await.unwrap();
    assert_eq!(summary.text, "Recovered.");
}

#[tokio::test]
async fn summarize_aborts_after_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_choices_response()))
        .expect(2) // initial attempt + one retry, nothing more
        .mount(&server)
        .await;

    let summarizer = summarizer_for(&server, fast_retry(1)).await;
    let chunk = TranscriptChunk {
        order: 0,
        content: "text".to_string(),
    };

    let err = summarizer
        .summarize_chunk(&chunk, "A Video")
        .await
        .unwrap_err();
    assert!(matches!(err, NotatError::Summarization(_)));
}

#[tokio::test]
async fn summaries_keep_chunk_index_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("alpha alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("notes-alpha")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("beta beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("notes-beta")))
        .mount(&server)
        .await;

    let summarizer = summarizer_for(&server, fast_retry(0)).await;
    let chunks = vec![
        TranscriptChunk {
            order: 0,
            content: "alpha alpha".to_string(),
        },
        TranscriptChunk {
            order: 1,
            content: "beta beta".to_string(),
        },
    ];

    let mut summaries: Vec<SectionSummary> = Vec::new();
    for chunk in &chunks {
        summaries.push(summarizer.summarize_chunk(chunk, "A Video").await.unwrap());
    }

    assert_eq!(summaries[0].order, 0);
    assert_eq!(summaries[0].text, "notes-alpha");
    assert_eq!(summaries[1].order, 1);
    assert_eq!(summaries[1].text, "notes-beta");
}

#[tokio::test]
async fn synthesize_sends_all_chunk_notes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains("first-chunk-notes"))
        .and(body_string_contains("second-chunk-notes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_response("# Executive Summary\n\nMerged.")),
        )
        .mount(&server)
        .await;

    let summarizer = summarizer_for(&server, fast_retry(0)).await;
    let summaries = vec![
        SectionSummary {
            order: 0,
            text: "first-chunk-notes".to_string(),
        },
        SectionSummary {
            order: 1,
            text: "second-chunk-notes".to_string(),
        },
    ];

    let body = summarizer.synthesize(&summaries, "A Video").await.unwrap();
    assert!(body.contains("Merged."));
}
