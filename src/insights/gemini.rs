//! Summarization collaborator client (Google Gemini).

use std::time::Duration;

use serde_json::{Value, json};
use tracing::debug;

use super::prompt::SYSTEM_INSTRUCTION;
use crate::error::{ChatwrappedError, Result};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Low temperature for near-deterministic JSON output.
const TEMPERATURE: f64 = 0.1;

/// Blocking client for the summarization collaborator.
///
/// Returns the raw response text; JSON recovery is the caller's problem
/// (see [`parse`](super::parse)).
pub struct SummaryClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl SummaryClient {
    /// Creates a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (for tests against a local server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends the message blob and returns the model's text response.
    ///
    /// # Errors
    ///
    /// Transport failures map to [`ChatwrappedError::Http`]; a response
    /// without usable text maps to [`ChatwrappedError::Collaborator`].
    /// Either way the caller degrades to the local fallback.
    pub fn summarize(&self, blob: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, MODEL
        );

        let body = json!({
            "system_instruction": {"parts": [{"text": SYSTEM_INSTRUCTION}]},
            "contents": [{"parts": [{"text": blob}]}],
            "generationConfig": {"temperature": TEMPERATURE}
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatwrappedError::collaborator(
                "summarization",
                format!("request failed with status {status}"),
            ));
        }

        let payload: Value = response.json()?;
        debug!("summarization response received");
        response_text(&payload).ok_or_else(|| {
            ChatwrappedError::collaborator("summarization", "response contains no text")
        })
    }
}

/// Digs the generated text out of a `generateContent` response:
/// `candidates[0].content.parts[0].text`.
fn response_text(payload: &Value) -> Option<String> {
    let text = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(text.to_string())
}
