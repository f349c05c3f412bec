//! Image-generation collaborator client (Hugging Face inference API).

use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::error::{ChatwrappedError, Result};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
const MODEL_ID: &str = "black-forest-labs/FLUX.1-dev";

/// Image generation is slow; the wait is bounded but generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

const GUIDANCE_SCALE: f64 = 3.5;
const INFERENCE_STEPS: u32 = 28;
const IMAGE_SIZE: u32 = 1024;

/// Blocking client for the image-generation collaborator.
pub struct ImageClient {
    client: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl ImageClient {
    /// Creates a client with the given credential token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (for tests against a local server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generates a square raster image for the prompt and returns the raw
    /// image bytes.
    ///
    /// # Errors
    ///
    /// Transport failures map to [`ChatwrappedError::Http`]; non-success
    /// statuses and empty bodies map to
    /// [`ChatwrappedError::Collaborator`]. Callers turn any of these into
    /// an informational notice, never a fatal error.
    pub fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        let url = format!("{}/models/{}", self.base_url, MODEL_ID);

        let body = json!({
            "inputs": prompt,
            "parameters": {
                "guidance_scale": GUIDANCE_SCALE,
                "num_inference_steps": INFERENCE_STEPS,
                "width": IMAGE_SIZE,
                "height": IMAGE_SIZE,
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatwrappedError::collaborator(
                "image",
                format!("request failed with status {status}"),
            ));
        }

        let bytes = response.bytes()?;
        if bytes.is_empty() {
            return Err(ChatwrappedError::collaborator("image", "empty image body"));
        }
        debug!(bytes = bytes.len(), "image received");
        Ok(bytes.to_vec())
    }
}
