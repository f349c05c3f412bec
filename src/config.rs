//! Run configuration sourced from the environment.
//!
//! Three knobs, all optional:
//!
//! - `REQUEST_LIMIT` — request-count ceiling (default 500). Read and
//!   carried on the run context, but not compared against anything: the
//!   counter it was meant to cap is never incremented. Kept as-is rather
//!   than inventing enforcement semantics.
//! - `GEMINI_API_KEY` — enables the summarization collaborator.
//! - `HF_API_TOKEN` — enables the image-generation collaborator.
//!
//! A missing credential disables the corresponding feature gracefully; it
//! is never an error.

use std::env;

use tracing::warn;

/// Default request-count ceiling when `REQUEST_LIMIT` is unset.
pub const DEFAULT_REQUEST_LIMIT: u32 = 500;

/// Configuration for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Request-count ceiling (currently unenforced, see module docs).
    pub request_limit: u32,

    /// API key for the summarization collaborator.
    pub gemini_api_key: Option<String>,

    /// Credential token for the image-generation collaborator.
    pub hf_api_token: Option<String>,
}

impl RunConfig {
    /// Builds a configuration from `REQUEST_LIMIT`, `GEMINI_API_KEY`, and
    /// `HF_API_TOKEN`. Never fails; unparsable limits fall back to the
    /// default with a warning.
    pub fn from_env() -> Self {
        Self {
            request_limit: parse_limit(env::var("REQUEST_LIMIT").ok()),
            gemini_api_key: non_empty(env::var("GEMINI_API_KEY").ok()),
            hf_api_token: non_empty(env::var("HF_API_TOKEN").ok()),
        }
    }

    /// Returns `true` if the summarization collaborator can be called.
    pub fn summarization_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }

    /// Returns `true` if the image collaborator can be called.
    pub fn image_generation_enabled(&self) -> bool {
        self.hf_api_token.is_some()
    }

    /// Sets the Gemini API key (mainly for tests).
    #[must_use]
    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Sets the Hugging Face token (mainly for tests).
    #[must_use]
    pub fn with_hf_token(mut self, token: impl Into<String>) -> Self {
        self.hf_api_token = Some(token.into());
        self
    }
}

/// Mutable state threaded through one analysis run.
///
/// Holds the accumulating request counter explicitly instead of as
/// process-wide ambient state. Nothing increments it yet — that matches
/// the request-limit feature being read but unenforced.
#[derive(Debug)]
pub struct RunContext {
    /// The configuration this run was started with.
    pub config: RunConfig,

    /// Number of collaborator requests issued during this run.
    pub request_count: u32,
}

impl RunContext {
    /// Creates a fresh context for one run.
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            request_count: 0,
        }
    }
}

fn parse_limit(raw: Option<String>) -> u32 {
    match raw {
        None => DEFAULT_REQUEST_LIMIT,
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            warn!(value = %s, "REQUEST_LIMIT is not a number, using default");
            DEFAULT_REQUEST_LIMIT
        }),
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_default() {
        assert_eq!(parse_limit(None), 500);
    }

    #[test]
    fn test_parse_limit_value() {
        assert_eq!(parse_limit(Some("25".into())), 25);
        assert_eq!(parse_limit(Some(" 100 ".into())), 100);
    }

    #[test]
    fn test_parse_limit_garbage_falls_back() {
        assert_eq!(parse_limit(Some("lots".into())), DEFAULT_REQUEST_LIMIT);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(Some("key".into())), Some("key".into()));
    }

    #[test]
    fn test_feature_gating() {
        let config = RunConfig::default();
        assert!(!config.summarization_enabled());
        assert!(!config.image_generation_enabled());

        let config = config.with_gemini_key("g").with_hf_token("h");
        assert!(config.summarization_enabled());
        assert!(config.image_generation_enabled());
    }

    #[test]
    fn test_context_starts_at_zero() {
        let ctx = RunContext::new(RunConfig::default());
        assert_eq!(ctx.request_count, 0);
    }
}
