//! Recovery of the summarization collaborator's JSON response.
//!
//! The collaborator is instructed to return bare JSON, but in practice the
//! payload arrives wrapped in code fences, prefixed with prose, or quoted
//! with single quotes. [`extract_insights`] runs an ordered cascade of
//! parsing strategies and takes the first that yields a JSON object.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::{Insights, InsightsOrigin};

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*|```\s*").unwrap());
static BRACE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

type Strategy = fn(&str) -> Option<Value>;

/// The cascade, gentlest first. Each entry is (name, strategy); the name
/// only shows up in debug logs.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct", direct),
    ("fence-strip", fence_strip),
    ("brace-span", brace_span),
    ("quote-fix", quote_fix),
    ("aggressive-strip", aggressive_strip),
];

/// Extracts insights from a collaborator response.
///
/// Returns `None` when every strategy fails; failures are logged at debug
/// level only, since the caller degrades to the local fallback anyway.
pub fn extract_insights(text: &str) -> Option<Insights> {
    let text = text.trim();
    if text.is_empty() {
        debug!("empty collaborator response");
        return None;
    }

    for (name, strategy) in STRATEGIES {
        match strategy(text) {
            Some(value) => {
                debug!(strategy = name, "response JSON recovered");
                return Some(insights_from_value(&value));
            }
            None => debug!(strategy = name, "parse strategy failed"),
        }
    }
    None
}

/// A strategy succeeds only when its cleaned text parses to a JSON object.
fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

fn direct(text: &str) -> Option<Value> {
    parse_object(text)
}

fn fence_strip(text: &str) -> Option<Value> {
    parse_object(FENCE_RE.replace_all(text, "").trim())
}

fn brace_span(text: &str) -> Option<Value> {
    parse_object(BRACE_SPAN_RE.find(text)?.as_str().trim())
}

fn quote_fix(text: &str) -> Option<Value> {
    let stripped = FENCE_RE.replace_all(text, "");
    parse_object(&stripped.trim().replace('\'', "\""))
}

fn aggressive_strip(text: &str) -> Option<Value> {
    let stripped = FENCE_RE.replace_all(text, "");
    let stripped = stripped.as_ref();
    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }
    parse_object(&stripped[start..=end])
}

/// Plucks the expected fields out of a recovered object, tolerating missing
/// or oddly-typed entries.
fn insights_from_value(value: &Value) -> Insights {
    let summary = value
        .get("summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let topics = value
        .get("topics")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Insights {
        summary,
        topics,
        origin: InsightsOrigin::Collaborator,
    }
}
