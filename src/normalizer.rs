//! Export normalizer: raw `conversations.json` into flat message records.
//!
//! This is the core of the crate. ChatGPT's export format has drifted over
//! the years: the root is either an array of conversations or an object
//! wrapping one, conversations carry either a `mapping` of nodes or a plain
//! `messages` list, and message content has shipped in at least five
//! encodings. [`normalize`] tolerates all known variants and silently skips
//! anything malformed rather than failing the run.
//!
//! The only fatal condition at this layer is a root value that cannot be
//! interpreted as a conversation collection at all.
//!
//! # Example
//!
//! ```
//! use chatwrapped::normalizer::normalize;
//! use serde_json::json;
//!
//! let raw = json!([{
//!     "id": "c1",
//!     "mapping": {
//!         "n1": {"message": {
//!             "author": {"role": "user"},
//!             "content": {"content_type": "text", "parts": ["hi there"]},
//!             "create_time": 1700000000.0
//!         }}
//!     }
//! }]);
//!
//! let export = normalize(&raw).unwrap();
//! assert_eq!(export.records.len(), 1);
//! assert_eq!(export.records[0].content, "hi there");
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ChatwrappedError, Result};
use crate::record::MessageRecord;

type JsonObject = Map<String, Value>;

/// The result of normalizing one raw export.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedExport {
    /// Number of conversation entries in the export, including ones that
    /// contributed no records. Reported as "total conversations".
    pub conversation_count: usize,

    /// Ordered records: conversation iteration order, then message
    /// iteration order within each conversation.
    pub records: Vec<MessageRecord>,
}

impl NormalizedExport {
    /// Returns `true` if normalization produced no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Transforms a raw export into an ordered sequence of [`MessageRecord`]s.
///
/// Malformed conversations, nodes, and messages are skipped (logged at
/// debug level only); messages lacking both `create_time` and `timestamp`
/// are dropped so every emitted record has a numeric timestamp.
///
/// # Errors
///
/// Returns [`ChatwrappedError::InvalidExport`] only when the root value
/// cannot be interpreted as a conversation collection.
pub fn normalize(raw: &Value) -> Result<NormalizedExport> {
    let convos = conversation_entries(raw)?;
    let conversation_count = convos.len();

    let mut records = Vec::new();
    for convo in convos {
        let Some(convo) = convo.as_object() else {
            debug!("skipping non-object conversation entry");
            continue;
        };
        let convo_id = conversation_id(convo);

        for candidate in message_candidates(convo) {
            let Some(msg) = candidate.as_object() else {
                debug!(conversation = ?convo_id, "skipping non-object message candidate");
                continue;
            };
            // No timestamp, no record. Hard requirement.
            let Some(timestamp) = extract_timestamp(msg) else {
                debug!(conversation = ?convo_id, "skipping message without usable timestamp");
                continue;
            };
            records.push(MessageRecord::new(
                convo_id.clone(),
                extract_role(msg),
                extract_content(msg),
                timestamp,
            ));
        }
    }

    Ok(NormalizedExport {
        conversation_count,
        records,
    })
}

/// Resolves the conversation collection from the root value.
///
/// - root array → its items (current schema)
/// - root object with a `conversations` collection → that collection
/// - any other root object → its values, best-effort
fn conversation_entries(raw: &Value) -> Result<Vec<&Value>> {
    match raw {
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(map) => match map.get("conversations") {
            Some(Value::Array(items)) => Ok(items.iter().collect()),
            Some(Value::Object(inner)) => Ok(inner.values().collect()),
            Some(other) => Err(ChatwrappedError::invalid_export(format!(
                "'conversations' field is not a collection (found {})",
                type_name(other)
            ))),
            None => Ok(map.values().collect()),
        },
        other => Err(ChatwrappedError::invalid_export(format!(
            "root is neither an array nor an object (found {})",
            type_name(other)
        ))),
    }
}

/// Resolves the conversation identifier from `id`, falling back to
/// `conversation_id`. Numeric identifiers are stringified.
fn conversation_id(convo: &JsonObject) -> Option<String> {
    convo
        .get("id")
        .filter(|v| truthy(v))
        .or_else(|| convo.get("conversation_id"))
        .and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Resolves the conversation's message candidates.
///
/// Current schema: a `mapping` object whose values are nodes; a node
/// contributes its `message` field when that is a non-empty object (edges
/// and node keys are ignored — the tree is traversed as a flat collection).
/// Legacy schemas: a `mapping` array, or a `messages` list/object.
fn message_candidates(convo: &JsonObject) -> Vec<&Value> {
    if let Some(Value::Object(mapping)) = convo.get("mapping") {
        return mapping
            .values()
            .filter_map(Value::as_object)
            .filter_map(|node| node.get("message"))
            .filter(|msg| msg.as_object().is_some_and(|o| !o.is_empty()))
            .collect();
    }

    match convo.get("mapping") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(_) => Vec::new(),
        None => match convo.get("messages") {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            _ => Vec::new(),
        },
    }
}

/// Extracts the author role.
///
/// When an `author` field exists (whatever its shape), only `author.role`
/// is consulted; otherwise the message's own `role` field. Defaults to an
/// empty string, never null.
fn extract_role(msg: &JsonObject) -> String {
    if let Some(author) = msg.get("author") {
        return author
            .get("role")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
    }
    msg.get("role")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// One content-extraction strategy.
///
/// Returns `None` when the strategy's shape guard does not match (the
/// cascade moves on) and `Some` when it claims the candidate — possibly
/// with an empty string. A claim is final: later strategies are not tried,
/// which is what makes `{"content_type": "text", "parts": []}` yield `""`
/// instead of falling through to other fields.
type ContentExtractor = fn(&JsonObject) -> Option<String>;

/// Ordered cascade of content extractors, oldest encoding last.
const CONTENT_EXTRACTORS: &[ContentExtractor] =
    &[content_object, text_field, wrapped_message, content_string];

/// Extracts message content via the first matching strategy.
fn extract_content(msg: &JsonObject) -> String {
    CONTENT_EXTRACTORS
        .iter()
        .find_map(|extract| extract(msg))
        .unwrap_or_default()
}

/// `content` is a non-empty object: `content_type == "text"` with non-empty
/// `parts` → first part; else a string `text` field; else empty.
fn content_object(msg: &JsonObject) -> Option<String> {
    let content = msg
        .get("content")?
        .as_object()
        .filter(|o| !o.is_empty())?;

    if content.get("content_type").and_then(Value::as_str) == Some("text")
        && content.get("parts").is_some_and(truthy)
    {
        return Some(first_part(content));
    }
    if let Some(text) = content.get("text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    Some(String::new())
}

/// A truthy `text` field directly on the message.
fn text_field(msg: &JsonObject) -> Option<String> {
    let text = msg.get("text").filter(|v| truthy(v))?;
    Some(text.as_str().unwrap_or_default().to_string())
}

/// Doubly-wrapped shape: a non-empty `message` object whose `content` is
/// either an object with non-empty `parts` or a bare string.
fn wrapped_message(msg: &JsonObject) -> Option<String> {
    let inner = msg.get("message").filter(|v| truthy(v))?.as_object()?;
    match inner.get("content") {
        Some(Value::Object(content)) if content.get("parts").is_some_and(truthy) => {
            Some(first_part(content))
        }
        Some(Value::String(s)) => Some(s.clone()),
        _ => Some(String::new()),
    }
}

/// `content` directly as a string (oldest encoding).
fn content_string(msg: &JsonObject) -> Option<String> {
    match msg.get("content") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// First element of a `parts` array as a string; non-string or missing
/// elements normalize to an empty string.
fn first_part(content: &JsonObject) -> String {
    content
        .get("parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Extracts the timestamp from `create_time`, falling back to `timestamp`.
///
/// The fallback triggers on any non-truthy `create_time` (absent, null, 0,
/// empty string). A value that cannot be coerced to a finite float skips
/// the candidate.
fn extract_timestamp(msg: &JsonObject) -> Option<f64> {
    let ts = msg
        .get("create_time")
        .filter(|v| truthy(v))
        .or_else(|| msg.get("timestamp"))?;
    coerce_f64(ts)
}

/// Coerces a JSON value to a finite float: numbers and numeric strings only.
fn coerce_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Field-presence semantics shared by the fallback chains: a field counts
/// only when non-null, non-zero, and non-empty.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
