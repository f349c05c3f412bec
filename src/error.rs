//! Unified error types for chatwrapped.
//!
//! This module provides a single [`ChatwrappedError`] enum that covers all
//! error cases in the library.
//!
//! # Error Handling Philosophy
//!
//! The taxonomy is deliberately small:
//!
//! - **Fatal input errors** ([`Json`](ChatwrappedError::Json),
//!   [`InvalidExport`](ChatwrappedError::InvalidExport),
//!   [`EmptyExport`](ChatwrappedError::EmptyExport),
//!   [`NoUserMessages`](ChatwrappedError::NoUserMessages)) halt the run
//!   before any statistics are produced.
//! - **Per-entry problems** (a malformed conversation, node, or message) are
//!   not errors at all — the normalizer skips them silently.
//! - **Collaborator errors** ([`Http`](ChatwrappedError::Http),
//!   [`Collaborator`](ChatwrappedError::Collaborator)) are contained by the
//!   insights stage and never propagate to the caller of the main pipeline.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatwrapped operations.
///
/// # Example
///
/// ```rust
/// use chatwrapped::error::Result;
/// use chatwrapped::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatwrappedError>;

/// The error type for all chatwrapped operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatwrappedError {
    /// An I/O error occurred, typically while reading the export file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The uploaded document could not be parsed as JSON at all.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed as JSON but its root cannot be interpreted as a
    /// conversation collection.
    #[error("Invalid export: {message}")]
    InvalidExport {
        /// Description of what's wrong with the root value
        message: String,
    },

    /// Normalization succeeded but produced zero message records.
    ///
    /// Usually means the wrong file was uploaded (not `conversations.json`).
    #[error("Could not find any messages in the export - check the file")]
    EmptyExport,

    /// The export contains messages, but none with `role == "user"`.
    #[error("No user messages were detected in the export")]
    NoUserMessages,

    /// HTTP transport failure while talking to an AI collaborator.
    #[cfg(feature = "insights")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An AI collaborator responded, but not in a usable way.
    #[cfg(feature = "insights")]
    #[error("{service} collaborator error: {message}")]
    Collaborator {
        /// Which collaborator failed (e.g., "summarization", "image")
        service: &'static str,
        /// Description of the failure
        message: String,
    },
}

impl ChatwrappedError {
    /// Creates an invalid export error.
    pub fn invalid_export(message: impl Into<String>) -> Self {
        ChatwrappedError::InvalidExport {
            message: message.into(),
        }
    }

    /// Creates a collaborator error.
    #[cfg(feature = "insights")]
    pub fn collaborator(service: &'static str, message: impl Into<String>) -> Self {
        ChatwrappedError::Collaborator {
            service,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatwrappedError::Io(_))
    }

    /// Returns `true` if this error means the input file is unusable
    /// (as opposed to a downstream or collaborator failure).
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            ChatwrappedError::Json(_)
                | ChatwrappedError::InvalidExport { .. }
                | ChatwrappedError::EmptyExport
                | ChatwrappedError::NoUserMessages
        )
    }
}
