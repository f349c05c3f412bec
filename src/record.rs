//! Normalized message record type.
//!
//! This module provides [`MessageRecord`], the flat representation of one
//! message from a ChatGPT data export. The normalizer converts every schema
//! variant into this structure, enabling uniform aggregation regardless of
//! which export generation produced the file.
//!
//! # Overview
//!
//! A record consists of:
//! - **Required**: `timestamp` (seconds since the Unix epoch) — candidates
//!   without one are never turned into records
//! - **Inherited**: `conversation_id` from the parent conversation
//! - **Best-effort**: `role` and `content`, defaulting to empty strings
//!
//! # Examples
//!
//! ```
//! use chatwrapped::MessageRecord;
//!
//! let rec = MessageRecord::new(Some("c1".into()), "user", "hi there", 1700000000.0);
//! assert!(rec.is_user());
//! assert_eq!(rec.word_count(), 2);
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// The flat, normalized representation of one exported message.
///
/// Records are immutable once produced and live for the duration of one
/// analysis run; there is no persistence layer.
///
/// # Serialization
///
/// Implements `Serialize` and `Deserialize` so record sequences can be
/// dumped as JSON/JSONL for inspection. `conversation_id` serializes as
/// `null` when unknown, matching the source export's looseness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Identifier of the conversation this message belongs to.
    ///
    /// `None` when the conversation entry carried neither `id` nor
    /// `conversation_id`.
    pub conversation_id: Option<String>,

    /// Author role (`"user"`, `"assistant"`, `"system"`, ...).
    ///
    /// Empty string when no role-bearing field was found — never `None`.
    pub role: String,

    /// Text content of the message. Empty string when no known content
    /// encoding yielded anything.
    pub content: String,

    /// Seconds since the Unix epoch. Always present and finite; candidates
    /// lacking a coercible timestamp are dropped by the normalizer.
    pub timestamp: f64,
}

impl MessageRecord {
    /// Creates a new record.
    pub fn new(
        conversation_id: Option<String>,
        role: impl Into<String>,
        content: impl Into<String>,
        timestamp: f64,
    ) -> Self {
        Self {
            conversation_id,
            role: role.into(),
            content: content.into(),
            timestamp,
        }
    }

    /// Returns `true` if this message was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    /// Number of whitespace-separated tokens in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// The timestamp as a UTC datetime.
    ///
    /// Returns `None` for timestamps outside chrono's representable range
    /// (about ±262,000 years — effectively only garbage inputs).
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        let secs = self.timestamp.floor();
        let nanos = ((self.timestamp - secs) * 1_000_000_000.0) as u32;
        if secs < i64::MIN as f64 || secs > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp(secs as i64, nanos)
    }

    /// Calendar date (UTC) of the message.
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date_naive())
    }

    /// Hour of day (UTC), 0–23.
    pub fn hour(&self) -> Option<u32> {
        self.datetime().map(|dt| dt.hour())
    }

    /// English weekday name ("Monday" ... "Sunday").
    pub fn weekday_name(&self) -> Option<&'static str> {
        self.datetime().map(|dt| match dt.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        })
    }

    /// English month name ("January" ... "December").
    pub fn month_name(&self) -> Option<&'static str> {
        const MONTHS: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        self.datetime().map(|dt| MONTHS[dt.month0() as usize])
    }

    /// Returns `true` if the message was sent on a Saturday or Sunday (UTC).
    pub fn is_weekend(&self) -> bool {
        self.datetime()
            .map(|dt| matches!(dt.weekday(), Weekday::Sat | Weekday::Sun))
            .unwrap_or(false)
    }
}
