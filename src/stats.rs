//! Usage statistics over normalized message records.
//!
//! Ordinary tabular aggregation: filter to user-authored records, derive
//! calendar fields from the timestamp, then count and average. Nothing here
//! is schema-aware; everything interesting already happened in the
//! [`normalizer`](crate::normalizer).

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::NaiveDate;

use crate::error::{ChatwrappedError, Result};
use crate::record::MessageRecord;

/// Weekday labels in calendar order, used for the distribution report.
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Aggregated usage statistics for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageStats {
    /// Number of user-authored messages.
    pub total_user_messages: usize,
    /// Number of conversation entries in the export (empty ones included).
    pub total_conversations: usize,
    /// Total whitespace-separated words across all user messages.
    pub total_words: usize,

    /// Mean user messages per active calendar day.
    pub avg_requests_per_day: f64,
    /// Mean words per user message.
    pub avg_words_per_request: f64,
    /// Mean user messages per conversation (conversations with a known id).
    pub avg_conversation_length: f64,
    /// Highest user-message count on a single day.
    pub max_daily_requests: usize,

    /// Most frequent weekday name (first-seen order breaks ties).
    pub most_active_day: String,
    /// Most frequent hour of day, 0–23.
    pub peak_hour: u32,
    /// Most frequent month name.
    pub busiest_month: String,
    /// Fraction of user messages sent on Saturday or Sunday.
    pub weekend_share: f64,

    /// User messages per calendar day, date-ordered.
    pub daily_counts: BTreeMap<NaiveDate, usize>,
    /// User messages per hour of day, hour-ordered.
    pub hour_counts: BTreeMap<u32, usize>,
    /// User messages per weekday, Monday first.
    pub weekday_counts: Vec<(&'static str, usize)>,
}

impl UsageStats {
    /// Computes statistics from a normalized record sequence.
    ///
    /// `total_conversations` is passed in rather than derived because the
    /// export may contain conversations that produced no records at all.
    ///
    /// # Errors
    ///
    /// Returns [`ChatwrappedError::NoUserMessages`] when no record has
    /// `role == "user"`.
    pub fn from_records(records: &[MessageRecord], total_conversations: usize) -> Result<Self> {
        let user: Vec<&MessageRecord> = user_records(records);
        if user.is_empty() {
            return Err(ChatwrappedError::NoUserMessages);
        }

        let total_user_messages = user.len();
        let total_words: usize = user.iter().map(|r| r.word_count()).sum();

        let mut daily_counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        let mut hour_counts: BTreeMap<u32, usize> = BTreeMap::new();
        let mut weekday_totals: HashMap<&'static str, usize> = HashMap::new();
        let mut conv_lengths: HashMap<&str, usize> = HashMap::new();
        let mut weekend = 0usize;

        for rec in &user {
            if let Some(date) = rec.date() {
                *daily_counts.entry(date).or_insert(0) += 1;
            }
            if let Some(hour) = rec.hour() {
                *hour_counts.entry(hour).or_insert(0) += 1;
            }
            if let Some(day) = rec.weekday_name() {
                *weekday_totals.entry(day).or_insert(0) += 1;
            }
            if let Some(id) = rec.conversation_id.as_deref() {
                *conv_lengths.entry(id).or_insert(0) += 1;
            }
            if rec.is_weekend() {
                weekend += 1;
            }
        }

        let max_daily_requests = daily_counts.values().copied().max().unwrap_or(0);
        let avg_requests_per_day = mean_of_counts(daily_counts.values());
        let avg_conversation_length = mean_of_counts(conv_lengths.values());
        let avg_words_per_request = total_words as f64 / total_user_messages as f64;

        let most_active_day = mode(user.iter().filter_map(|r| r.weekday_name()))
            .unwrap_or_default()
            .to_string();
        let peak_hour = mode(user.iter().filter_map(|r| r.hour())).unwrap_or(0);
        let busiest_month = mode(user.iter().filter_map(|r| r.month_name()))
            .unwrap_or_default()
            .to_string();

        let weekday_counts = WEEKDAYS
            .iter()
            .map(|&day| (day, weekday_totals.get(day).copied().unwrap_or(0)))
            .collect();

        Ok(Self {
            total_user_messages,
            total_conversations,
            total_words,
            avg_requests_per_day,
            avg_words_per_request,
            avg_conversation_length,
            max_daily_requests,
            most_active_day,
            peak_hour,
            busiest_month,
            weekend_share: weekend as f64 / total_user_messages as f64,
            daily_counts,
            hour_counts,
            weekday_counts,
        })
    }
}

/// Filters a record sequence to user-authored records, preserving order.
pub fn user_records(records: &[MessageRecord]) -> Vec<&MessageRecord> {
    records.iter().filter(|r| r.is_user()).collect()
}

fn mean_of_counts<'a>(counts: impl ExactSizeIterator<Item = &'a usize>) -> f64 {
    let len = counts.len();
    if len == 0 {
        return 0.0;
    }
    counts.sum::<usize>() as f64 / len as f64
}

/// Most frequent value; ties go to the value seen first in iteration order.
fn mode<T: Eq + Hash + Copy>(values: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order: Vec<T> = Vec::new();
    for v in values {
        let entry = counts.entry(v).or_insert(0);
        if *entry == 0 {
            order.push(v);
        }
        *entry += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for v in order {
        let count = counts[&v];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((v, count));
        }
    }
    best.map(|(v, _)| v)
}
