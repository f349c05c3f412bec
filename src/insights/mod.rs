//! AI-powered insights over the normalized export.
//!
//! Two external collaborators, both optional and both failure-contained:
//!
//! - **Summarization** ([`gemini`]): sends the user's message history and
//!   expects a JSON object with a four-sentence summary and ten topics.
//!   The response is recovered through the [`parse`] cascade; if the call
//!   or every parse strategy fails, [`fallback`] computes a deterministic
//!   local substitute.
//! - **Image generation** ([`image`]): turns the summary and topics into a
//!   portrait prompt. Failures surface as a notice, never as an error.
//!
//! Nothing in this module can abort the primary statistics output.

pub mod fallback;
pub mod parse;
pub mod prompt;

#[cfg(feature = "insights")]
pub mod gemini;
#[cfg(feature = "insights")]
pub mod image;

#[cfg(feature = "insights")]
use tracing::warn;

use crate::record::MessageRecord;
use crate::stats::{UsageStats, user_records};

/// Where a set of insights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightsOrigin {
    /// Produced by the summarization collaborator.
    Collaborator,
    /// Computed locally after the collaborator failed or was unusable.
    Fallback,
}

/// A usage summary plus discussion topics.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    /// Four-sentence (collaborator) or single-sentence (fallback) profile.
    pub summary: String,
    /// Up to ten short topic labels.
    pub topics: Vec<String>,
    /// Provenance, mostly for display and tests.
    pub origin: InsightsOrigin,
}

/// Computes insights without any collaborator: templated summary from the
/// statistics plus word-frequency topics from the user messages.
pub fn local_insights(stats: &UsageStats, records: &[MessageRecord]) -> Insights {
    let user = user_records(records);
    Insights {
        summary: fallback::fallback_summary(stats),
        topics: fallback::fallback_topics(&user),
        origin: InsightsOrigin::Fallback,
    }
}

/// Runs the summarization collaborator and recovers its response, degrading
/// to [`local_insights`] on any failure.
#[cfg(feature = "insights")]
pub fn generate(
    client: &gemini::SummaryClient,
    records: &[MessageRecord],
    stats: &UsageStats,
) -> Insights {
    let user = user_records(records);
    let blob = prompt::message_blob(&user);

    match client.summarize(&blob) {
        Ok(text) => match parse::extract_insights(&text) {
            Some(insights) => insights,
            None => {
                warn!("all response parsing strategies failed, using local fallback");
                local_insights(stats, records)
            }
        },
        Err(err) => {
            warn!(error = %err, "summarization collaborator failed, using local fallback");
            local_insights(stats, records)
        }
    }
}
