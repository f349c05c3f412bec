//! # chatwrapped
//!
//! A Rust library for turning a ChatGPT data export (`conversations.json`)
//! into usage statistics and, optionally, AI-generated insights.
//!
//! ## Overview
//!
//! The pipeline is strictly one-way:
//!
//! 1. **Normalize** — [`normalizer::normalize`] flattens the raw export
//!    (any of the historical schema generations) into ordered
//!    [`MessageRecord`]s, skipping malformed entries instead of failing.
//! 2. **Aggregate** — [`stats::UsageStats`] derives counts, means, and
//!    time-of-day/weekday/month distributions from the user's messages.
//! 3. **Insights** (optional) — [`insights`] asks a summarization
//!    collaborator for a profile and topic list, recovers the JSON from a
//!    noisy response, and degrades to a locally computed fallback when
//!    anything goes wrong; a second collaborator draws a portrait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatwrapped::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let raw = std::fs::read_to_string("conversations.json")?;
//!     let raw: serde_json::Value = serde_json::from_str(&raw)?;
//!
//!     let export = normalize(&raw)?;
//!     let stats = UsageStats::from_records(&export.records, export.conversation_count)?;
//!
//!     println!("{} user messages", stats.total_user_messages);
//!     println!("most active on {}s", stats.most_active_day);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`normalizer`] — the core: raw JSON → flat records
//! - [`record`] — [`MessageRecord`] and its calendar derivations
//! - [`stats`] — [`UsageStats`](stats::UsageStats) aggregation
//! - [`insights`] — AI collaborators, response recovery, local fallback
//! - [`config`] — environment-supplied run configuration
//! - [`error`] — unified error types ([`ChatwrappedError`], [`Result`])
//! - [`cli`] — CLI argument types (behind the `cli` feature)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod insights;
pub mod normalizer;
pub mod record;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use error::{ChatwrappedError, Result};
pub use record::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatwrapped::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;

    pub use crate::error::{ChatwrappedError, Result};

    pub use crate::normalizer::{NormalizedExport, normalize};

    pub use crate::stats::{UsageStats, user_records};

    pub use crate::insights::{Insights, InsightsOrigin, local_insights};

    pub use crate::config::{RunConfig, RunContext};
}
