//! Locally computed insights for when the collaborator is unusable.

use std::collections::HashMap;

use crate::record::MessageRecord;
use crate::stats::UsageStats;

/// Words ignored by the topic extractor.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our",
    "their", "mine", "yours", "hers", "ours", "theirs", "what", "when", "where", "how", "why",
    "which", "there", "here", "from", "about", "into", "please", "thanks",
];

/// Candidate pool size before stop-word filtering.
const CANDIDATE_POOL: usize = 20;
/// Number of topics to keep.
const TOPIC_COUNT: usize = 10;

/// Templated usage profile built from the statistics alone.
///
/// Deterministic: contains the exact message count and the average word
/// count formatted to one decimal place.
pub fn fallback_summary(stats: &UsageStats) -> String {
    format!(
        "This user has sent {} messages to ChatGPT with an average of {:.1} words per message. \
         They are most active during {}:00 and prefer {}s for their conversations. \
         The user appears to be engaged in regular communication with the AI assistant.",
        stats.total_user_messages,
        stats.avg_words_per_request,
        stats.peak_hour,
        stats.most_active_day,
    )
}

/// Topic labels from stop-word-filtered word frequencies.
///
/// Takes the 20 most frequent lowercased words across all user messages
/// (ties broken by first appearance), drops stop words and words of at
/// most 3 characters, and keeps up to 10.
pub fn fallback_topics(user: &[&MessageRecord]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for rec in user {
        for word in rec.content.to_lowercase().split_whitespace() {
            let entry = counts.entry(word.to_string()).or_insert(0);
            if *entry == 0 {
                order.push(word.to_string());
            }
            *entry += 1;
        }
    }

    // stable sort keeps first-seen order within equal counts
    order.sort_by_key(|word| std::cmp::Reverse(counts[word]));

    order
        .into_iter()
        .take(CANDIDATE_POOL)
        .filter(|word| word.len() > 3 && !STOP_WORDS.contains(&word.as_str()))
        .take(TOPIC_COUNT)
        .collect()
}
