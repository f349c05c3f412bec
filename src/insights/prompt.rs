//! Prompt assembly for the AI collaborators.

use crate::record::MessageRecord;

/// Maximum words per message in the summarization blob. Longer messages
/// are truncated to keep the request within the collaborator's context.
pub const MAX_WORDS_PER_MESSAGE: usize = 100;

/// System instruction for the summarization collaborator. Demands bare
/// JSON, although the parse cascade copes when the model ignores that.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a helpful assistant that is worldclass at parsing large amounts of data and deriving insights from them.
You are going to be given a string of data that contains all the messages from a user's chat history with ChatGPT.
Your task is to write a 4 sentence summary of the user based on the chat history and provide the 10 most prominent topics in the total chat history.
Do not overemphasize recent topics, focus on the overall usage patterns and trends.

CRITICAL: You must respond with ONLY valid JSON in exactly this format, with no additional text, markdown, or formatting:
{
    "summary": "Your 4 sentence summary here",
    "topics": ["topic1", "topic2", "topic3", "topic4", "topic5", "topic6", "topic7", "topic8", "topic9", "topic10"]
}

IMPORTANT RULES:
1. Start your response with { and end with }
2. Use double quotes for all strings and keys
3. Do not include any text before or after the JSON
4. Do not use markdown formatting like ```json
5. Ensure all strings are properly escaped
6. The summary should be exactly 4 sentences
7. The topics array should contain exactly 10 topics
8. Do not include any comments or explanations
9. Make sure all quotes are properly closed
10. Use simple, clear topic names (1-3 words each)"#;

/// Builds the message blob sent to the summarization collaborator.
///
/// User messages in record order, one per line, capped at
/// [`MAX_WORDS_PER_MESSAGE`] words each; a blank line separates
/// conversations.
pub fn message_blob(user: &[&MessageRecord]) -> String {
    let mut blob = String::new();
    let mut current_conversation = user.first().map(|r| r.conversation_id.clone());

    for rec in user {
        if let Some(current) = &current_conversation {
            if &rec.conversation_id != current {
                blob.push('\n');
                current_conversation = Some(rec.conversation_id.clone());
            }
        }
        blob.push_str(&truncate_words(&rec.content, MAX_WORDS_PER_MESSAGE));
        blob.push('\n');
    }
    blob
}

/// Builds the portrait prompt from the summary and topics.
pub fn image_prompt(summary: &str, topics: &[String]) -> String {
    format!(
        "Generate a drawing of a person in a setting that showcases their \
         personality, surrounded by objects that reflect their interests, \
         based on the following description: {summary} Interests: {}",
        topics.join(", ")
    )
}

fn truncate_words(content: &str, max_words: usize) -> String {
    let words: Vec<&str> = content.split_whitespace().collect();
    if words.len() > max_words {
        words[..max_words].join(" ")
    } else {
        content.to_string()
    }
}
