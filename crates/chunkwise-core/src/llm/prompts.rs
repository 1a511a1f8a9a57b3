//! Prompt templates used by the summarizer
use crate::core_types::Role;

const SUMMARY_PROMPT: &str = "Summarize this document :\n\n{chunk}\n";

/// Prefix recorded on the user message that pairs with each chunk summary.
pub const SUMMARY_REQUEST_PREFIX: &str = "summarize: ";

/// Builds the single-prompt request for one chunk. A non-zero
/// `summary_target_chars` is passed along as a length hint.
pub fn summary_prompt(chunk: &str, summary_target_chars: usize) -> String {
    let mut prompt = SUMMARY_PROMPT.replace("{chunk}", chunk);
    if summary_target_chars > 0 {
        prompt.push_str(&format!(
            "\nKeep the summary under {} characters.\n",
            summary_target_chars
        ));
    }
    prompt
}

/// Content of the conversation entry that records a chunk was summarized.
pub fn summary_request_record(chunk: &str) -> (Role, String) {
    (Role::User, format!("{}{}", SUMMARY_REQUEST_PREFIX, chunk))
}
