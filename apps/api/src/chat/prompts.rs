// Prompt constants for the chat conversation.

use crate::llm_client::prompts::{ASSISTANT_PERSONA, VAVE_AXES};

/// Temperature for chat turns. Kept low so answers stay factual.
pub const CHAT_TEMPERATURE: f32 = 0.2;

/// First message of every session, shown as coming from the model.
pub const GREETING: &str = "Hello. I am your VAVE New Business Assistant. \
    Please upload the RFP, meeting recording, or project documents, \
    and I will help you evaluate the strategic fit.";

/// Returned when the model answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I analyzed the content.";

/// Returned in place of a model reply when the call fails.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error communicating with the AI service. \
    Please ensure your API key is valid.";

/// Builds the system instruction for chat turns.
pub fn chat_system_instruction() -> String {
    format!(
        "{ASSISTANT_PERSONA}

ROLE:
You assist in evaluating new business inquiries (RFPs) using the VAVE Strategic Framework ({VAVE_AXES}).

INSTRUCTIONS:
1. **GENERAL CHAT**: If the user asks what you do, explain clearly: \"I analyze project documents to extract key data and evaluate strategic fit based on the VAVE metrics.\"
2. **FILE ANALYSIS**: When files are provided, start with a complete 1-sentence summary of the project. If critical info (Budget, Timeline, Scope) is missing, ask 1-2 direct clarifying questions.
3. **STYLE**: Be professional, direct, and efficient. Always use complete sentences.
"
    )
}

/// User message recorded when files are uploaded.
pub fn upload_message(file_names: &[&str]) -> String {
    format!(
        "I have uploaded {} new file(s): {}. Please analyze them against the VAVE framework.",
        file_names.len(),
        file_names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_message_lists_files() {
        let msg = upload_message(&["rfp.pdf", "kickoff.mp3"]);
        assert_eq!(
            msg,
            "I have uploaded 2 new file(s): rfp.pdf, kickoff.mp3. Please analyze them against the VAVE framework."
        );
    }

    #[test]
    fn test_system_instruction_names_axes() {
        let system = chat_system_instruction();
        assert!(system.starts_with(ASSISTANT_PERSONA));
        assert!(system.contains("Fame, Fun, Money, Strategy"));
    }
}
