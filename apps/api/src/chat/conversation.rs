//! Chat turns: one model call per user message. A failed call never
//! surfaces as an error: the user gets an apology in the transcript instead.

use tracing::{error, info};

use crate::chat::models::Message;
use crate::chat::prompts::{chat_system_instruction, CHAT_TEMPERATURE, EMPTY_REPLY_FALLBACK, ERROR_REPLY};
use crate::llm_client::{GenerateRequest, GenerativeBackend, InlineFile, LlmError};

/// Builds the text part: prior messages as `User:` / `AI:` lines, then the
/// new input. With no history the new input is sent alone.
pub fn build_chat_prompt(history: &[Message], new_message: &str) -> String {
    if history.is_empty() {
        return new_message.to_string();
    }

    let mut prompt = String::from("Previous conversation context:\n");
    for msg in history {
        prompt.push_str(msg.role.speaker());
        prompt.push_str(": ");
        prompt.push_str(&msg.text);
        prompt.push('\n');
    }
    prompt.push_str("\nCurrent User Input:\n");
    prompt.push_str(new_message);
    prompt
}

/// Sends one chat turn and returns the reply text to store.
pub async fn send_message(
    backend: &dyn GenerativeBackend,
    history: &[Message],
    new_message: &str,
    files: Vec<InlineFile>,
) -> String {
    let request = GenerateRequest {
        system_instruction: chat_system_instruction(),
        text: build_chat_prompt(history, new_message),
        files,
        temperature: Some(CHAT_TEMPERATURE),
        response_schema: None,
    };

    match backend.generate(&request).await {
        Ok(output) if output.text.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
        Err(LlmError::EmptyContent) => EMPTY_REPLY_FALLBACK.to_string(),
        Ok(output) => {
            info!(
                history_len = history.len(),
                files = request.files.len(),
                "Chat turn answered"
            );
            output.text
        }
        Err(e) => {
            error!("Gemini chat error: {e}");
            ERROR_REPLY.to_string()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::chat::models::MessageRole;
    use crate::llm_client::{GenerateOutput, LlmError};

    /// Replays canned replies in order and records every request it sees.
    #[derive(Default)]
    pub(crate) struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        pub(crate) seen: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn last_request(&self) -> GenerateRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl GenerativeBackend for ScriptedBackend {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutput, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))?;
            Ok(GenerateOutput {
                text: reply,
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_prompt_without_history_is_just_input() {
        assert_eq!(build_chat_prompt(&[], "Hi"), "Hi");
    }

    #[test]
    fn test_prompt_replays_history_with_speakers() {
        let history = vec![
            Message::new(MessageRole::Model, "Hello."),
            Message::new(MessageRole::User, "Budget is 2M."),
        ];
        let prompt = build_chat_prompt(&history, "Timeline?");
        assert_eq!(
            prompt,
            "Previous conversation context:\nAI: Hello.\nUser: Budget is 2M.\n\nCurrent User Input:\nTimeline?"
        );
    }

    #[tokio::test]
    async fn test_send_message_returns_reply_and_sends_settings() {
        let backend = ScriptedBackend::new(vec![Ok("A museum pitch in Berlin.".to_string())]);
        let files = vec![InlineFile {
            mime_type: "application/pdf".to_string(),
            data: "AA==".to_string(),
        }];

        let reply = send_message(&backend, &[], "Summarize", files).await;
        assert_eq!(reply, "A museum pitch in Berlin.");

        let request = backend.last_request();
        assert_eq!(request.files.len(), 1);
        assert_eq!(request.temperature, Some(CHAT_TEMPERATURE));
        assert!(request.response_schema.is_none());
        assert!(request.system_instruction.contains("VAVE"));
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let backend = ScriptedBackend::new(vec![Ok("  ".to_string())]);
        let reply = send_message(&backend, &[], "Hi", vec![]).await;
        assert_eq!(reply, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_empty_content_error_uses_fallback() {
        let backend = ScriptedBackend::new(vec![Err(LlmError::EmptyContent)]);
        let reply = send_message(&backend, &[], "Hi", vec![]).await;
        assert_eq!(reply, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_backend_error_becomes_apology() {
        let backend = ScriptedBackend::new(vec![Err(LlmError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        })]);
        let reply = send_message(&backend, &[], "Hi", vec![]).await;
        assert_eq!(reply, ERROR_REPLY);
    }
}
