//! LLM client: the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Chat and evaluation go through `GenerativeBackend`, which `GeminiClient`
//! implements and tests replace with a scripted backend.
//!
//! Model: gemini-2.5-flash (hardcoded)

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The model used for all LLM calls.
pub const MODEL: &str = "gemini-2.5-flash";
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Prompt blocked by the model: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend-neutral request / response
// ────────────────────────────────────────────────────────────────────────────

/// A file handed to the model as inline data.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineFile {
    pub mime_type: String,
    /// Base64 payload without any `data:` prefix.
    pub data: String,
}

/// One `generateContent` call: attached files, a single text part, and the
/// generation settings.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub files: Vec<InlineFile>,
    pub text: String,
    pub temperature: Option<f32>,
    /// When set, the model is asked for `application/json` matching this schema.
    pub response_schema: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOutput {
    pub text: String,
    pub prompt_tokens: u32,
    pub output_tokens: u32,
}

/// Anything that can answer a `GenerateRequest`.
///
/// Carried in `AppState` as `Arc<dyn GenerativeBackend>`.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutput, LlmError>;
}

/// Calls the model and deserializes the reply text as JSON.
/// The request should carry a `response_schema` so the model answers in JSON.
pub async fn generate_json<T: DeserializeOwned>(
    backend: &dyn GenerativeBackend,
    request: &GenerateRequest,
) -> Result<T, LlmError> {
    let output = backend.generate(request).await?;
    parse_json_reply(&output.text)
}

/// Strips code fences and deserializes a model reply.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiSystemInstruction<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiBlob<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiBlob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }

    fn into_output(self) -> Result<GenerateOutput, LlmError> {
        let usage = self.usage_metadata.as_ref();
        let prompt_tokens = usage.map(|u| u.prompt_token_count).unwrap_or(0);
        let output_tokens = usage.map(|u| u.candidates_token_count).unwrap_or(0);

        match self.text().filter(|t| !t.is_empty()) {
            Some(text) => Ok(GenerateOutput {
                text,
                prompt_tokens,
                output_tokens,
            }),
            None => match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Err(LlmError::Blocked { reason }),
                None => Err(LlmError::EmptyContent),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` endpoint with retry logic.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, MODEL)
    }
}

fn build_request_body(request: &GenerateRequest) -> GeminiRequest<'_> {
    let mut parts: Vec<GeminiPart<'_>> = request
        .files
        .iter()
        .map(|f| GeminiPart::InlineData {
            inline_data: GeminiBlob {
                mime_type: &f.mime_type,
                data: &f.data,
            },
        })
        .collect();
    parts.push(GeminiPart::Text {
        text: &request.text,
    });

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user",
            parts,
        }],
        system_instruction: GeminiSystemInstruction {
            parts: vec![GeminiPart::Text {
                text: &request.system_instruction,
            }],
        },
        generation_config: GenerationConfig {
            temperature: request.temperature,
            response_mime_type: request
                .response_schema
                .as_ref()
                .map(|_| "application/json"),
            response_schema: request.response_schema.as_ref(),
        },
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    /// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutput, LlmError> {
        let body = build_request_body(request);
        let url = self.endpoint();

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let gemini_response: GeminiResponse = response.json().await?;
            let output = gemini_response.into_output()?;

            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
                output.prompt_tokens, output.output_tokens
            );

            return Ok(output);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
