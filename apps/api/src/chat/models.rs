use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm_client::InlineFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Model => "model",
        }
    }

    /// Speaker label used when replaying history into a chat prompt.
    pub fn speaker(&self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Model => "AI",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Set on messages the service writes itself (greeting, status notes).
    #[serde(default)]
    pub is_system: bool,
}

impl Message {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
            is_system: false,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            is_system: true,
            ..Self::new(MessageRole::Model, text)
        }
    }
}

/// A document or recording attached to the session, held base64-encoded.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size: usize,
    pub data: String,
}

impl UploadedFile {
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            id: self.id,
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.size,
            is_audio: self.mime_type.starts_with("audio/"),
        }
    }

    pub fn to_inline(&self) -> InlineFile {
        InlineFile {
            mime_type: self.mime_type.clone(),
            data: self.data.clone(),
        }
    }
}

/// What the API reports about an upload. Never carries the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size: usize,
    pub is_audio: bool,
}
