// Conversation workspace: session state, uploads and chat turns.
// All model calls go through llm_client.

pub mod conversation;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
pub mod uploads;
