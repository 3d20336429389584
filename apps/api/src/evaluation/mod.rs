// Strategic evaluation: structured model output, score sanitization and the
// GO / DISCUSS / NO-GO recommendation.
// All model calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scoring;
