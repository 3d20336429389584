use anyhow::Result;

use crate::evaluation::models::EvaluationResult;

/// Pretty-printed evaluation, two-space indented.
pub fn to_pretty_json(evaluation: &EvaluationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}

/// `{client}_vave_data.json`, or `project_vave_data.json` without a client.
pub fn download_filename(evaluation: &EvaluationResult) -> String {
    let client = evaluation.details.client_name.trim();
    let stem = if client.is_empty() { "project" } else { client };
    format!("{}_vave_data.json", sanitize_filename(stem))
}

/// Keeps the name usable inside a quoted Content-Disposition header.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
