// Prompt constants and response schema for evaluation generation.

use serde_json::{json, Value};

use crate::llm_client::prompts::{ASSISTANT_PERSONA, SCORE_SCALE_INSTRUCTION};

/// Builds the system instruction for evaluation generation.
pub fn generation_system_instruction() -> String {
    format!(
        "{ASSISTANT_PERSONA} Generate a JSON evaluation based on the VAVE Framework.

VAVE FRAMEWORK:
1. **NB Info Grid**: Extract concise data for the 6-box grid.
2. **Metrics**: Evaluate FAME, FUN, MONEY, STRATEGY.
   - **CRITICAL**: {SCORE_SCALE_INSTRUCTION}
   - **DO NOT** calculate the total yourself.

Analyze all conversation history and uploaded files.
"
    )
}

/// Appended after the conversation history.
pub const GENERATION_PROMPT: &str = "
Generate a final structured evaluation JSON.

For 'nbInfo':
- Map strictly to: Client & Type, Project Basics, Scope, Pitch Deliverables, Fees, Time Frame.
- Use concise bullet points.

For 'metrics':
- Provide raw scores (1.0 to 5.0) for Fame, Fun, Money, Strategy.
";

/// Session note after a successful evaluation.
pub const EVALUATION_READY: &str = "I have generated the strategic evaluation report and NB Info sheet \
    based on the available data. You can view them now.";

/// Session note after a failed evaluation.
pub const EVALUATION_FAILED: &str = "Failed to generate the structured report. \
    Please try clarifying more details in the chat first.";

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": string() })
}

/// Gemini `responseSchema` for the evaluation reply.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "details": {
                "type": "OBJECT",
                "properties": {
                    "clientName": string(),
                    "projectName": string(),
                    "type": string(),
                    "location": string(),
                    "budget": string(),
                    "timeline": string(),
                    "scope": string(),
                    "deliverables": string_list(),
                    "summary": string()
                }
            },
            "metrics": {
                "type": "OBJECT",
                "properties": {
                    "fame": number(),
                    "fun": number(),
                    "money": number(),
                    "strategy": number(),
                    "total": number(),
                    "recommendation": { "type": "STRING", "enum": ["GO", "NO-GO", "DISCUSS"] }
                }
            },
            "nbInfo": {
                "type": "OBJECT",
                "properties": {
                    "clientAndType": {
                        "type": "OBJECT",
                        "properties": {
                            "projectName": string(),
                            "type": string(),
                            "businessModel": string()
                        }
                    },
                    "projectBasics": {
                        "type": "OBJECT",
                        "properties": {
                            "exhibitionType": string(),
                            "topic": string(),
                            "size": string(),
                            "location": string(),
                            "locationType": string(),
                            "experienceLevel": string()
                        }
                    },
                    "scope": string_list(),
                    "pitchDeliverables": string_list(),
                    "fees": {
                        "type": "OBJECT",
                        "properties": {
                            "pitchFee": string(),
                            "productionFee": string(),
                            "agencyFee": string()
                        }
                    },
                    "timeFrame": string_list()
                }
            },
            "missingInfo": string_list()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_all_sections() {
        let schema = response_schema();
        let props = &schema["properties"];
        for key in ["details", "metrics", "nbInfo", "missingInfo"] {
            assert!(props.get(key).is_some(), "missing {key}");
        }
        assert_eq!(props["metrics"]["properties"]["fame"]["type"], "NUMBER");
        assert_eq!(props["nbInfo"]["properties"]["timeFrame"]["type"], "ARRAY");
    }

    #[test]
    fn test_system_instruction_forbids_totals() {
        let system = generation_system_instruction();
        assert!(system.contains("DO NOT** calculate the total"));
        assert!(system.contains("1.0 to 5.0"));
    }
}
