//! Evaluation data model. Field names serialize in camelCase so exported JSON
//! matches what the report and deck consumers read.
//!
//! `Raw*` types mirror what the model returns: every field optional and the
//! metric values untyped, since nothing about the reply is guaranteed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::evaluation::scoring::{EvaluationOutcome, Recommendation};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDetails {
    #[serde(deserialize_with = "lenient::string")]
    pub client_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub project_name: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::string")]
    pub project_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub budget: String,
    #[serde(deserialize_with = "lenient::string")]
    pub timeline: String,
    #[serde(deserialize_with = "lenient::string")]
    pub scope: String,
    #[serde(deserialize_with = "lenient::list")]
    pub deliverables: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub fame: f64,
    pub fun: f64,
    pub money: f64,
    pub strategy: f64,
    pub total: f64,
    pub recommendation: Recommendation,
}

impl From<EvaluationOutcome> for ProjectMetrics {
    fn from(outcome: EvaluationOutcome) -> Self {
        Self {
            fame: outcome.metrics.fame,
            fun: outcome.metrics.fun,
            money: outcome.metrics.money,
            strategy: outcome.metrics.strategy,
            total: outcome.total,
            recommendation: outcome.recommendation,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientAndType {
    #[serde(deserialize_with = "lenient::string")]
    pub project_name: String,
    /// RFP / selected invitation.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::string")]
    pub inquiry_type: String,
    /// Design / concept / consultancy.
    #[serde(deserialize_with = "lenient::string")]
    pub business_model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectBasics {
    #[serde(deserialize_with = "lenient::string")]
    pub exhibition_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub topic: String,
    #[serde(deserialize_with = "lenient::string")]
    pub size: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location_type: String,
    #[serde(deserialize_with = "lenient::string")]
    pub experience_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fees {
    #[serde(deserialize_with = "lenient::string")]
    pub pitch_fee: String,
    #[serde(deserialize_with = "lenient::string")]
    pub production_fee: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::optional_string")]
    pub agency_fee: Option<String>,
}

/// The six-box NB Info grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NbInformation {
    #[serde(deserialize_with = "lenient::object")]
    pub client_and_type: ClientAndType,
    #[serde(deserialize_with = "lenient::object")]
    pub project_basics: ProjectBasics,
    #[serde(deserialize_with = "lenient::list")]
    pub scope: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub pitch_deliverables: Vec<String>,
    #[serde(deserialize_with = "lenient::object")]
    pub fees: Fees,
    #[serde(deserialize_with = "lenient::list")]
    pub time_frame: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub details: ProjectDetails,
    pub metrics: ProjectMetrics,
    pub nb_info: NbInformation,
    pub missing_info: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Untrusted model output
// ────────────────────────────────────────────────────────────────────────────

/// Metric values exactly as the model sent them. Missing axes stay `Null`.
/// Any `total` or `recommendation` the model adds is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMetrics {
    pub fame: Value,
    pub fun: Value,
    pub money: Value,
    pub strategy: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEvaluation {
    #[serde(deserialize_with = "lenient::object")]
    pub details: ProjectDetails,
    #[serde(deserialize_with = "lenient::object")]
    pub metrics: RawMetrics,
    #[serde(deserialize_with = "lenient::object")]
    pub nb_info: NbInformation,
    #[serde(deserialize_with = "lenient::list")]
    pub missing_info: Vec<String>,
}

/// Field deserializers for model output. A field of the wrong shape degrades
/// to its default instead of failing the whole reply.
mod lenient {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items.into_iter().filter_map(scalar_text).collect();
                Some(parts.join(", "))
            }
            other => Some(other.to_string()),
        }
    }

    /// Null → empty; numbers and booleans → their text; lists → joined.
    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(scalar_text(Value::deserialize(deserializer)?).filter(|s| !s.is_empty()))
    }

    /// Null → empty; a lone value becomes a one-item list.
    pub fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            other => vec![other],
        };
        Ok(items
            .into_iter()
            .filter_map(scalar_text)
            .filter(|s| !s.trim().is_empty())
            .collect())
    }

    /// Anything that is not a usable object becomes the default.
    pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}
