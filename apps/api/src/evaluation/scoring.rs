//! Metric scoring. Turns the model's raw metric values into bounded scores
//! and derives the GO / DISCUSS / NO-GO recommendation.
//!
//! The model is asked for numbers but routinely answers with strings such as
//! `"4.5 / 5"`. Nothing in here fails: an unreadable value becomes the
//! minimum score, which biases the outcome toward NO-GO.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;
/// Substituted for any metric value that carries no usable number.
pub const DEFAULT_SCORE: f64 = MIN_SCORE;

const GO_THRESHOLD: f64 = 3.0;
const DISCUSS_THRESHOLD: f64 = 2.5;

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());

/// Categorical outcome of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "DISCUSS")]
    Discuss,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl Recommendation {
    /// Thresholds: ≥3.0 GO, 2.5–2.99 DISCUSS, below 2.5 NO-GO.
    pub fn from_total(total: f64) -> Self {
        if total >= GO_THRESHOLD {
            Recommendation::Go
        } else if total >= DISCUSS_THRESHOLD {
            Recommendation::Discuss
        } else {
            Recommendation::NoGo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Go => "GO",
            Recommendation::Discuss => "DISCUSS",
            Recommendation::NoGo => "NO-GO",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four VAVE axes after sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub fame: f64,
    pub fun: f64,
    pub money: f64,
    pub strategy: f64,
}

/// Sanitized metrics plus the derived total and recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationOutcome {
    pub metrics: MetricSet,
    pub total: f64,
    pub recommendation: Recommendation,
}

/// Coerces a raw metric value into a score within [1.0, 5.0].
///
/// Numbers are clamped. Strings contribute their first integer or decimal
/// substring (`"4.5 / 5"` → 4.5). Anything else yields [`DEFAULT_SCORE`].
/// Arrays and objects are not stringified first, so `[4]` scores the default.
pub fn sanitize(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(clamp_score).unwrap_or(DEFAULT_SCORE),
        Value::String(s) => sanitize_str(s),
        _ => DEFAULT_SCORE,
    }
}

/// String half of [`sanitize`].
pub fn sanitize_str(raw: &str) -> f64 {
    FIRST_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(clamp_score)
        .unwrap_or(DEFAULT_SCORE)
}

fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return DEFAULT_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Averages four sanitized scores into a total rounded to two decimals and
/// picks the recommendation for it.
pub fn aggregate(fame: f64, fun: f64, money: f64, strategy: f64) -> EvaluationOutcome {
    let sum = fame + fun + money + strategy;
    let average = (sum / 4.0).min(MAX_SCORE);
    let total = round_2dp(average);

    EvaluationOutcome {
        metrics: MetricSet {
            fame,
            fun,
            money,
            strategy,
        },
        total,
        recommendation: Recommendation::from_total(total),
    }
}

/// Sanitizes four raw values and aggregates them.
pub fn score_raw(fame: &Value, fun: &Value, money: &Value, strategy: &Value) -> EvaluationOutcome {
    aggregate(
        sanitize(fame),
        sanitize(fun),
        sanitize(money),
        sanitize(strategy),
    )
}

/// Half away from zero: 2.625 → 2.63.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_numeric_inputs_are_clamped() {
        for n in [-3.0_f64, 0.0, 0.99, 1.0, 2.7, 4.5, 5.0, 5.01, 42.0] {
            assert!(approx(sanitize(&json!(n)), n.clamp(1.0, 5.0)), "input {n}");
        }
        assert_eq!(sanitize(&json!(3)), 3.0);
        assert_eq!(sanitize(&json!(-1)), 1.0);
    }

    #[test]
    fn test_string_takes_first_number() {
        assert_eq!(sanitize(&json!("4.5 / 5")), 4.5);
        assert_eq!(sanitize(&json!("4.5/5")), 4.5);
        assert_eq!(sanitize(&json!("Score: 3")), 3.0);
        assert_eq!(sanitize(&json!("about 2.25 out of 5")), 2.25);
    }

    #[test]
    fn test_string_number_is_clamped() {
        assert_eq!(sanitize(&json!("9 of 10")), 5.0);
        assert_eq!(sanitize(&json!("0.5")), 1.0);
    }

    #[test]
    fn test_string_without_number_defaults_to_minimum() {
        assert_eq!(sanitize(&json!("N/A")), 1.0);
        assert_eq!(sanitize(&json!("bad")), 1.0);
        assert_eq!(sanitize(&json!("")), 1.0);
    }

    #[test]
    fn test_minus_sign_is_not_part_of_the_number() {
        // Only digits are matched, so "-4" reads as 4.
        assert_eq!(sanitize(&json!("-4")), 4.0);
    }

    #[test]
    fn test_trailing_dot_is_ignored() {
        assert_eq!(sanitize(&json!("4. great")), 4.0);
    }

    #[test]
    fn test_non_scalar_values_default_to_minimum() {
        assert_eq!(sanitize(&Value::Null), 1.0);
        assert_eq!(sanitize(&json!(true)), 1.0);
        assert_eq!(sanitize(&json!([4.0])), 1.0);
        assert_eq!(sanitize(&json!({"score": 4})), 1.0);
    }

    #[test]
    fn test_aggregate_all_max_is_go() {
        let out = aggregate(5.0, 5.0, 5.0, 5.0);
        assert_eq!(out.total, 5.0);
        assert_eq!(out.recommendation, Recommendation::Go);
    }

    #[test]
    fn test_aggregate_all_min_is_no_go() {
        let out = aggregate(1.0, 1.0, 1.0, 1.0);
        assert_eq!(out.total, 1.0);
        assert_eq!(out.recommendation, Recommendation::NoGo);
    }

    #[test]
    fn test_aggregate_three_is_go() {
        let out = aggregate(3.0, 3.0, 3.0, 3.0);
        assert_eq!(out.total, 3.0);
        assert_eq!(out.recommendation, Recommendation::Go);
    }

    #[test]
    fn test_aggregate_two_and_a_half_is_discuss() {
        let out = aggregate(2.0, 3.0, 2.0, 3.0);
        assert_eq!(out.total, 2.5);
        assert_eq!(out.recommendation, Recommendation::Discuss);
    }

    #[test]
    fn test_aggregate_just_below_discuss_is_no_go() {
        let out = aggregate(2.0, 2.0, 3.0, 2.8);
        assert_eq!(out.total, 2.45);
        assert_eq!(out.recommendation, Recommendation::NoGo);
    }

    #[test]
    fn test_mixed_raw_inputs() {
        let out = score_raw(&json!("4.5/5"), &json!("bad"), &json!(2), &json!(3));
        assert_eq!(out.metrics.fame, 4.5);
        assert_eq!(out.metrics.fun, 1.0);
        assert_eq!(out.total, 2.63);
        assert_eq!(out.recommendation, Recommendation::Discuss);
    }

    #[test]
    fn test_total_is_capped_even_for_unsanitized_inputs() {
        let out = aggregate(9.0, 9.0, 9.0, 9.0);
        assert_eq!(out.total, 5.0);
    }

    #[test]
    fn test_reaggregating_matches_direct_mean() {
        let sets = [
            (1.0, 2.0, 3.0, 4.0),
            (4.4, 3.3, 2.2, 1.1),
            (2.75, 3.1, 4.05, 1.0),
        ];
        for (a, b, c, d) in sets {
            let first = score_raw(&json!(a), &json!(b), &json!(c), &json!(d));
            let again = aggregate(
                first.metrics.fame,
                first.metrics.fun,
                first.metrics.money,
                first.metrics.strategy,
            );
            let direct = round_2dp((a + b + c + d) / 4.0);
            assert_eq!(first.total, again.total);
            assert!(approx(first.total, direct));
        }
    }

    #[test]
    fn test_recommendation_serde_labels() {
        assert_eq!(serde_json::to_string(&Recommendation::NoGo).unwrap(), r#""NO-GO""#);
        let rec: Recommendation = serde_json::from_str(r#""DISCUSS""#).unwrap();
        assert_eq!(rec, Recommendation::Discuss);
        assert_eq!(Recommendation::Go.to_string(), "GO");
    }
}
