//! Slide deck outline for the two slides of the evaluation export, described
//! independently of any presentation library. Positions are in inches on a
//! 10 × 5.625 widescreen slide.

use serde::{Deserialize, Serialize};

use crate::evaluation::models::{EvaluationResult, NbInformation, ProjectMetrics};
use crate::evaluation::scoring::Recommendation;
use crate::export::json::sanitize_filename;

pub const PRIMARY_COLOR: &str = "6C3AFF";
const SUBTITLE_COLOR: &str = "363636";
const GO_COLOR: &str = "00AA00";
const NOT_GO_COLOR: &str = "AA0000";
const TABLE_FILL: &str = "F7F7F7";
const TABLE_BORDER: &str = "CCCCCC";
const BOX_BODY_FILL: &str = "EEEEEE";

// 3 × 2 NB Info grid.
const BOX_W: f32 = 3.0;
const BOX_H: f32 = 2.2;
const BOX_HEADER_H: f32 = 0.4;
const GRID_X: f32 = 0.5;
const GRID_Y: f32 = 1.2;
const GRID_GAP: f32 = 0.2;

#[derive(Debug, Clone, Serialize)]
pub struct DeckOutline {
    pub file_name: String,
    pub primary_color: &'static str,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Slide {
    pub title: String,
    pub elements: Vec<SlideElement>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideElement {
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: u8,
        bold: bool,
        color: Option<&'static str>,
    },
    Table {
        x: f32,
        y: f32,
        w: f32,
        fill: &'static str,
        border_color: &'static str,
        font_size: u8,
        rows: Vec<Vec<String>>,
    },
    InfoBox {
        title: String,
        lines: Vec<String>,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        header_h: f32,
        header_fill: &'static str,
        body_fill: &'static str,
    },
}

/// Fixed-point text for the deck. The value is scaled, rounded half away from
/// zero and then printed, so `4.35` gives "4.4" even though its binary value
/// sits just below the tie. This matches how `round_2dp` stores the total.
pub fn format_fixed(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", decimals as usize, rounded)
}

/// Share of the 5-point scale a score fills, capped at 100.
pub fn score_bar_percent(score: f64) -> f64 {
    (score / 5.0 * 100.0).min(100.0)
}

/// One horizontal score bar of the report view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBar {
    pub label: String,
    pub score: f64,
    pub percent: f64,
}

/// Bars for the four axes in display order.
pub fn metric_bars(metrics: &ProjectMetrics) -> Vec<MetricBar> {
    [
        ("Fame", metrics.fame),
        ("Fun", metrics.fun),
        ("Money", metrics.money),
        ("Strategy", metrics.strategy),
    ]
    .into_iter()
    .map(|(label, score)| MetricBar {
        label: label.to_string(),
        score,
        percent: score_bar_percent(score),
    })
    .collect()
}

fn text(
    text: impl Into<String>,
    y: f32,
    font_size: u8,
    bold: bool,
    color: Option<&'static str>,
) -> SlideElement {
    SlideElement::Text {
        text: text.into(),
        x: 0.5,
        y,
        font_size,
        bold,
        color,
    }
}

fn info_box(title: &str, lines: Vec<String>, col: u8, row: u8) -> SlideElement {
    SlideElement::InfoBox {
        title: title.to_string(),
        lines,
        x: GRID_X + f32::from(col) * (BOX_W + GRID_GAP),
        y: GRID_Y + f32::from(row) * (BOX_H + GRID_GAP),
        w: BOX_W,
        h: BOX_H,
        header_h: BOX_HEADER_H,
        header_fill: PRIMARY_COLOR,
        body_fill: BOX_BODY_FILL,
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn strategic_slide(evaluation: &EvaluationResult) -> Slide {
    let metrics = &evaluation.metrics;
    let recommendation_color = if metrics.recommendation == Recommendation::Go {
        GO_COLOR
    } else {
        NOT_GO_COLOR
    };

    let rows = vec![
        vec!["Metric".to_string(), "Score (1-5)".to_string()],
        vec!["Fame".to_string(), format_fixed(metrics.fame, 1)],
        vec!["Fun".to_string(), format_fixed(metrics.fun, 1)],
        vec!["Money".to_string(), format_fixed(metrics.money, 1)],
        vec!["Strategy".to_string(), format_fixed(metrics.strategy, 1)],
    ];

    Slide {
        title: "Strategic Evaluation".to_string(),
        elements: vec![
            text("Strategic Evaluation", 0.5, 24, true, Some(PRIMARY_COLOR)),
            text(
                or_default(&evaluation.details.project_name, "New Project"),
                1.0,
                18,
                false,
                Some(SUBTITLE_COLOR),
            ),
            text(
                format!("Total Score: {}", format_fixed(metrics.total, 2)),
                1.8,
                14,
                true,
                None,
            ),
            text(
                format!("Recommendation: {}", metrics.recommendation),
                2.2,
                14,
                true,
                Some(recommendation_color),
            ),
            SlideElement::Table {
                x: 0.5,
                y: 3.0,
                w: 4.0,
                fill: TABLE_FILL,
                border_color: TABLE_BORDER,
                font_size: 12,
                rows,
            },
        ],
    }
}

fn nb_info_slide(info: &NbInformation) -> Slide {
    let agency_fee = info
        .fees
        .agency_fee
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or("N/A");

    let mut elements = vec![text(
        "High Level Q&A - NB Info",
        0.5,
        24,
        true,
        Some(PRIMARY_COLOR),
    )];

    elements.push(info_box(
        "Client & Type",
        vec![
            format!("Project: {}", info.client_and_type.project_name),
            format!("Type: {}", info.client_and_type.inquiry_type),
            format!("Model: {}", info.client_and_type.business_model),
        ],
        0,
        0,
    ));
    elements.push(info_box(
        "Project Basics",
        vec![
            format!("Topic: {}", info.project_basics.topic),
            format!("Size: {}", info.project_basics.size),
            format!("Loc: {}", info.project_basics.location),
            format!("Level: {}", info.project_basics.experience_level),
        ],
        1,
        0,
    ));
    elements.push(info_box("Scope", info.scope.clone(), 2, 0));
    elements.push(info_box(
        "Pitch Deliverables",
        info.pitch_deliverables.clone(),
        0,
        1,
    ));
    elements.push(info_box(
        "Fees",
        vec![
            format!("Pitch: {}", info.fees.pitch_fee),
            format!("Prod: {}", info.fees.production_fee),
            format!("Agency: {agency_fee}"),
        ],
        1,
        1,
    ));
    elements.push(info_box("Time Frame", info.time_frame.clone(), 2, 1));

    Slide {
        title: "High Level Q&A - NB Info".to_string(),
        elements,
    }
}

/// Builds the strategic evaluation slide and the NB Info grid slide.
pub fn build_deck(evaluation: &EvaluationResult) -> DeckOutline {
    let client = or_default(&evaluation.details.client_name, "VAVE_Project");

    DeckOutline {
        file_name: format!("{}_Evaluation.pptx", sanitize_filename(client.trim())),
        primary_color: PRIMARY_COLOR,
        slides: vec![strategic_slide(evaluation), nb_info_slide(&evaluation.nb_info)],
    }
}
