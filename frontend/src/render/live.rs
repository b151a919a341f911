//! Reduced rendering for continuous camera analysis: a quick rating, the
//! first couple of highlights each way, and the key tip. Anything richer
//! waits for a full single-shot analysis.

use serde_json::Value;
use shared::{AnalysisEnvelope, AnalysisPayload, RatingValue};

use crate::render::rating::{format_score, star_strip};
use crate::render::sections::{IMPROVEMENT_KEYS, RATING_KEYS, STRENGTH_KEYS, TIP_KEYS, value_text};

const MAX_POINTS: usize = 2;

pub fn render_live(envelope: &AnalysisEnvelope) -> String {
    if !envelope.success {
        let text = envelope.error.as_deref().unwrap_or("Live analysis failed");
        return format!(
            r#"<div class="live-error"><i class="fa-solid fa-circle-exclamation"></i> {text}</div>"#
        );
    }

    let mut out = String::new();
    if let Some(fields) = envelope.analysis.as_ref().and_then(AnalysisPayload::structured) {
        if let Some(value) = fields.first_present(RATING_KEYS) {
            let rating = RatingValue::from_value(value);
            out.push_str(&format!(
                r#"<div class="live-rating">{} <span class="rating-score">{}/10</span></div>"#,
                star_strip(rating.score),
                format_score(rating.score),
            ));
        }
        for item in as_list(fields.first_present(STRENGTH_KEYS)).into_iter().take(MAX_POINTS) {
            out.push_str(&format!(
                r#"<div class="live-point positive"><i class="fa-solid fa-circle-check"></i> {}</div>"#,
                value_text(item)
            ));
        }
        for item in as_list(fields.first_present(IMPROVEMENT_KEYS)).into_iter().take(MAX_POINTS) {
            out.push_str(&format!(
                r#"<div class="live-point warning"><i class="fa-solid fa-wrench"></i> {}</div>"#,
                value_text(item)
            ));
        }
        if let Some(tip) = fields.first_present(TIP_KEYS) {
            out.push_str(&format!(
                r#"<div class="live-tip"><i class="fa-solid fa-lightbulb"></i> {}</div>"#,
                value_text(tip)
            ));
        }
    }

    if out.is_empty() {
        return r#"<div class="live-analyzing"><i class="fa-solid fa-spinner fa-spin"></i> Analyzing your look...</div>"#.to_owned();
    }
    format!(r#"<div class="live-result">{out}</div>"#)
}

/// Single values count as a one-element list.
fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}
