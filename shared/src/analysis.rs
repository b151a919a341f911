use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::Display;

/// The three response shapes the analysis backend is known to produce.
///
/// Untagged variant order is the resolution precedence: a plain string wins,
/// then an object carrying `raw_analysis`, and only then is the payload
/// treated as structured fields.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum AnalysisPayload {
    Text(String),
    RawAnalysis { raw_analysis: String },
    Structured(StructuredFields),
}

impl AnalysisPayload {
    /// Raw markdown text, if this payload carries any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            AnalysisPayload::Text(text) => Some(text),
            AnalysisPayload::RawAnalysis { raw_analysis } => Some(raw_analysis),
            AnalysisPayload::Structured(_) => None,
        }
    }

    pub fn structured(&self) -> Option<&StructuredFields> {
        match self {
            AnalysisPayload::Structured(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Loosely-structured analysis attributes. Field names vary between model
/// revisions, so lookups go through [`StructuredFields::first_present`]
/// instead of fixed struct fields.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(transparent)]
pub struct StructuredFields(pub Map<String, Value>);

impl StructuredFields {
    /// First value among `keys` that is present, in the order given.
    pub fn first_present(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.0.get(*key))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A rating on the 0-10 scale, coerced from whichever shape the backend
/// sent: a bare number, an object with `score`/`value` and an optional
/// `description`, or free text containing a numeral.
#[derive(Clone, Debug, PartialEq)]
pub struct RatingValue {
    pub score: f64,
    pub description: Option<String>,
}

impl RatingValue {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => RatingValue {
                score: n.as_f64().unwrap_or(0.0),
                description: None,
            },
            Value::Object(map) => RatingValue {
                score: map
                    .get("score")
                    .or_else(|| map.get("value"))
                    .map(coerce_score)
                    .unwrap_or(0.0),
                description: map
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            },
            Value::String(text) => RatingValue {
                score: first_numeral(text).unwrap_or(0.0),
                description: None,
            },
            _ => RatingValue {
                score: 0.0,
                description: None,
            },
        }
    }

    pub fn tier(&self) -> RatingTier {
        if self.score >= 8.0 {
            RatingTier::Excellent
        } else if self.score >= 6.0 {
            RatingTier::Good
        } else if self.score >= 4.0 {
            RatingTier::Fair
        } else {
            RatingTier::Poor
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum RatingTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

fn coerce_score(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(text) => first_numeral(text).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// First numeric token in `text`, e.g. "8.5/10" -> 8.5.
fn first_numeral(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = start;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot && end + 1 < bytes.len() && bytes[end + 1].is_ascii_digit() => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    text[start..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> AnalysisPayload {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn plain_string_resolves_to_text() {
        let parsed = payload(json!("Great outfit overall."));
        assert_eq!(parsed.raw_text(), Some("Great outfit overall."));
    }

    #[test]
    fn raw_analysis_wins_over_structured_fields() {
        let parsed = payload(json!({
            "raw_analysis": "## Notes",
            "rating": 7,
        }));
        assert_eq!(parsed.raw_text(), Some("## Notes"));
        assert!(parsed.structured().is_none());
    }

    #[test]
    fn object_without_raw_text_is_structured() {
        let parsed = payload(json!({"rating": 7, "strengths": ["fit"]}));
        let fields = parsed.structured().expect("structured shape");
        assert!(fields.first_present(&["rating"]).is_some());
        assert!(parsed.raw_text().is_none());
    }

    #[test]
    fn first_present_probes_keys_in_order() {
        let parsed = payload(json!({"strengths": ["A"], "what_works_well": ["B"]}));
        let fields = parsed.structured().unwrap();
        let value = fields
            .first_present(&["strengths", "what_works_well"])
            .unwrap();
        assert_eq!(value, &json!(["A"]));
    }

    #[test]
    fn rating_from_bare_number() {
        let rating = RatingValue::from_value(&json!(7.5));
        assert_eq!(rating.score, 7.5);
        assert!(rating.description.is_none());
    }

    #[test]
    fn rating_from_object_prefers_score_then_value() {
        let rating = RatingValue::from_value(&json!({"score": 9, "description": "sharp"}));
        assert_eq!(rating.score, 9.0);
        assert_eq!(rating.description.as_deref(), Some("sharp"));

        let rating = RatingValue::from_value(&json!({"value": "6.5"}));
        assert_eq!(rating.score, 6.5);
    }

    #[test]
    fn rating_from_string_extracts_first_numeral() {
        assert_eq!(RatingValue::from_value(&json!("8.5/10")).score, 8.5);
        assert_eq!(RatingValue::from_value(&json!("rated 7 of 10")).score, 7.0);
        assert_eq!(RatingValue::from_value(&json!("no score yet")).score, 0.0);
    }

    #[test]
    fn tier_boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(RatingValue::from_value(&json!(8)).tier(), RatingTier::Excellent);
        assert_eq!(RatingValue::from_value(&json!(7.9)).tier(), RatingTier::Good);
        assert_eq!(RatingValue::from_value(&json!(6)).tier(), RatingTier::Good);
        assert_eq!(RatingValue::from_value(&json!(4)).tier(), RatingTier::Fair);
        assert_eq!(RatingValue::from_value(&json!(3.9)).tier(), RatingTier::Poor);
    }

    #[test]
    fn tier_labels_render_lowercase() {
        assert_eq!(RatingTier::Excellent.to_string(), "excellent");
        assert_eq!(RatingTier::Poor.to_string(), "poor");
    }
}
