//! Structured-payload rendering: a fixed, ordered list of semantic sections,
//! each probing a few alternate field names (model revisions disagree on
//! spelling). A section renders only when one of its keys is present; the
//! first present key wins. Section text is injected as-is; the backend is
//! first-party and its output is trusted.

use serde_json::Value;
use shared::{RatingValue, StructuredFields};

use crate::render::rating;

pub const RATING_KEYS: &[&str] = &["rating", "overall_rating"];
pub const STRENGTH_KEYS: &[&str] = &["strengths", "what_works_well"];
pub const IMPROVEMENT_KEYS: &[&str] = &["improvements", "suggestions", "areas_for_improvement"];
pub const TIP_KEYS: &[&str] = &["key_tip", "quick_tip", "tip"];

enum SectionKind {
    Rating,
    Generic,
    Tip,
}

struct SectionSpec {
    title: &'static str,
    icon: &'static str,
    tone: &'static str,
    keys: &'static [&'static str],
    kind: SectionKind,
}

const SECTIONS: [SectionSpec; 9] = [
    SectionSpec {
        title: "Overall Rating",
        icon: "fa-star",
        tone: "rating",
        keys: RATING_KEYS,
        kind: SectionKind::Rating,
    },
    SectionSpec {
        title: "What Works Well",
        icon: "fa-thumbs-up",
        tone: "positive",
        keys: STRENGTH_KEYS,
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Areas to Improve",
        icon: "fa-screwdriver-wrench",
        tone: "warning",
        keys: IMPROVEMENT_KEYS,
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Color Analysis",
        icon: "fa-palette",
        tone: "info",
        keys: &["color_analysis", "color_coordination", "colors"],
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Recommendations",
        icon: "fa-list-check",
        tone: "info",
        keys: &["recommendations", "styling_tips", "style_recommendations"],
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Fit & Silhouette",
        icon: "fa-shirt",
        tone: "info",
        keys: &["fit_analysis", "fit", "silhouette"],
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Occasion Suitability",
        icon: "fa-calendar-check",
        tone: "info",
        keys: &["occasion_suitability", "occasions", "occasion"],
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Professional Assessment",
        icon: "fa-user-tie",
        tone: "accent",
        keys: &["professional_assessment", "professional_rating"],
        kind: SectionKind::Generic,
    },
    SectionSpec {
        title: "Key Tip",
        icon: "fa-lightbulb",
        tone: "tip",
        keys: TIP_KEYS,
        kind: SectionKind::Tip,
    },
];

pub fn render_structured(fields: &StructuredFields) -> String {
    let mut out = String::new();
    for spec in &SECTIONS {
        let Some(value) = fields.first_present(spec.keys) else {
            continue;
        };
        out.push_str(&render_section(spec, value));
    }
    if out.is_empty() {
        return r#"<p class="results-empty">No analysis details were returned.</p>"#.to_owned();
    }
    out
}

fn render_section(spec: &SectionSpec, value: &Value) -> String {
    let inner = match spec.kind {
        SectionKind::Rating => rating::rating_markup(&RatingValue::from_value(value)),
        SectionKind::Tip => format!(r#"<p class="key-tip-text">{}</p>"#, value_text(value)),
        SectionKind::Generic => content_markup(value),
    };
    format!(
        r#"<div class="analysis-section section-{tone}"><h3><i class="fa-solid {icon}"></i> {title}</h3><div class="section-content">{inner}</div></div>"#,
        tone = spec.tone,
        icon = spec.icon,
        title = spec.title,
    )
}

/// Lists render as bullets, flat maps as "Key: value" lines with the key
/// prettified, everything else as plain text.
fn content_markup(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", value_text(item)))
                .collect();
            format!(r#"<ul class="section-list">{items}</ul>"#)
        }
        Value::Object(map) => map
            .iter()
            .map(|(key, entry)| {
                format!(
                    "<p><strong>{}:</strong> {}</p>",
                    prettify_key(key),
                    value_text(entry)
                )
            })
            .collect(),
        other => format!("<p>{}</p>", value_text(other)),
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn prettify_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> StructuredFields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn alternate_keys_resolve_first_present_wins() {
        let html = render_structured(&fields(json!({
            "what_works_well": ["B"],
            "strengths": ["A"],
        })));
        assert!(html.contains("What Works Well"));
        assert!(html.contains("<li>A</li>"));
        assert!(!html.contains("<li>B</li>"));
    }

    #[test]
    fn sections_emit_in_fixed_order_regardless_of_payload_order() {
        let html = render_structured(&fields(json!({
            "key_tip": "Cuff the sleeves",
            "improvements": ["shorter hem"],
            "rating": 7,
        })));
        let rating = html.find("Overall Rating").unwrap();
        let improvements = html.find("Areas to Improve").unwrap();
        let tip = html.find("Key Tip").unwrap();
        assert!(rating < improvements && improvements < tip);
    }

    #[test]
    fn absent_sections_do_not_render() {
        let html = render_structured(&fields(json!({"rating": 5})));
        assert!(html.contains("Overall Rating"));
        assert!(!html.contains("Color Analysis"));
        assert!(!html.contains("Key Tip"));
    }

    #[test]
    fn list_content_renders_every_item() {
        let html = render_structured(&fields(json!({
            "recommendations": ["add a belt", "swap the shoes", "roll the cuffs"],
        })));
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn map_content_renders_prettified_key_value_lines() {
        let html = render_structured(&fields(json!({
            "color_analysis": {"dominant_colors": "navy, cream", "contrast": "high"},
        })));
        assert!(html.contains("<strong>Dominant Colors:</strong> navy, cream"));
        assert!(html.contains("<strong>Contrast:</strong> high"));
    }

    #[test]
    fn scalar_content_renders_as_text() {
        let html = render_structured(&fields(json!({
            "occasion_suitability": "Office-ready, works for dinner too.",
        })));
        assert!(html.contains("<p>Office-ready, works for dinner too.</p>"));
    }

    #[test]
    fn rating_section_renders_stars_from_object_shape() {
        let html = render_structured(&fields(json!({
            "overall_rating": {"score": 9, "description": "Standout look"},
        })));
        assert!(html.contains("fa-star"));
        assert!(html.contains("9/10"));
        assert!(html.contains("Standout look"));
    }

    #[test]
    fn no_matching_sections_yields_the_empty_note() {
        let html = render_structured(&fields(json!({"unrelated": 1})));
        assert!(html.contains("results-empty"));
    }
}
