pub mod live;
pub mod markdown;
pub mod rating;
pub mod sections;

use shared::AnalysisPayload;

const DEFAULT_PROMPT: &str = r#"<div class="results-placeholder"><i class="fa-solid fa-shirt"></i><p>Upload a photo or start the camera to get styling feedback.</p></div>"#;

/// Dispatch over the three payload shapes: raw text renders through the
/// markdown pipeline, everything else through the structured sections.
pub fn render_analysis(payload: &AnalysisPayload) -> String {
    match payload {
        AnalysisPayload::Text(text) => wrap_text(text),
        AnalysisPayload::RawAnalysis { raw_analysis } => wrap_text(raw_analysis),
        AnalysisPayload::Structured(fields) => sections::render_structured(fields),
    }
}

pub fn results_region(analysis: Option<&AnalysisPayload>) -> String {
    match analysis {
        Some(payload) => render_analysis(payload),
        None => DEFAULT_PROMPT.to_owned(),
    }
}

fn wrap_text(text: &str) -> String {
    format!(
        r#"<div class="analysis-text">{}</div>"#,
        markdown::format_markdown(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> AnalysisPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn raw_analysis_field_takes_the_markdown_path() {
        let html = render_analysis(&payload(json!({
            "raw_analysis": "**bold**",
            "rating": 9,
        })));
        assert!(html.contains("analysis-text"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("analysis-section"));
    }

    #[test]
    fn structured_payload_takes_the_section_path() {
        let html = render_analysis(&payload(json!({"rating": 9})));
        assert!(html.contains("analysis-section"));
    }

    #[test]
    fn empty_state_shows_the_default_prompt() {
        let html = results_region(None);
        assert!(html.contains("results-placeholder"));
        assert!(html.contains("Upload a photo"));
    }
}
