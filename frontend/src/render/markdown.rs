//! Markdown-to-HTML formatting for raw analysis text.
//!
//! The backend's prose replies use a small markdown dialect: up to three
//! heading levels, `**bold**`, `-` bullets (optionally indented), `N.`
//! numbered items, and a handful of emoji the models like to sprinkle in.
//! The passes below run exactly once per render, in a fixed order; list
//! items are produced flat and coalesced into a single `<ul>` afterwards.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

const HEADING_ICON: &str = r#"<i class="fa-solid fa-wand-magic-sparkles"></i>"#;

lazy_static! {
    static ref H3: Regex = Regex::new(r"(?m)^### (.*)$").unwrap();
    static ref H2: Regex = Regex::new(r"(?m)^## (.*)$").unwrap();
    static ref H1: Regex = Regex::new(r"(?m)^# (.*)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref LIST_RUN: Regex =
        Regex::new(r"<li[^>]*>.*?</li>(?:(?:<br>)+<li[^>]*>.*?</li>)*").unwrap();
    static ref MULTI_BREAK: Regex = Regex::new(r"(?:<br>){2,}").unwrap();
    static ref BREAK_BEFORE_HEADING: Regex = Regex::new(r"<br>(<h[2-4])").unwrap();
    static ref BREAK_AFTER_HEADING: Regex = Regex::new(r"(</h[2-4]>)<br>").unwrap();
}

const EMOJI_ICONS: [(&str, &str); 4] = [
    ("\u{2705}", r#"<i class="fa-solid fa-circle-check"></i> <strong>Good:</strong>"#),
    ("\u{1F527}", r#"<i class="fa-solid fa-wrench"></i> <strong>Fix:</strong>"#),
    ("\u{1F4A1}", r#"<i class="fa-solid fa-lightbulb"></i> <strong>Tip:</strong>"#),
    ("\u{1F454}", r#"<i class="fa-solid fa-user-tie"></i> <strong>Style:</strong>"#),
];

pub fn format_markdown(text: &str) -> String {
    // Longest heading prefix first so `##` is not consumed by `#`.
    let html = H3.replace_all(text, |caps: &Captures| heading(4, &caps[1]));
    let html = H2.replace_all(&html, |caps: &Captures| heading(3, &caps[1]));
    let html = H1.replace_all(&html, |caps: &Captures| heading(2, &caps[1]));

    let html = BOLD.replace_all(&html, "<strong>$1</strong>");

    let html = html.replace('\n', "<br>");

    // Former lines are now <br>-delimited segments.
    let html = html
        .split("<br>")
        .map(|segment| list_item_segment(segment).unwrap_or_else(|| segment.to_owned()))
        .collect::<Vec<_>>()
        .join("<br>");

    let mut html = html;
    for (emoji, markup) in EMOJI_ICONS {
        html = html.replace(emoji, markup);
    }

    let html = LIST_RUN.replace_all(&html, |caps: &Captures| {
        format!(
            r#"<ul class="analysis-list">{}</ul>"#,
            caps[0].replace("<br>", "")
        )
    });

    let html = MULTI_BREAK.replace_all(&html, "<br>");
    let html = BREAK_BEFORE_HEADING.replace_all(&html, "$1");
    let mut html = BREAK_AFTER_HEADING.replace_all(&html, "$1").into_owned();
    if html.ends_with("<br>") {
        html.truncate(html.len() - "<br>".len());
    }
    html
}

fn heading(level: u8, title: &str) -> String {
    format!(r#"<h{level} class="analysis-heading">{HEADING_ICON} {title}</h{level}>"#)
}

/// A `- ` bullet (indent kept as a margin hint, not nesting) or an `N. `
/// numbered line becomes a flat `<li>`; anything else is left alone.
fn list_item_segment(segment: &str) -> Option<String> {
    let trimmed = segment.trim_start();
    let indent = segment.len() - trimmed.len();
    if let Some(rest) = trimmed.strip_prefix("- ") {
        let style = if indent > 0 {
            format!(r#" style="margin-left: {}px""#, indent * 8)
        } else {
            String::new()
        };
        return Some(format!("<li{style}>{rest}</li>"));
    }
    numbered_rest(trimmed).map(|rest| format!("<li>{rest}</li>"))
}

fn numbered_rest(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_decrease_in_prominence() {
        let html = format_markdown("# Top\n## Middle\n### Detail");
        assert!(html.contains(r#"<h2 class="analysis-heading">"#));
        assert!(html.contains("Top</h2>"));
        assert!(html.contains("Middle</h3>"));
        assert!(html.contains("Detail</h4>"));
        assert_eq!(html.matches(HEADING_ICON).count(), 3);
    }

    #[test]
    fn sample_document_formats_as_one_heading_one_list_one_bold_span() {
        let html = format_markdown("## Title\n- one\n- two\n**bold**");

        assert_eq!(html.matches("<h3").count(), 1);
        assert!(html.contains("Title</h3>"));

        assert_eq!(html.matches("<ul").count(), 1, "items must share one list");
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));

        assert_eq!(html.matches("<strong>bold</strong>").count(), 1);
    }

    #[test]
    fn numbered_and_indented_items_join_the_same_run() {
        let html = format_markdown("- top\n  - nested\n1. first\n2. second");
        assert_eq!(html.matches("<ul").count(), 1);
        assert_eq!(html.matches("<li").count(), 4);
        assert!(html.contains(r#"<li style="margin-left: 16px">nested</li>"#));
        assert!(html.contains("<li>first</li>"));
    }

    #[test]
    fn separate_lists_stay_separate() {
        let html = format_markdown("- a\n\ntext between\n\n- b");
        assert_eq!(html.matches("<ul").count(), 2);
    }

    #[test]
    fn emoji_become_icon_plus_text() {
        let html = format_markdown("\u{2705} fit\n\u{1F527} hem\n\u{1F4A1} belt\n\u{1F454} blazer");
        assert!(html.contains(r#"fa-circle-check"></i> <strong>Good:</strong> fit"#));
        assert!(html.contains("fa-wrench"));
        assert!(html.contains("fa-lightbulb"));
        assert!(html.contains("fa-user-tie"));
    }

    #[test]
    fn cleanup_collapses_breaks_and_trims_around_headings() {
        let html = format_markdown("intro\n\n\n## Next\nbody\n");
        assert!(!html.contains("<br><br>"), "doubled breaks must collapse");
        assert!(!html.contains("<br><h3"), "no break before a heading");
        assert!(!html.contains("</h3><br>"), "no break after a heading");
        assert!(!html.ends_with("<br>"), "no trailing break");
    }

    #[test]
    fn bold_spans_do_not_cross_lines() {
        let html = format_markdown("**open\nclose**");
        assert!(!html.contains("<strong>"));
    }
}
