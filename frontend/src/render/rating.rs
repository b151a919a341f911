use shared::RatingValue;

/// Five star slots, always: full stars = floor(score / 2), one half star
/// when the remainder reaches 1, empty stars for the rest. Out-of-range
/// scores still render; only the star count is clipped.
pub fn star_strip(score: f64) -> String {
    let full = ((score / 2.0).floor() as i64).clamp(0, 5) as usize;
    let half = usize::from(full < 5 && score - (full as f64) * 2.0 >= 1.0);
    let empty = 5 - full - half;

    let mut out = String::new();
    for _ in 0..full {
        out.push_str(r#"<i class="fa-solid fa-star"></i>"#);
    }
    if half == 1 {
        out.push_str(r#"<i class="fa-solid fa-star-half-stroke"></i>"#);
    }
    for _ in 0..empty {
        out.push_str(r#"<i class="fa-regular fa-star"></i>"#);
    }
    out
}

pub fn rating_markup(rating: &RatingValue) -> String {
    let tier = rating.tier();
    let mut out = format!(
        r#"<div class="rating-display"><span class="stars">{}</span><span class="rating-score">{}/10</span><span class="rating-badge badge-{tier}">{tier}</span></div>"#,
        star_strip(rating.score),
        format_score(rating.score),
    );
    if let Some(description) = &rating.description {
        out.push_str(&format!(
            r#"<p class="rating-description">{description}</p>"#
        ));
    }
    out
}

pub(crate) fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn counts(html: &str) -> (usize, usize, usize) {
        (
            html.matches(r#""fa-solid fa-star""#).count(),
            html.matches("fa-star-half-stroke").count(),
            html.matches("fa-regular fa-star").count(),
        )
    }

    #[test]
    fn every_rating_yields_exactly_five_slots() {
        for tenths in 0..=100 {
            let html = star_strip(tenths as f64 / 10.0);
            assert_eq!(html.matches("<i ").count(), 5, "rating {}", tenths);
        }
    }

    #[test]
    fn slot_split_matches_the_star_arithmetic() {
        assert_eq!(counts(&star_strip(7.0)), (3, 1, 1));
        assert_eq!(counts(&star_strip(10.0)), (5, 0, 0));
        assert_eq!(counts(&star_strip(0.0)), (0, 0, 5));
        assert_eq!(counts(&star_strip(8.0)), (4, 0, 1));
    }

    #[test]
    fn out_of_range_scores_clip_to_the_star_bounds() {
        assert_eq!(counts(&star_strip(14.0)), (5, 0, 0));
        assert_eq!(counts(&star_strip(-3.0)), (0, 0, 5));
    }

    #[test]
    fn markup_carries_score_badge_and_description() {
        let rating = RatingValue::from_value(&json!({
            "score": 8.5,
            "description": "Strong palette",
        }));
        let html = rating_markup(&rating);
        assert!(html.contains("8.5/10"));
        assert!(html.contains("badge-excellent"));
        assert!(html.contains(">excellent<"));
        assert!(html.contains("Strong palette"));
    }

    #[test]
    fn whole_scores_render_without_a_decimal() {
        let rating = RatingValue::from_value(&json!(7));
        assert!(rating_markup(&rating).contains("7/10"));
    }
}
