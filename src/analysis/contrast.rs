use tracing::{debug, trace};

use crate::math::hex::{gray_to_hex, parse_hex_rgb, Rgb};
use crate::math::wcag::{check_wcag_thresholds, contrast_ratio, luminance, ratio_from_luminance};
use crate::types::ContrastResult;

/// Default contrast target of [`suggest_accessible_color`].
pub const DEFAULT_TARGET_RATIO: f64 = 4.5;

const SEARCH_ITERATIONS: usize = 20;
/// A candidate this close to the target ends the search.
const TARGET_TOLERANCE: f64 = 0.1;

/// Contrast of two 6-digit hex colors against the WCAG thresholds.
///
/// Malformed colors are not rejected: their channels parse to NaN and the
/// result carries a NaN ratio that fails every threshold.
pub fn analyze_contrast(text_hex: &str, bg_hex: &str) -> ContrastResult {
    let ratio = contrast_ratio(text_hex, bg_hex);
    let wcag = check_wcag_thresholds(ratio);

    debug!(text = text_hex, bg = bg_hex, ratio, "contrast analyzed");

    ContrastResult {
        ratio,
        pass_aa: wcag.pass_aa,
        pass_aa_large: wcag.pass_aa_large,
        pass_aaa: wcag.pass_aaa,
        pass_aaa_large: wcag.pass_aaa_large,
        rating_text: wcag.rating_text().to_string(),
    }
}

/// Search for a gray that reaches roughly `target_ratio` against `bg_hex`.
///
/// Dark backgrounds (luminance below 0.5) are searched toward white, light
/// ones toward black. Each bisection step keeps the gray closest to the
/// background that still meets the target. When no candidate meets it, the
/// gray whose ratio came closest is returned, so the result is always gray.
pub fn suggest_accessible_color(text_hex: &str, bg_hex: &str, target_ratio: f64) -> String {
    let bg_lum = luminance(parse_hex_rgb(bg_hex));
    let lighter = bg_lum < 0.5;
    // Candidate level for a search position; position 255 is the extreme gray.
    let level_at = |position: i64| if lighter { position } else { 255 - position };

    let mut low: i64 = 0;
    let mut high: i64 = 255;
    let mut meeting: Option<i64> = None;
    let mut closest = (level_at(255), f64::INFINITY);

    for step in 0..SEARCH_ITERATIONS {
        if low > high {
            break;
        }
        let mid = (low + high).div_euclid(2);
        let level = level_at(mid);
        let ratio = ratio_from_luminance(luminance(Rgb::gray(level as f64)), bg_lum);
        trace!(step, level, ratio, "suggestion candidate");

        let gap = (ratio - target_ratio).abs();
        if gap < closest.1 {
            closest = (level, gap);
        }
        if gap < TARGET_TOLERANCE {
            meeting = Some(level);
            break;
        }

        if ratio < target_ratio {
            low = mid + 1;
        } else {
            meeting = Some(level);
            high = mid - 1;
        }
    }

    let best = gray_to_hex(meeting.unwrap_or(closest.0));
    debug!(text = text_hex, bg = bg_hex, target_ratio, suggestion = %best, "accessible color suggested");
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_contrast() {
        let result = analyze_contrast("#000000", "#FFFFFF");
        assert!((result.ratio - 21.0).abs() < 0.01);
        assert!(result.pass_aa && result.pass_aa_large && result.pass_aaa && result.pass_aaa_large);
        assert!(result.rating_text.contains("AAA"));
    }

    #[test]
    fn failing_contrast() {
        let result = analyze_contrast("#777777", "#888888");
        assert!(result.ratio < 3.0);
        assert!(!result.pass_aa && !result.pass_aa_large && !result.pass_aaa && !result.pass_aaa_large);
        assert_eq!(result.rating_text, "Fail ✗");
    }

    #[test]
    fn ratio_is_symmetric() {
        for (a, b) in [("#1e293b", "#f8fafc"), ("#ff0000", "#00ff00"), ("#123456", "#abcdef")] {
            assert_eq!(analyze_contrast(a, b).ratio, analyze_contrast(b, a).ratio);
        }
    }

    #[test]
    fn aaa_implies_aa() {
        let result = analyze_contrast("#1e293b", "#ffffff");
        assert!(result.pass_aaa);
        assert!(result.pass_aa);
        assert!(result.pass_aa_large);
    }

    #[test]
    fn malformed_color_gives_nan() {
        let result = analyze_contrast("#fff", "#000000");
        assert!(result.ratio.is_nan());
        assert!(!result.pass_aa_large);
        assert_eq!(result.rating_text, "Fail ✗");
    }

    #[test]
    fn suggestion_on_light_background_is_dark_gray() {
        let suggestion = suggest_accessible_color("#cccccc", "#ffffff", DEFAULT_TARGET_RATIO);
        assert_ne!(suggestion, "#cccccc");
        let ratio = contrast_ratio(&suggestion, "#ffffff");
        assert!(ratio >= DEFAULT_TARGET_RATIO - TARGET_TOLERANCE, "ratio {ratio}");
        let rgb = parse_hex_rgb(&suggestion);
        assert_eq!(rgb.r, rgb.g);
        assert_eq!(rgb.g, rgb.b);
    }

    #[test]
    fn suggestion_on_dark_background_is_light_gray() {
        let suggestion = suggest_accessible_color("#333333", "#000000", DEFAULT_TARGET_RATIO);
        let ratio = contrast_ratio(&suggestion, "#000000");
        assert!(ratio >= DEFAULT_TARGET_RATIO - TARGET_TOLERANCE, "ratio {ratio}");
        assert!(parse_hex_rgb(&suggestion).r > 100.0);
    }

    #[test]
    fn light_backgrounds_get_a_darker_gray() {
        for (text, bg) in [("#cccccc", "#ffffff"), ("#777777", "#ffffff"), ("#ff8800", "#ffffff"), ("#cccccc", "#f0f0f0")] {
            let suggestion = suggest_accessible_color(text, bg, DEFAULT_TARGET_RATIO);
            assert_ne!(suggestion, text);
            let ratio = contrast_ratio(&suggestion, bg);
            assert!(ratio >= DEFAULT_TARGET_RATIO - TARGET_TOLERANCE, "{text} on {bg}: {suggestion} at {ratio}");
            assert!(ratio < DEFAULT_TARGET_RATIO + 1.0, "{text} on {bg}: {suggestion} at {ratio}");
        }
    }

    #[test]
    fn unreachable_target_returns_closest_gray() {
        // Nothing reaches 30:1; black comes closest on white.
        assert_eq!(suggest_accessible_color("#abcdef", "#ffffff", 30.0), "#000000");
        assert_eq!(suggest_accessible_color("#123456", "#000000", 30.0), "#ffffff");
    }

    #[test]
    fn suggestion_is_always_a_string() {
        let suggestion = suggest_accessible_color("oops", "also-bad", DEFAULT_TARGET_RATIO);
        assert!(suggestion.starts_with('#'));
    }
}
