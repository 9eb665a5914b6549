use super::hex::{parse_hex_rgb, Rgb};

/// WCAG AAA threshold for normal text.
pub const AAA_RATIO: f64 = 7.0;
/// WCAG AA threshold for normal text (also used for the AAA large-text flag).
pub const AA_RATIO: f64 = 4.5;
/// WCAG AA threshold for large text.
pub const AA_LARGE_RATIO: f64 = 3.0;

/// Convert an sRGB channel (0-255) to linear light.
/// Uses the WCAG 2.0 cut-off: c <= 0.03928 ? c/12.92 : ((c+0.055)/1.055)^2.4
fn channel_luminance(channel: f64) -> f64 {
    let c = channel / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an RGB color.
/// L = 0.2126 * R + 0.7152 * G + 0.0722 * B (linear channels)
pub fn luminance(rgb: Rgb) -> f64 {
    0.2126 * channel_luminance(rgb.r)
        + 0.7152 * channel_luminance(rgb.g)
        + 0.0722 * channel_luminance(rgb.b)
}

/// Relative luminance of a hex color string.
pub fn hex_luminance(hex: &str) -> f64 {
    luminance(parse_hex_rgb(hex))
}

/// Contrast ratio between two luminance values.
/// ratio = (L1 + 0.05) / (L2 + 0.05) where L1 >= L2.
///
/// NaN in either input yields NaN (`f64::max` would silently drop it).
pub fn ratio_from_luminance(lum1: f64, lum2: f64) -> f64 {
    if lum1.is_nan() || lum2.is_nan() {
        return f64::NAN;
    }
    let (lighter, darker) = if lum1 > lum2 { (lum1, lum2) } else { (lum2, lum1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors. Symmetric in its arguments.
pub fn contrast_ratio(hex1: &str, hex2: &str) -> f64 {
    ratio_from_luminance(hex_luminance(hex1), hex_luminance(hex2))
}

/// Determine pass/fail for all WCAG thresholds.
///
/// `pass_aaa_large` shares the 4.5 cut-off with `pass_aa`.
pub fn check_wcag_thresholds(ratio: f64) -> WcagResult {
    WcagResult {
        pass_aa: ratio >= AA_RATIO,
        pass_aa_large: ratio >= AA_LARGE_RATIO,
        pass_aaa: ratio >= AAA_RATIO,
        pass_aaa_large: ratio >= AA_RATIO,
    }
}

pub struct WcagResult {
    pub pass_aa: bool,
    pub pass_aa_large: bool,
    pub pass_aaa: bool,
    pub pass_aaa_large: bool,
}

impl WcagResult {
    /// Human-readable label for the highest tier reached.
    pub fn rating_text(&self) -> &'static str {
        if self.pass_aaa {
            "AAA (Excellent) ✓"
        } else if self.pass_aa {
            "AA (Good) ✓"
        } else if self.pass_aa_large {
            "AA Large Text Only"
        } else {
            "Fail ✗"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_is_21() {
        let ratio = contrast_ratio("#000000", "#ffffff");
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn white_on_white_is_1() {
        let ratio = contrast_ratio("#ffffff", "#ffffff");
        assert!((ratio - 1.0).abs() < 0.01);
    }

    #[test]
    fn gray_on_white() {
        let ratio = contrast_ratio("#767676", "#ffffff");
        assert!((ratio - 4.54).abs() < 0.1);
    }

    #[test]
    fn order_independent() {
        let r1 = contrast_ratio("#ff0000", "#ffffff");
        let r2 = contrast_ratio("#ffffff", "#ff0000");
        assert_eq!(r1, r2);
    }

    #[test]
    fn slate_on_white() {
        let ratio = contrast_ratio("#1e293b", "#ffffff");
        assert!((ratio - 14.62).abs() < 0.1);
    }

    #[test]
    fn malformed_color_propagates_nan() {
        assert!(contrast_ratio("#zzzzzz", "#ffffff").is_nan());
        assert!(contrast_ratio("#ffffff", "").is_nan());
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(hex_luminance("#000000"), 0.0);
        assert!((hex_luminance("#ffffff") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn aa_requires_4_5() {
        let r = check_wcag_thresholds(4.5);
        assert!(r.pass_aa);
        assert!(r.pass_aa_large);
        assert!(r.pass_aaa_large);
        assert!(!r.pass_aaa);
        assert_eq!(r.rating_text(), "AA (Good) ✓");
    }

    #[test]
    fn large_only_between_3_and_4_5() {
        let r = check_wcag_thresholds(3.2);
        assert!(!r.pass_aa);
        assert!(r.pass_aa_large);
        assert!(!r.pass_aaa_large);
        assert_eq!(r.rating_text(), "AA Large Text Only");
    }

    #[test]
    fn aaa_requires_7() {
        let r = check_wcag_thresholds(7.0);
        assert!(r.pass_aa);
        assert!(r.pass_aaa);
        assert_eq!(r.rating_text(), "AAA (Excellent) ✓");
    }

    #[test]
    fn nan_fails_everything() {
        let r = check_wcag_thresholds(f64::NAN);
        assert!(!r.pass_aa && !r.pass_aa_large && !r.pass_aaa && !r.pass_aaa_large);
        assert_eq!(r.rating_text(), "Fail ✗");
    }

    #[test]
    fn ratio_grows_with_luminance_gap() {
        let mut previous = 0.0;
        for level in (0..=255).rev() {
            let gray = format!("#{0:02x}{0:02x}{0:02x}", level);
            let ratio = contrast_ratio(&gray, "#ffffff");
            assert!(ratio >= previous, "{gray}: {ratio} < {previous}");
            previous = ratio;
        }
        assert!((previous - 21.0).abs() < 0.01);
    }
}
