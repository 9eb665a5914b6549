pub mod contrast;
pub mod readability;
pub mod semantic;
pub mod screen_reader;
pub mod touch_target;
pub mod palette;

/// Format a number the way it reads in user-facing messages: integers
/// without a fraction (`120`, not `120.0`), `NaN`, `Infinity`, and no sign
/// on negative zero.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= 1e21 {
        return format!("{:e}", value).replacen('e', "e+", 1);
    }
    if value.abs() < 1e-6 {
        return format!("{:e}", value);
    }
    format!("{}", value)
}

/// Fixed-point formatting with `digits` decimals. Exact ties round away
/// from zero (`0.25` gives `"0.3"`) and the sign is kept for small negatives.
pub(crate) fn format_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format_number(value);
    }

    let magnitude = value.abs();
    let exact = format!("{:.*}", digits + 30, magnitude);
    let tail = &exact[exact.len() - 30..];
    let rounded = if tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0') {
        let scale = 10f64.powi(digits as i32);
        (magnitude * scale).round() / scale
    } else {
        magnitude
    };

    let body = format!("{:.*}", digits, rounded);
    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Clamp a score to 0-100.
pub(crate) fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(1.5), "1.5");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e21), "1e+21");
    }

    #[test]
    fn fixed_rounding() {
        assert_eq!(format_fixed(16.0, 1), "16.0");
        assert_eq!(format_fixed(1.25, 1), "1.3");
        assert_eq!(format_fixed(-1.25, 1), "-1.3");
        assert_eq!(format_fixed(0.35, 1), "0.3");
        assert_eq!(format_fixed(63.33333, 1), "63.3");
        assert_eq!(format_fixed(-0.01, 1), "-0.0");
        assert_eq!(format_fixed(f64::NAN, 1), "NaN");
    }
}
