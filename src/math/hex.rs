use serde::{Deserialize, Serialize};

/// RGB channels as parsed from a hex string.
///
/// Channels are `f64` because malformed input is not rejected: a channel with
/// no parseable hex digits becomes NaN and flows through the luminance math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn gray(level: f64) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// Parse a 6-digit hex color into RGB channels.
///
/// The first `#` is removed, then the string is cut into three two-character
/// groups. Each group is parsed leniently: leading
/// hex digits are consumed and anything after them is ignored, so `"1z"` is 1
/// and `"zz"` or an empty group is NaN. No length validation is performed.
pub fn parse_hex_rgb(hex: &str) -> Rgb {
    let sanitized = hex.replacen('#', "", 1);
    let chars: Vec<char> = sanitized.chars().collect();
    let group = |start: usize| -> String {
        chars
            .iter()
            .skip(start)
            .take(2)
            .collect()
    };

    Rgb {
        r: parse_int_hex(&group(0)),
        g: parse_int_hex(&group(2)),
        b: parse_int_hex(&group(4)),
    }
}

/// Optional whitespace, sign and `0x` prefix, then the longest run of hex
/// digits. NaN when no digit is found.
fn parse_int_hex(s: &str) -> f64 {
    let mut rest = s.trim_start();
    let mut sign = 1.0;
    if let Some(stripped) = rest.strip_prefix('-') {
        sign = -1.0;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }
    if rest.starts_with("0x") || rest.starts_with("0X") {
        rest = &rest[2..];
    }

    let mut value: Option<f64> = None;
    for ch in rest.chars() {
        match ch.to_digit(16) {
            Some(d) => value = Some(value.unwrap_or(0.0) * 16.0 + d as f64),
            None => break,
        }
    }

    value.map_or(f64::NAN, |v| sign * v)
}

/// Lowercase hex for a channel, left-padded with zeros to two characters.
/// Negative values keep their sign (`-1` stays `"-1"`).
pub fn channel_to_hex(value: i64) -> String {
    let digits = if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{:x}", value)
    };
    format!("{:0>2}", digits)
}

/// Build a `#rrggbb` string for a gray level.
pub fn gray_to_hex(level: i64) -> String {
    let channel = channel_to_hex(level);
    format!("#{channel}{channel}{channel}")
}

/// Build a `#rrggbb` string from channels, rounding and clamping to 0-255.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    let clamp = |c: f64| -> u8 { c.round().clamp(0.0, 255.0) as u8 };
    format!("#{:02x}{:02x}{:02x}", clamp(rgb.r), clamp(rgb.g), clamp(rgb.b))
}
