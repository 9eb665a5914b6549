use csscolorparser::Color;

use crate::error::{AuditError, Result};

/// Normalize any CSS color value to a lowercase 6-digit hex string.
/// Handles: hex (3, 4, 6 or 8 digits), rgb(), hsl(), hwb(), named colors.
/// Alpha is discarded; palette colors are treated as opaque.
///
/// Keywords without a concrete color (transparent, inherit, currentColor,
/// initial, unset) and unparseable values are rejected.
pub fn to_hex(value: &str) -> Result<String> {
    let trimmed = value.trim();

    match trimmed.to_lowercase().as_str() {
        "transparent" | "inherit" | "currentcolor" | "initial" | "unset" | "" => {
            return Err(AuditError::InvalidColor(value.to_string()));
        }
        _ => {}
    }

    match trimmed.parse::<Color>() {
        Ok(color) => {
            let [r, g, b, _a] = color.to_rgba8();
            Ok(format!("#{:02x}{:02x}{:02x}", r, g, b))
        }
        Err(_) => Err(AuditError::InvalidColor(value.to_string())),
    }
}
