use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::hex::Rgb;
use crate::error::AuditError;

/// Color vision deficiency kinds offered by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBlindness {
    Normal,
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Protanomaly,
    Deuteranomaly,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

type Matrix = [[f64; 3]; 3];

const PROTANOPIA: Matrix = [[0.567, 0.433, 0.0], [0.558, 0.442, 0.0], [0.0, 0.242, 0.758]];
const PROTANOMALY: Matrix = [[0.817, 0.183, 0.0], [0.333, 0.667, 0.0], [0.0, 0.125, 0.875]];
const DEUTERANOPIA: Matrix = [[0.625, 0.375, 0.0], [0.7, 0.3, 0.0], [0.0, 0.3, 0.7]];
const DEUTERANOMALY: Matrix = [[0.8, 0.2, 0.0], [0.258, 0.742, 0.0], [0.0, 0.142, 0.858]];
const TRITANOPIA: Matrix = [[0.95, 0.05, 0.0], [0.0, 0.433, 0.567], [0.0, 0.475, 0.525]];
const TRITANOMALY: Matrix = [[0.967, 0.033, 0.0], [0.0, 0.733, 0.267], [0.0, 0.183, 0.817]];

impl ColorBlindness {
    pub const ALL: [ColorBlindness; 9] = [
        ColorBlindness::Normal,
        ColorBlindness::Protanopia,
        ColorBlindness::Deuteranopia,
        ColorBlindness::Tritanopia,
        ColorBlindness::Protanomaly,
        ColorBlindness::Deuteranomaly,
        ColorBlindness::Tritanomaly,
        ColorBlindness::Achromatopsia,
        ColorBlindness::Achromatomaly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBlindness::Normal => "normal",
            ColorBlindness::Protanopia => "protanopia",
            ColorBlindness::Deuteranopia => "deuteranopia",
            ColorBlindness::Tritanopia => "tritanopia",
            ColorBlindness::Protanomaly => "protanomaly",
            ColorBlindness::Deuteranomaly => "deuteranomaly",
            ColorBlindness::Tritanomaly => "tritanomaly",
            ColorBlindness::Achromatopsia => "achromatopsia",
            ColorBlindness::Achromatomaly => "achromatomaly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorBlindness::Normal => "Normal Vision",
            ColorBlindness::Protanopia => "Protanopia",
            ColorBlindness::Deuteranopia => "Deuteranopia",
            ColorBlindness::Tritanopia => "Tritanopia",
            ColorBlindness::Protanomaly => "Protanomaly",
            ColorBlindness::Deuteranomaly => "Deuteranomaly",
            ColorBlindness::Tritanomaly => "Tritanomaly",
            ColorBlindness::Achromatopsia => "Achromatopsia",
            ColorBlindness::Achromatomaly => "Achromatomaly",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ColorBlindness::Normal => "No color blindness",
            ColorBlindness::Protanopia => "Red-blind (1% of males)",
            ColorBlindness::Deuteranopia => "Green-blind (1% of males)",
            ColorBlindness::Tritanopia => "Blue-blind (rare)",
            ColorBlindness::Protanomaly => "Red-weak (1% of males)",
            ColorBlindness::Deuteranomaly => "Green-weak (most common, 6% of males)",
            ColorBlindness::Tritanomaly => "Blue-weak (rare)",
            ColorBlindness::Achromatopsia => "Complete color blindness (very rare)",
            ColorBlindness::Achromatomaly => "Incomplete color blindness (rare)",
        }
    }
}

impl fmt::Display for ColorBlindness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorBlindness {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ColorBlindness::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| AuditError::UnknownDeficiency(s.to_string()))
    }
}

/// Simulate how `rgb` (0-255 channels) is perceived with the given deficiency.
///
/// The dichromacy/anomalous-trichromacy matrices are applied in linear-light
/// RGB, which is what an SVG `feColorMatrix` does under the default
/// `color-interpolation-filters: linearRGB`. Achromatopsia and achromatomaly
/// follow CSS `grayscale(100%)` and `grayscale(50%)`, which operate on sRGB.
pub fn simulate(rgb: Rgb, kind: ColorBlindness) -> Rgb {
    match kind {
        ColorBlindness::Normal => rgb,
        ColorBlindness::Protanopia => apply_linear(rgb, &PROTANOPIA),
        ColorBlindness::Protanomaly => apply_linear(rgb, &PROTANOMALY),
        ColorBlindness::Deuteranopia => apply_linear(rgb, &DEUTERANOPIA),
        ColorBlindness::Deuteranomaly => apply_linear(rgb, &DEUTERANOMALY),
        ColorBlindness::Tritanopia => apply_linear(rgb, &TRITANOPIA),
        ColorBlindness::Tritanomaly => apply_linear(rgb, &TRITANOMALY),
        ColorBlindness::Achromatopsia => apply_srgb(rgb, &grayscale(1.0)),
        ColorBlindness::Achromatomaly => apply_srgb(rgb, &grayscale(0.5)),
    }
}

/// Filter Effects `grayscale(amount)` matrix.
fn grayscale(amount: f64) -> Matrix {
    let k = 1.0 - amount;
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

fn multiply(m: &Matrix, v: [f64; 3]) -> [f64; 3] {
    let row = |r: &[f64; 3]| (r[0] * v[0] + r[1] * v[1] + r[2] * v[2]).clamp(0.0, 1.0);
    [row(&m[0]), row(&m[1]), row(&m[2])]
}

fn apply_srgb(rgb: Rgb, m: &Matrix) -> Rgb {
    let [r, g, b] = multiply(m, [rgb.r / 255.0, rgb.g / 255.0, rgb.b / 255.0]);
    Rgb {
        r: r * 255.0,
        g: g * 255.0,
        b: b * 255.0,
    }
}

fn apply_linear(rgb: Rgb, m: &Matrix) -> Rgb {
    let [r, g, b] = multiply(
        m,
        [srgb_to_linear(rgb.r), srgb_to_linear(rgb.g), srgb_to_linear(rgb.b)],
    );
    Rgb {
        r: linear_to_srgb(r),
        g: linear_to_srgb(g),
        b: linear_to_srgb(b),
    }
}

fn srgb_to_linear(channel: f64) -> f64 {
    let v = channel / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f64) -> f64 {
    let s = if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    s * 255.0
}
