//! Typography readability scoring.
//!
//! Every dimension is scored by an ordered band table: the first band whose
//! predicate accepts the value wins, and the last band of each table accepts
//! everything (including NaN). Recommendations and strengths are independent
//! rule lists evaluated in order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{format_fixed, format_number};
use crate::types::{DimensionScore, Rating, ReadabilityScore, Status};

/// Base font size the percentage is relative to.
const BASE_FONT_PX: f64 = 16.0;
const DYSLEXIA_BONUS: f64 = 1.05;

const FONT_SIZE_WEIGHT: f64 = 0.3;
const LINE_HEIGHT_WEIGHT: f64 = 0.3;
const LETTER_SPACING_WEIGHT: f64 = 0.2;
const FONT_WEIGHT_WEIGHT: f64 = 0.2;

/// The settings being judged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Percentage of the 16px base size.
    pub font_size: f64,
    /// Unitless multiplier.
    pub line_height: f64,
    /// Pixels, may be negative.
    pub letter_spacing: f64,
    /// CSS numeric weight.
    pub font_weight: f64,
    pub dyslexia_mode: bool,
}

impl Default for Typography {
    /// Browser defaults: 16px, 1.5 line height, normal spacing and weight.
    fn default() -> Self {
        Self {
            font_size: 100.0,
            line_height: 1.5,
            letter_spacing: 0.0,
            font_weight: 400.0,
            dyslexia_mode: false,
        }
    }
}

/// Named starting points offered next to the sliders.
const PRESETS: [(&str, Typography); 4] = [
    ("comfortable", Typography { font_size: 110.0, line_height: 1.6, letter_spacing: 0.5, font_weight: 400.0, dyslexia_mode: false }),
    ("large", Typography { font_size: 150.0, line_height: 1.7, letter_spacing: 1.0, font_weight: 500.0, dyslexia_mode: false }),
    ("dyslexia", Typography { font_size: 120.0, line_height: 1.8, letter_spacing: 1.5, font_weight: 400.0, dyslexia_mode: true }),
    ("compact", Typography { font_size: 90.0, line_height: 1.4, letter_spacing: 0.0, font_weight: 400.0, dyslexia_mode: false }),
];

impl Typography {
    /// Look up a preset by name, ignoring ASCII case.
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name.trim()))
            .map(|(_, settings)| *settings)
    }
}

struct Band {
    accepts: fn(f64) -> bool,
    score: f64,
    status: Status,
    label: &'static str,
    note: &'static str,
}

struct Dimension {
    bands: &'static [Band],
    /// How the measured value is shown inside the message.
    show: fn(f64) -> String,
}

impl Dimension {
    fn score(&self, value: f64) -> DimensionScore {
        // The last band accepts everything, so a match always exists.
        let band = self
            .bands
            .iter()
            .find(|band| (band.accepts)(value))
            .unwrap_or(&self.bands[self.bands.len() - 1]);

        DimensionScore {
            score: band.score,
            status: band.status,
            message: format!("{} ({}) - {}", band.label, (self.show)(value), band.note),
        }
    }
}

const FONT_SIZE: Dimension = Dimension {
    show: |pct| format!("{}px", format_fixed(BASE_FONT_PX * pct / 100.0, 1)),
    bands: &[
        Band { accepts: |v| v >= 100.0 && v <= 150.0, score: 100.0, status: Status::Pass, label: "Perfect size", note: "Meets WCAG standards" },
        Band { accepts: |v| v >= 90.0 && v < 100.0, score: 75.0, status: Status::Warning, label: "Slightly small", note: "Consider increasing" },
        Band { accepts: |v| v > 150.0 && v <= 175.0, score: 85.0, status: Status::Pass, label: "Large size", note: "Good for low vision users" },
        Band { accepts: |v| v > 175.0, score: 70.0, status: Status::Warning, label: "Very large", note: "May reduce content visibility" },
        Band { accepts: |_| true, score: 40.0, status: Status::Fail, label: "Too small", note: "Fails WCAG minimum" },
    ],
};

const LINE_HEIGHT: Dimension = Dimension {
    show: |v| format_fixed(v, 1),
    bands: &[
        Band { accepts: |v| v >= 1.5 && v <= 1.8, score: 100.0, status: Status::Pass, label: "Optimal spacing", note: "WCAG recommended" },
        Band { accepts: |v| v >= 1.4 && v < 1.5, score: 80.0, status: Status::Warning, label: "Slightly tight", note: "Consider increasing" },
        Band { accepts: |v| v > 1.8 && v <= 2.2, score: 85.0, status: Status::Pass, label: "Generous spacing", note: "Very comfortable" },
        Band { accepts: |v| v < 1.4, score: 50.0, status: Status::Fail, label: "Too tight", note: "Reduces readability" },
        Band { accepts: |_| true, score: 60.0, status: Status::Warning, label: "Too loose", note: "May disrupt reading flow" },
    ],
};

const LETTER_SPACING: Dimension = Dimension {
    show: |v| format!("{}px", format_number(v)),
    bands: &[
        Band { accepts: |v| v >= 0.0 && v <= 1.5, score: 100.0, status: Status::Pass, label: "Good spacing", note: "Enhances readability" },
        Band { accepts: |v| v > 1.5 && v <= 3.0, score: 85.0, status: Status::Pass, label: "Wide spacing", note: "Helpful for dyslexia" },
        Band { accepts: |v| v >= -1.0 && v < 0.0, score: 75.0, status: Status::Warning, label: "Slightly tight", note: "May reduce clarity" },
        Band { accepts: |v| v > 3.0, score: 60.0, status: Status::Warning, label: "Too wide", note: "May slow reading speed" },
        Band { accepts: |_| true, score: 40.0, status: Status::Fail, label: "Too tight", note: "Difficult to read" },
    ],
};

const FONT_WEIGHT: Dimension = Dimension {
    show: format_number,
    bands: &[
        Band { accepts: |v| v >= 400.0 && v <= 500.0, score: 100.0, status: Status::Pass, label: "Optimal weight", note: "Clear and readable" },
        Band { accepts: |v| v == 300.0 || v == 600.0, score: 90.0, status: Status::Pass, label: "Good weight", note: "Acceptable for most uses" },
        Band { accepts: |v| v == 700.0, score: 80.0, status: Status::Pass, label: "Bold", note: "Good for emphasis, tiring for body text" },
        Band { accepts: |v| v <= 200.0, score: 50.0, status: Status::Fail, label: "Too light", note: "Poor contrast, hard to read" },
        Band { accepts: |_| true, score: 70.0, status: Status::Warning, label: "Very bold", note: "May cause eye strain in body text" },
    ],
};

type Rule = (fn(&Typography) -> bool, &'static str);

const RECOMMENDATIONS: &[Rule] = &[
    (|t| t.font_size < 100.0, "Increase font size to at least 100% (16px) for better accessibility"),
    (|t| t.font_size > 175.0, "Consider reducing font size to improve content density"),
    (|t| t.line_height < 1.5, "Increase line height to at least 1.5 for WCAG compliance"),
    (|t| t.line_height > 2.2, "Reduce line height to maintain reading flow"),
    (|t| t.letter_spacing < 0.0, "Avoid negative letter spacing as it reduces readability"),
    (|t| t.letter_spacing > 3.0, "Excessive letter spacing may slow reading speed"),
    (|t| t.font_weight <= 200.0, "Use at least 300 weight for body text to ensure clarity"),
    (|t| t.font_weight >= 700.0 && t.font_size < 120.0, "Bold text works better with larger font sizes"),
    (|t| !t.dyslexia_mode && t.letter_spacing < 1.0, "Consider enabling dyslexia mode or increasing letter spacing"),
];

const WELL_OPTIMIZED: &str = "Your settings are well-optimized for readability!";

const STRENGTHS: &[Rule] = &[
    (|t| t.font_size >= 100.0 && t.font_size <= 150.0, "Font size meets WCAG minimum requirements"),
    (|t| t.font_size >= 120.0, "Large font size benefits users with low vision"),
    (|t| t.line_height >= 1.5 && t.line_height <= 1.8, "Line height follows WCAG best practices"),
    (|t| t.letter_spacing > 0.5, "Letter spacing aids readability for dyslexic users"),
    (|t| t.font_weight >= 400.0 && t.font_weight <= 500.0, "Font weight is optimal for extended reading"),
    (|t| t.dyslexia_mode, "Dyslexia-friendly font reduces character confusion"),
];

fn collect(rules: &[Rule], settings: &Typography) -> Vec<String> {
    rules
        .iter()
        .filter(|(applies, _)| applies(settings))
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Score typography settings for readability.
pub fn analyze_readability(settings: Typography) -> ReadabilityScore {
    let font_size = FONT_SIZE.score(settings.font_size);
    let line_height = LINE_HEIGHT.score(settings.line_height);
    let letter_spacing = LETTER_SPACING.score(settings.letter_spacing);
    let font_weight = FONT_WEIGHT.score(settings.font_weight);

    let weighted = font_size.score * FONT_SIZE_WEIGHT
        + line_height.score * LINE_HEIGHT_WEIGHT
        + letter_spacing.score * LETTER_SPACING_WEIGHT
        + font_weight.score * FONT_WEIGHT_WEIGHT;
    let bonus = if settings.dyslexia_mode { DYSLEXIA_BONUS } else { 1.0 };
    let overall = (weighted * bonus).round().min(100.0);

    let rating = Rating::from_score(overall);

    let mut recommendations = collect(RECOMMENDATIONS, &settings);
    if recommendations.is_empty() {
        recommendations.push(WELL_OPTIMIZED.to_string());
    }
    let strengths = collect(STRENGTHS, &settings);

    debug!(overall, ?rating, recommendations = recommendations.len(), "readability analyzed");

    ReadabilityScore {
        overall,
        rating,
        rating_color: rating.color().to_string(),
        font_size,
        line_height,
        letter_spacing,
        font_weight,
        recommendations,
        strengths,
    }
}
