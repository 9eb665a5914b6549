use serde::{Deserialize, Serialize};

use crate::math::hex::Rgb;
use crate::math::vision::ColorBlindness;

// ── Shared classifications ────────────────────────────────────────────

/// Outcome of a single check: `"pass" | "warning" | "fail"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warning,
    Fail,
}

/// `"error" | "warning" | "info"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

// ── Contrast ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// NaN when either color failed to parse.
    pub ratio: f64,
    #[serde(rename = "passAA")]
    pub pass_aa: bool,
    #[serde(rename = "passAALarge")]
    pub pass_aa_large: bool,
    #[serde(rename = "passAAA")]
    pub pass_aaa: bool,
    #[serde(rename = "passAAALarge")]
    pub pass_aaa_large: bool,
    pub rating_text: String,
}

// ── Readability ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Rating::Excellent
        } else if score >= 75.0 {
            Rating::Good
        } else if score >= 60.0 {
            Rating::Fair
        } else {
            Rating::Poor
        }
    }

    /// Display color of the rating badge.
    pub fn color(&self) -> &'static str {
        match self {
            Rating::Excellent => "green",
            Rating::Good => "blue",
            Rating::Fair => "orange",
            Rating::Poor => "red",
        }
    }
}

/// Score of one typography dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityScore {
    /// 0-100, rounded.
    pub overall: f64,
    pub rating: Rating,
    /// "green" | "blue" | "orange" | "red"
    pub rating_color: String,
    pub font_size: DimensionScore,
    pub line_height: DimensionScore,
    pub letter_spacing: DimensionScore,
    pub font_weight: DimensionScore,
    /// Never empty.
    pub recommendations: Vec<String>,
    pub strengths: Vec<String>,
}

// ── Semantic HTML ─────────────────────────────────────────────────────

/// `"good" | "warning" | "info"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementStatus {
    Good,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DivSoupKind {
    ExcessiveDivs,
    DivButton,
    MissingSemantic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticElement {
    pub tag: String,
    pub count: u32,
    pub status: ElementStatus,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivSoupIssue {
    #[serde(rename = "type")]
    pub kind: DivSoupKind,
    pub severity: Severity,
    pub element: String,
    pub issue: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Before/after migration hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticSuggestion {
    pub from: String,
    pub to: String,
    pub reason: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticAnalysis {
    pub elements: Vec<SemanticElement>,
    pub div_soup_issues: Vec<DivSoupIssue>,
    pub suggestions: Vec<SemanticSuggestion>,
    pub semantic_score: f64,
    /// `f64::INFINITY` when there are divs but no semantic elements.
    pub div_to_semantic_ratio: f64,
    pub recommendations: Vec<String>,
}

// ── Screen reader ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingNode {
    pub level: u8,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkNode {
    /// ARIA landmark type, e.g. "banner" or "navigation".
    #[serde(rename = "type")]
    pub kind: String,
    /// Set only for landmarks found through an explicit role attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub src: String,
    pub alt: String,
    pub has_alt: bool,
    pub is_decorative: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AriaIssue {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub element: String,
    pub issue: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenReaderAnalysis {
    pub headings: Vec<HeadingNode>,
    pub landmarks: Vec<LandmarkNode>,
    pub images: Vec<ImageNode>,
    pub aria_issues: Vec<AriaIssue>,
    pub screen_reader_text: String,
    pub score: f64,
    pub recommendations: Vec<String>,
}

// ── Touch targets ─────────────────────────────────────────────────────

/// Geometry of one interactive element, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetInput {
    pub id: String,
    pub element: String,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTarget {
    pub id: String,
    pub element: String,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub area: f64,
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacingIssue {
    /// Element name of the first target of the pair.
    pub target1: String,
    pub target2: String,
    pub distance: f64,
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TouchSummary {
    pub total: u32,
    pub pass: u32,
    pub warning: u32,
    pub fail: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTargetAnalysis {
    pub targets: Vec<TouchTarget>,
    pub spacing_issues: Vec<SpacingIssue>,
    pub score: f64,
    pub summary: TouchSummary,
    pub recommendations: Vec<String>,
}

// ── Color vision & palettes ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedColor {
    pub kind: ColorBlindness,
    pub label: String,
    pub description: String,
    pub rgb: Rgb,
    pub hex: String,
}

/// The eight named colors of a design palette. Any CSS color syntax is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#3B82F6".to_string(),
            secondary: "#8B5CF6".to_string(),
            accent: "#EC4899".to_string(),
            background: "#FFFFFF".to_string(),
            text: "#1F2937".to_string(),
            success: "#10B981".to_string(),
            warning: "#F59E0B".to_string(),
            error: "#EF4444".to_string(),
        }
    }
}

/// Contrast of one pairing after a color vision simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedContrast {
    pub kind: ColorBlindness,
    pub ratio: f64,
    pub meets_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteCheck {
    /// Where the pairing appears, e.g. "Body text".
    pub usage: String,
    pub foreground: String,
    pub background: String,
    pub contrast: ContrastResult,
    pub meets_target: bool,
    /// Gray replacement for the foreground, present when the target is missed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub simulations: Vec<SimulatedContrast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteReport {
    pub target_ratio: f64,
    pub checks: Vec<PaletteCheck>,
    pub passed: u32,
    pub failed: u32,
}

// ── Batch ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlDocument {
    pub name: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub name: String,
    pub semantic: SemanticAnalysis,
    pub screen_reader: ScreenReaderAnalysis,
}
