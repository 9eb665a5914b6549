#[macro_use]
extern crate napi_derive;

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod math;
pub mod parser;
pub mod types;

use napi::{Env, JsObject, JsUnknown};

use crate::analysis::contrast::DEFAULT_TARGET_RATIO;
use crate::analysis::readability::Typography;
use crate::config::AuditConfig;
use crate::math::vision::ColorBlindness;
use crate::types::{HtmlDocument, Palette, TargetInput};

#[napi(js_name = "analyzeContrast")]
pub fn analyze_contrast(env: Env, text_hex: String, bg_hex: String) -> napi::Result<JsUnknown> {
    env.to_js_value(&analysis::contrast::analyze_contrast(&text_hex, &bg_hex))
}

#[napi(js_name = "suggestAccessibleColor")]
pub fn suggest_accessible_color(text_hex: String, bg_hex: String, target_ratio: Option<f64>) -> String {
    analysis::contrast::suggest_accessible_color(
        &text_hex,
        &bg_hex,
        target_ratio.unwrap_or(DEFAULT_TARGET_RATIO),
    )
}

#[napi(js_name = "analyzeReadability")]
pub fn analyze_readability(
    env: Env,
    font_size: f64,
    line_height: f64,
    letter_spacing: f64,
    font_weight: f64,
    dyslexia_mode: bool,
) -> napi::Result<JsUnknown> {
    let settings = Typography {
        font_size,
        line_height,
        letter_spacing,
        font_weight,
        dyslexia_mode,
    };
    env.to_js_value(&analysis::readability::analyze_readability(settings))
}

/// Slider settings for a named preset (`comfortable`, `large`, `dyslexia`,
/// `compact`), or `null` for an unknown name.
#[napi(js_name = "typographyPreset")]
pub fn typography_preset(env: Env, name: String) -> napi::Result<JsUnknown> {
    env.to_js_value(&Typography::preset(&name))
}

#[napi(js_name = "analyzeSemanticHTML")]
pub fn analyze_semantic_html(env: Env, html: String) -> napi::Result<JsUnknown> {
    env.to_js_value(&analysis::semantic::analyze_semantic_html(&html))
}

#[napi(js_name = "analyzeForScreenReader")]
pub fn analyze_for_screen_reader(env: Env, html: String) -> napi::Result<JsUnknown> {
    env.to_js_value(&analysis::screen_reader::analyze_for_screen_reader(&html))
}

#[napi(js_name = "analyzeTouchTargets")]
pub fn analyze_touch_targets(env: Env, targets: JsUnknown) -> napi::Result<JsUnknown> {
    let targets: Vec<TargetInput> = env.from_js_value(targets)?;
    env.to_js_value(&analysis::touch_target::analyze_touch_targets(&targets))
}

/// Opening-tag counts keyed by lowercased tag name.
#[napi(js_name = "countElements")]
pub fn count_elements(env: Env, html: String) -> napi::Result<JsUnknown> {
    env.to_js_value(&parser::count_elements(&html))
}

/// How `color` looks under each requested deficiency (all nine by default).
#[napi(js_name = "simulateColorBlindness")]
pub fn simulate_color_blindness(env: Env, color: String, kinds: Option<Vec<String>>) -> napi::Result<JsUnknown> {
    let kinds = match kinds {
        Some(names) => names
            .iter()
            .map(|name| name.parse::<ColorBlindness>())
            .collect::<error::Result<Vec<_>>>()?,
        None => ColorBlindness::ALL.to_vec(),
    };
    let views = analysis::palette::simulate_color(&color, &kinds)?;
    env.to_js_value(&views)
}

/// Audit a palette; missing palette colors take the editor defaults and
/// `config` is an optional JSON string of `AuditConfig`.
#[napi(js_name = "auditPalette")]
pub fn audit_palette(env: Env, palette: Option<JsObject>, config: Option<String>) -> napi::Result<JsUnknown> {
    let palette: Palette = match palette {
        Some(object) => env.from_js_value(object)?,
        None => Palette::default(),
    };
    let config = AuditConfig::from_json(config.as_deref())?;
    let report = analysis::palette::audit_palette(&palette, &config)?;
    env.to_js_value(&report)
}

#[napi(js_name = "auditDocuments")]
pub fn audit_documents(env: Env, documents: JsUnknown) -> napi::Result<JsUnknown> {
    let documents: Vec<HtmlDocument> = env.from_js_value(documents)?;
    env.to_js_value(&engine::audit_documents(&documents))
}

#[napi(js_name = "initLogging")]
pub fn init_logging(filter: Option<String>) -> napi::Result<()> {
    logging::init(filter.as_deref())?;
    Ok(())
}

#[napi]
pub fn health_check() -> String {
    "a11y-toolkit-native ok".to_string()
}
