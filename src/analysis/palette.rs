//! Palette audit under simulated color vision deficiencies.
//!
//! A palette is checked pairing by pairing, using the foreground/background
//! combinations a typical landing page draws from it. Unlike the core
//! contrast analysis, colors here go through a CSS parser first, so invalid
//! values are reported as errors instead of producing NaN ratios.

use tracing::{debug, instrument};

use super::contrast::{analyze_contrast, suggest_accessible_color};
use crate::config::AuditConfig;
use crate::error::Result;
use crate::math::color_parse::to_hex;
use crate::math::hex::{parse_hex_rgb, rgb_to_hex};
use crate::math::vision::{simulate, ColorBlindness};
use crate::math::wcag::contrast_ratio;
use crate::types::{Palette, PaletteCheck, PaletteReport, SimulatedColor, SimulatedContrast};

/// A palette with every color normalized to `#rrggbb`.
struct ResolvedPalette {
    primary: String,
    secondary: String,
    accent: String,
    background: String,
    text: String,
    success: String,
    warning: String,
    error: String,
}

impl ResolvedPalette {
    fn resolve(palette: &Palette) -> Result<Self> {
        Ok(Self {
            primary: to_hex(&palette.primary)?,
            secondary: to_hex(&palette.secondary)?,
            accent: to_hex(&palette.accent)?,
            background: to_hex(&palette.background)?,
            text: to_hex(&palette.text)?,
            success: to_hex(&palette.success)?,
            warning: to_hex(&palette.warning)?,
            error: to_hex(&palette.error)?,
        })
    }
}

type Pick = fn(&ResolvedPalette) -> &str;

/// (usage, foreground, background)
const PAIRINGS: [(&str, Pick, Pick); 9] = [
    ("Body text", |p| p.text.as_str(), |p| p.background.as_str()),
    ("Primary button", |p| p.background.as_str(), |p| p.primary.as_str()),
    ("Secondary outline button", |p| p.secondary.as_str(), |p| p.background.as_str()),
    ("Call-to-action banner", |p| p.background.as_str(), |p| p.secondary.as_str()),
    ("Accent button", |p| p.background.as_str(), |p| p.accent.as_str()),
    ("Footer", |p| p.background.as_str(), |p| p.text.as_str()),
    ("Success badge", |p| p.background.as_str(), |p| p.success.as_str()),
    ("Warning badge", |p| p.background.as_str(), |p| p.warning.as_str()),
    ("Error badge", |p| p.background.as_str(), |p| p.error.as_str()),
];

fn simulated_ratio(foreground: &str, background: &str, kind: ColorBlindness) -> f64 {
    let fg = rgb_to_hex(simulate(parse_hex_rgb(foreground), kind));
    let bg = rgb_to_hex(simulate(parse_hex_rgb(background), kind));
    contrast_ratio(&fg, &bg)
}

fn check_pairing(usage: &str, foreground: &str, background: &str, config: &AuditConfig) -> PaletteCheck {
    let contrast = analyze_contrast(foreground, background);
    let meets_target = contrast.ratio >= config.target_ratio;
    let suggestion = if meets_target {
        None
    } else {
        Some(suggest_accessible_color(foreground, background, config.target_ratio))
    };

    let simulations = config
        .simulations
        .iter()
        .map(|&kind| {
            let ratio = simulated_ratio(foreground, background, kind);
            SimulatedContrast {
                kind,
                ratio,
                meets_target: ratio >= config.target_ratio,
            }
        })
        .collect();

    PaletteCheck {
        usage: usage.to_string(),
        foreground: foreground.to_string(),
        background: background.to_string(),
        contrast,
        meets_target,
        suggestion,
        simulations,
    }
}

/// Check every standard pairing of `palette` against `config.target_ratio`,
/// with normal vision and each configured deficiency.
///
/// A check passes only when the pairing meets the target under every
/// simulation as well.
#[instrument(skip_all, fields(target_ratio = config.target_ratio))]
pub fn audit_palette(palette: &Palette, config: &AuditConfig) -> Result<PaletteReport> {
    let resolved = ResolvedPalette::resolve(palette)?;

    let checks: Vec<PaletteCheck> = PAIRINGS
        .iter()
        .map(|(usage, foreground, background)| {
            check_pairing(usage, foreground(&resolved), background(&resolved), config)
        })
        .collect();

    let passed = checks
        .iter()
        .filter(|check| check.meets_target && check.simulations.iter().all(|s| s.meets_target))
        .count() as u32;
    let failed = checks.len() as u32 - passed;

    debug!(passed, failed, "palette audited");

    Ok(PaletteReport {
        target_ratio: config.target_ratio,
        checks,
        passed,
        failed,
    })
}

/// How `color` appears under each of `kinds`.
pub fn simulate_color(color: &str, kinds: &[ColorBlindness]) -> Result<Vec<SimulatedColor>> {
    let rgb = parse_hex_rgb(&to_hex(color)?);

    Ok(kinds
        .iter()
        .map(|&kind| {
            let simulated = simulate(rgb, kind);
            SimulatedColor {
                kind,
                label: kind.label().to_string(),
                description: kind.description().to_string(),
                rgb: simulated,
                hex: rgb_to_hex(simulated),
            }
        })
        .collect())
}
