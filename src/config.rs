use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::math::vision::ColorBlindness;

/// Options for the palette audit and batch entry points.
/// Every field is optional on the JS side; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    /// Contrast ratio a palette pairing must reach, and the target used
    /// when suggesting a replacement color.
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,

    /// Color vision deficiencies to re-check each palette pairing under.
    #[serde(default = "default_simulations")]
    pub simulations: Vec<ColorBlindness>,
}

fn default_target_ratio() -> f64 {
    4.5
}

fn default_simulations() -> Vec<ColorBlindness> {
    ColorBlindness::ALL
        .into_iter()
        .filter(|kind| *kind != ColorBlindness::Normal)
        .collect()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            target_ratio: default_target_ratio(),
            simulations: default_simulations(),
        }
    }
}

impl AuditConfig {
    /// Parse a JSON config. `None` or blank input yields the defaults.
    pub fn from_json(json: Option<&str>) -> Result<Self> {
        match json.map(str::trim) {
            None | Some("") => {
                debug!("no audit config supplied, using defaults");
                Ok(Self::default())
            }
            Some(raw) => {
                let config: Self = serde_json::from_str(raw)?;
                debug!(target_ratio = config.target_ratio, simulations = config.simulations.len(), "loaded audit config");
                Ok(config)
            }
        }
    }
}
