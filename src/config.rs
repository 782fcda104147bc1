//! Process-wide chart styling, built once and passed explicitly to the factories.

use crate::chart::palette::Palettes;
use crate::format::DEFAULT_LOCALE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Global font defaults handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub family: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 14.0 * 0.87,
            family: "Montserrat".into(),
        }
    }
}

/// Style, palette, and locale settings shared by every chart.
///
/// Every field has a default, so a JSON file only needs the overrides:
///
/// ```
/// use dashboard_charts::ChartConfig;
///
/// let cfg: ChartConfig = serde_json::from_str(r#"{ "locale": "de" }"#).unwrap();
/// assert_eq!(cfg.locale, "de");
/// assert_eq!(cfg.font_color, "#1c3742");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub font: FontConfig,
    pub font_color: String,
    pub legend_label_padding: f64,
    pub x_axis_label_padding: f64,
    pub y_axis_label_padding: f64,
    /// Locale tag for number formatting (`en`, `de`, ...).
    pub locale: String,
    pub palettes: Palettes,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
            font_color: "#1c3742".into(),
            legend_label_padding: 30.0,
            x_axis_label_padding: 0.0,
            y_axis_label_padding: 15.0,
            locale: DEFAULT_LOCALE.into(),
            palettes: Palettes::default(),
        }
    }
}

impl ChartConfig {
    /// Load overrides from a JSON file; missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(cfg)
    }
}
