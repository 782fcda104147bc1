//! Render configuration types, shaped like the chart.js options object.
//!
//! Renderer callbacks (tick labels, tooltip lines) are stored as data: a
//! [`ValueFormat`] or a [`TooltipCallbacks`] variant. Consumers either map
//! them to their renderer's callback mechanism or evaluate them through the
//! methods provided here.

use super::types::{SeriesKind, TooltipEntry};
use crate::config::FontConfig;
use crate::format::{ValueFormat, format_f64, format_labelled};
use serde::Serialize;

/// Axis along which categories are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAxis {
    #[default]
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Start,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub color: String,
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
    pub labels: LegendLabels,
    pub align: Align,
}

/// Hover behaviour. `index` shows every series at the hovered category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: &'static str,
    pub intersect: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            mode: "index",
            intersect: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontWeight {
    pub weight: &'static str,
}

impl FontWeight {
    pub fn normal() -> Self {
        Self { weight: "normal" }
    }
}

/// What a hovered element exposes to the tooltip callbacks.
#[derive(Debug, Clone, Copy)]
pub struct TooltipItem<'a> {
    pub dataset_index: usize,
    pub dataset_label: &'a str,
    pub dataset_kind: SeriesKind,
    /// Value as already formatted by the renderer.
    pub formatted_value: &'a str,
}

/// Tooltip content rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TooltipCallbacks {
    /// Label is `"<series>: <value><suffix>"` for every series.
    Formatted { format: ValueFormat },
    /// Combined charts: bar series use `bar`, line series use `line`.
    #[serde(rename_all = "camelCase")]
    BySeriesKind { bar: ValueFormat, line: ValueFormat },
    /// Scatter/bubble: title, label and footer come from precomputed entries
    /// addressed by dataset index.
    Lookup { entries: Vec<TooltipEntry> },
}

impl TooltipCallbacks {
    pub fn title(&self, dataset_index: usize) -> Option<String> {
        match self {
            TooltipCallbacks::Lookup { entries } => entries.get(dataset_index).map(|e| e.title.clone()),
            _ => None,
        }
    }

    pub fn label(&self, item: &TooltipItem<'_>) -> Option<String> {
        match self {
            TooltipCallbacks::Formatted { format } => {
                Some(format_labelled(item.dataset_label, item.formatted_value, *format))
            }
            TooltipCallbacks::BySeriesKind { bar, line } => {
                let format = if item.dataset_kind == SeriesKind::Bar { bar } else { line };
                Some(format_labelled(item.dataset_label, item.formatted_value, *format))
            }
            TooltipCallbacks::Lookup { entries } => entries.get(item.dataset_index).map(|e| e.label.label()),
        }
    }

    pub fn footer(&self, dataset_index: usize) -> Option<String> {
        match self {
            TooltipCallbacks::Lookup { entries } => entries.get(dataset_index).map(|e| e.text.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub title_font: FontWeight,
    pub footer_font: FontWeight,
    pub callbacks: TooltipCallbacks,
}

impl TooltipOptions {
    pub fn new(callbacks: TooltipCallbacks) -> Self {
        Self {
            title_font: FontWeight::normal(),
            footer_font: FontWeight::normal(),
            callbacks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: LegendOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub align: Align,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub padding: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Grid {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rotation: Option<f64>,
    pub padding: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    /// Tick label format; `None` leaves labels to the renderer.
    #[serde(rename = "callback", skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
    pub grid: Grid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<AxisPosition>,
    pub stacked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub ticks: Ticks,
}

impl Axis {
    /// Tick label for `value`, or `None` when the axis keeps default labels.
    pub fn format_tick(&self, value: f64, locale_tag: &str) -> Option<String> {
        self.ticks.format.map(|f| format_f64(value, f, locale_tag))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<Axis>,
}

/// Complete render configuration of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub index_axis: IndexAxis,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub font: FontConfig,
    /// Locale tag used for tick and value formatting.
    pub locale: String,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}
