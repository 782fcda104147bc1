//! Public types of the chart shaping layer.

use crate::error::ChartError;
use crate::format::ValueFormat;
use crate::models::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart types a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Pie,
    Doughnut,
    Scatter,
    Bubble,
    /// Bars on the left axis, lines on the right axis.
    Combined,
}

/// Builder families; every chart type belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartFamily {
    /// line, bar, area
    Basic,
    Combined,
    /// pie, doughnut
    Radial,
    /// scatter, bubble
    Point,
}

impl ChartType {
    pub const ALL: [ChartType; 8] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Area,
        ChartType::Pie,
        ChartType::Doughnut,
        ChartType::Scatter,
        ChartType::Bubble,
        ChartType::Combined,
    ];

    pub fn family(self) -> ChartFamily {
        match self {
            ChartType::Line | ChartType::Bar | ChartType::Area => ChartFamily::Basic,
            ChartType::Combined => ChartFamily::Combined,
            ChartType::Pie | ChartType::Doughnut => ChartFamily::Radial,
            ChartType::Scatter | ChartType::Bubble => ChartFamily::Point,
        }
    }

    /// Chart type passed to the renderer: areas are filled lines, combined
    /// charts are bar charts with line datasets mixed in.
    pub fn render_kind(self) -> SeriesKind {
        match self {
            ChartType::Line | ChartType::Area => SeriesKind::Line,
            ChartType::Bar | ChartType::Combined => SeriesKind::Bar,
            ChartType::Pie => SeriesKind::Pie,
            ChartType::Doughnut => SeriesKind::Doughnut,
            ChartType::Scatter => SeriesKind::Scatter,
            ChartType::Bubble => SeriesKind::Bubble,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Area => "area",
            ChartType::Pie => "pie",
            ChartType::Doughnut => "doughnut",
            ChartType::Scatter => "scatter",
            ChartType::Bubble => "bubble",
            ChartType::Combined => "combined",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ChartError::UnknownChartType(s.to_string()))
    }
}

/// Per-dataset chart type tag understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Pie,
    Doughnut,
    Scatter,
    Bubble,
}

/// Value axis a series is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    Y,
    Y2,
}

/// Scatter/bubble data point. `r` is only present for bubbles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: Cell,
    pub y: Cell,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<Cell>),
    Points(Vec<Point>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(v) => v.len(),
            SeriesData::Points(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Option<&[Cell]> {
        match self {
            SeriesData::Values(v) => Some(v),
            SeriesData::Points(_) => None,
        }
    }

    pub fn points(&self) -> Option<&[Point]> {
        match self {
            SeriesData::Points(p) => Some(p),
            SeriesData::Values(_) => None,
        }
    }
}

/// A single color, or one color per data point (pie/doughnut slices).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

/// One plotted line, bar group, slice set, or point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    #[serde(rename = "yAxisID", skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<AxisId>,
    /// Drawing order; lower values are drawn on top.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<f64>,
}

impl Series {
    pub(crate) fn new(label: String, kind: SeriesKind, data: SeriesData) -> Self {
        Self {
            label,
            kind,
            data,
            background_color: None,
            border_color: None,
            y_axis_id: None,
            order: None,
            fill: None,
            point_radius: None,
            radius: None,
            point_hover_radius: None,
        }
    }
}

/// Category labels plus the series drawn over them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NormalizedChartDataset {
    pub labels: Vec<String>,
    #[serde(rename = "datasets")]
    pub series: Vec<Series>,
}

/// Value formats per axis. Single-axis charts read `y`; combined charts read
/// `y` (left) and `y_right`; scatter/bubble read `x`, `y`, and `r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValueFormats {
    pub x: ValueFormat,
    pub y: ValueFormat,
    pub y_right: ValueFormat,
    pub r: ValueFormat,
}

impl ValueFormats {
    pub fn single(y: ValueFormat) -> Self {
        Self { y, ..Self::default() }
    }

    pub fn dual(left: ValueFormat, right: ValueFormat) -> Self {
        Self { y: left, y_right: right, ..Self::default() }
    }

    pub fn point(x: ValueFormat, y: ValueFormat, r: ValueFormat) -> Self {
        Self { x, y, r, ..Self::default() }
    }
}

/// Precomputed tooltip content of one scatter/bubble point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipEntry {
    pub title: String,
    pub label: Cell,
    /// Newline separated `"<key>: <value>"` lines.
    pub text: String,
}
