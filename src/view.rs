//! Component views: resolve a [`Dataset`] into what a dashboard widget shows.
//!
//! Every widget goes through the same states. A pending request shows a
//! loading indicator, an empty result or an upstream error shows a message,
//! and rows are shaped into the widget's view model.

use crate::chart::{
    ChartType, NormalizedChartDataset, OptionsCustomization, RenderOptions, SeriesKind, ValueFormats,
    calculate_data_percentage, canvas_setup, chart_data_setup, create_bubble_chart_tooltip_dataset,
};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::format::ValueFormat;
use crate::models::{Dataset, Row, SummaryType};
use crate::scorecard::summarize_data_locale;
use crate::table::{TableOptions, TableView, build_table_view};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Message shown for an empty result set.
pub const NO_DATA_MESSAGE: &str = "No data available for your request.";

/// What a widget displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum ViewState<T> {
    Loading,
    /// Empty dataset or upstream error; the text is user-visible.
    Message(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            ViewState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// Shared state resolution; `shape` only runs for non-empty, error-free rows.
fn resolve<T>(dataset: &Dataset, shape: impl FnOnce(&[Row]) -> Result<T>) -> Result<ViewState<T>> {
    match dataset {
        Dataset::Loading => Ok(ViewState::Loading),
        Dataset::Empty => Ok(ViewState::Message(NO_DATA_MESSAGE.to_string())),
        Dataset::Failed(err) => Ok(ViewState::Message(err.header.clone())),
        Dataset::Rows(rows) if rows.is_empty() => Ok(ViewState::Message(NO_DATA_MESSAGE.to_string())),
        Dataset::Rows(rows) => shape(rows).map(ViewState::Ready),
    }
}

/// Bar and area charts can show each category as shares of 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StackMode {
    #[default]
    Normal,
    #[serde(rename = "percentage100")]
    Percentage100,
}

/// Everything a chart widget is configured with besides its dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProps {
    pub chart_type: ChartType,
    /// Value columns; bar columns of a combined chart.
    pub keys: Vec<String>,
    /// Line columns of a combined chart.
    #[serde(default)]
    pub line_keys: Option<Vec<String>>,
    #[serde(default)]
    pub options: OptionsCustomization,
    #[serde(default)]
    pub stack_mode: StackMode,
    #[serde(default)]
    pub formats: ValueFormats,
}

impl ChartProps {
    pub fn new(chart_type: ChartType, keys: &[&str]) -> Self {
        Self {
            chart_type,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            line_keys: None,
            options: OptionsCustomization::default(),
            stack_mode: StackMode::Normal,
            formats: ValueFormats::default(),
        }
    }

    fn percentage_stack(&self) -> bool {
        if self.stack_mode != StackMode::Percentage100 {
            return false;
        }
        let supported = matches!(self.chart_type, ChartType::Bar | ChartType::Area);
        if !supported {
            warn!("stack mode percentage100 ignored for {} charts", self.chart_type);
        }
        supported
    }
}

/// Dataset, options, and renderer chart type of a ready chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub render_type: SeriesKind,
    pub data: NormalizedChartDataset,
    pub options: RenderOptions,
}

/// Resolve a chart widget.
///
/// In `percentage100` stack mode, bar and area values are rewritten as row
/// shares, the value axis switches to percent, and bars are stacked.
pub fn render_chart(dataset: &Dataset, props: &ChartProps, config: &ChartConfig) -> Result<ViewState<ChartView>> {
    resolve(dataset, |rows| {
        let chart_type = props.chart_type;
        let mut options = props.options.clone();
        let mut formats = props.formats;
        let percentage = props.percentage_stack();

        let shares;
        let rows = if percentage {
            options.stack = true;
            formats.y = ValueFormat::Percent;
            shares = calculate_data_percentage(rows, &props.keys)?;
            &shares[..]
        } else {
            rows
        };

        let data = chart_data_setup(
            rows,
            chart_type,
            &props.keys,
            props.line_keys.as_deref(),
            &config.palettes,
        )?;
        let tooltips = match chart_type {
            ChartType::Scatter | ChartType::Bubble => Some(create_bubble_chart_tooltip_dataset(
                rows,
                chart_type,
                formats,
                &props.keys,
                &config.locale,
            )?),
            _ => None,
        };
        let options = canvas_setup(&options, chart_type, formats, tooltips.as_deref(), config)?;
        debug!("{} chart ready with {} series", chart_type, data.series.len());

        Ok(ChartView {
            render_type: chart_type.render_kind(),
            data,
            options,
        })
    })
}

/// Resolve a table widget.
pub fn render_table(dataset: &Dataset, options: &TableOptions, config: &ChartConfig) -> Result<ViewState<TableView>> {
    resolve(dataset, |rows| build_table_view(rows, options, &config.locale))
}

/// Scorecard widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardProps {
    pub summary_key: String,
    #[serde(default)]
    pub summary_type: SummaryType,
    #[serde(default)]
    pub value_format: ValueFormat,
}

/// Resolve a scorecard widget to its formatted figure.
pub fn render_scorecard(dataset: &Dataset, props: &ScorecardProps, config: &ChartConfig) -> Result<ViewState<String>> {
    resolve(dataset, |rows| {
        summarize_data_locale(rows, &props.summary_key, props.summary_type, props.value_format, &config.locale)
    })
}
