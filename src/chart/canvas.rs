//! Canvas factory: user customization + value formats -> [`RenderOptions`].

use super::options::{
    Align, Axis, AxisPosition, AxisTitle, Grid, IndexAxis, Interaction, LegendLabels, LegendOptions,
    LegendPosition, Plugins, RenderOptions, Scales, Ticks, TooltipCallbacks, TooltipOptions,
};
use super::types::{ChartFamily, ChartType, TooltipEntry, ValueFormats};
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::format::ValueFormat;
use serde::{Deserialize, Serialize};

/// Percent axes are clamped to 0..=100 with a tick every 20.
const PERCENT_MIN: f64 = 0.0;
const PERCENT_MAX: f64 = 100.0;
const PERCENT_STEP: f64 = 20.0;
const TICK_PADDING: f64 = 5.0;

/// Display customization supplied by the caller. Fields not meaningful for
/// a chart type are ignored (e.g. `half_pie_chart` on a bar chart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsCustomization {
    pub show_legend: bool,
    pub half_pie_chart: bool,
    pub show_grid_x: bool,
    pub show_grid_y: bool,
    pub show_grid_right_y: bool,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub y_right_axis_title: Option<String>,
    /// Stack bar series; lines never stack, areas always do.
    pub stack: bool,
    /// Lay categories out along the y axis.
    pub horizontal: bool,
}

impl Default for OptionsCustomization {
    fn default() -> Self {
        Self {
            show_legend: true,
            half_pie_chart: false,
            show_grid_x: true,
            show_grid_y: true,
            show_grid_right_y: false,
            x_axis_title: None,
            y_axis_title: None,
            y_right_axis_title: None,
            stack: false,
            horizontal: false,
        }
    }
}

struct CanvasInput<'a> {
    options: &'a OptionsCustomization,
    chart_type: ChartType,
    formats: ValueFormats,
    tooltips: Option<&'a [TooltipEntry]>,
    config: &'a ChartConfig,
}

type CanvasBuilder = fn(RenderOptions, &CanvasInput<'_>) -> Result<RenderOptions>;

fn canvas_builder(family: ChartFamily) -> CanvasBuilder {
    match family {
        ChartFamily::Radial => radial_settings,
        ChartFamily::Basic => basic_settings,
        ChartFamily::Combined => combined_settings,
        ChartFamily::Point => point_settings,
    }
}

/// Build the render configuration of `chart_type`.
///
/// `tooltips` is required for scatter and bubble charts and ignored otherwise;
/// pass the output of [`super::create_bubble_chart_tooltip_dataset`].
pub fn canvas_setup(
    options: &OptionsCustomization,
    chart_type: ChartType,
    formats: ValueFormats,
    tooltips: Option<&[TooltipEntry]>,
    config: &ChartConfig,
) -> Result<RenderOptions> {
    let input = CanvasInput {
        options,
        chart_type,
        formats,
        tooltips,
        config,
    };
    canvas_builder(chart_type.family())(base_settings(options, config), &input)
}

fn base_settings(options: &OptionsCustomization, config: &ChartConfig) -> RenderOptions {
    RenderOptions {
        index_axis: IndexAxis::X,
        responsive: true,
        maintain_aspect_ratio: false,
        font: config.font.clone(),
        locale: config.locale.clone(),
        plugins: Plugins {
            legend: LegendOptions {
                display: options.show_legend,
                position: LegendPosition::Bottom,
                labels: LegendLabels {
                    color: config.font_color.clone(),
                    padding: config.legend_label_padding,
                },
                align: Align::Start,
            },
            tooltip: None,
        },
        interaction: Some(Interaction::default()),
        rotation: None,
        circumference: None,
        scales: None,
    }
}

fn radial_settings(mut canvas: RenderOptions, input: &CanvasInput<'_>) -> Result<RenderOptions> {
    let half = input.options.half_pie_chart;
    canvas.plugins.tooltip = Some(TooltipOptions::new(TooltipCallbacks::Formatted {
        format: input.formats.y,
    }));
    canvas.rotation = Some(if half { -90.0 } else { 0.0 });
    canvas.circumference = Some(if half { 180.0 } else { 360.0 });
    Ok(canvas)
}

fn axis_title(text: Option<&String>, padding: f64, config: &ChartConfig) -> AxisTitle {
    let text = text.filter(|t| !t.is_empty()).cloned();
    AxisTitle {
        display: text.is_some(),
        align: Align::Center,
        text,
        padding,
        color: config.font_color.clone(),
    }
}

/// Value axis; percent formats get fixed bounds and step.
fn value_axis(
    title: AxisTitle,
    grid: bool,
    position: AxisPosition,
    stacked: bool,
    format: ValueFormat,
    config: &ChartConfig,
) -> Axis {
    let percent = format.is_percent();
    Axis {
        title,
        grid: Grid { display: grid },
        position: Some(position),
        stacked,
        min: percent.then_some(PERCENT_MIN),
        max: percent.then_some(PERCENT_MAX),
        ticks: Ticks {
            max_rotation: None,
            min_rotation: None,
            padding: TICK_PADDING,
            color: config.font_color.clone(),
            step_size: percent.then_some(PERCENT_STEP),
            format: Some(format),
        },
    }
}

fn is_stacked(chart_type: ChartType, options: &OptionsCustomization) -> bool {
    match chart_type {
        ChartType::Area => true,
        ChartType::Line => false,
        _ => options.stack,
    }
}

/// Category + left value axis shared by line, bar, area, combined, scatter and bubble.
fn cartesian_settings(mut canvas: RenderOptions, input: &CanvasInput<'_>, y_format: ValueFormat) -> RenderOptions {
    let CanvasInput { options, config, .. } = *input;
    let stacked = is_stacked(input.chart_type, options);

    canvas.index_axis = if options.horizontal { IndexAxis::Y } else { IndexAxis::X };
    canvas.plugins.tooltip = Some(TooltipOptions::new(TooltipCallbacks::Formatted { format: y_format }));
    canvas.scales = Some(Scales {
        x: Axis {
            title: axis_title(options.x_axis_title.as_ref(), config.x_axis_label_padding, config),
            grid: Grid { display: options.show_grid_x },
            position: None,
            stacked,
            min: None,
            max: None,
            ticks: Ticks {
                max_rotation: Some(90.0),
                min_rotation: Some(0.0),
                padding: TICK_PADDING,
                color: config.font_color.clone(),
                step_size: None,
                format: None,
            },
        },
        y: value_axis(
            axis_title(options.y_axis_title.as_ref(), config.y_axis_label_padding, config),
            options.show_grid_y,
            AxisPosition::Left,
            stacked,
            y_format,
            config,
        ),
        y2: None,
    });
    canvas
}

fn basic_settings(canvas: RenderOptions, input: &CanvasInput<'_>) -> Result<RenderOptions> {
    Ok(cartesian_settings(canvas, input, input.formats.y))
}

fn combined_settings(canvas: RenderOptions, input: &CanvasInput<'_>) -> Result<RenderOptions> {
    let CanvasInput { options, config, formats, .. } = *input;
    let mut canvas = cartesian_settings(canvas, input, formats.y);
    if let Some(scales) = canvas.scales.as_mut() {
        scales.y2 = Some(value_axis(
            axis_title(options.y_right_axis_title.as_ref(), config.y_axis_label_padding, config),
            options.show_grid_right_y,
            AxisPosition::Right,
            false,
            formats.y_right,
            config,
        ));
    }
    canvas.plugins.tooltip = Some(TooltipOptions::new(TooltipCallbacks::BySeriesKind {
        bar: formats.y,
        line: formats.y_right,
    }));
    Ok(canvas)
}

fn point_settings(canvas: RenderOptions, input: &CanvasInput<'_>) -> Result<RenderOptions> {
    let entries = input.tooltips.ok_or(ChartError::MissingTooltipData)?;
    let mut canvas = cartesian_settings(canvas, input, input.formats.y);
    canvas.interaction = None;
    if let Some(scales) = canvas.scales.as_mut() {
        scales.x.ticks.format = Some(input.formats.x);
    }
    canvas.plugins.tooltip = Some(TooltipOptions::new(TooltipCallbacks::Lookup {
        entries: entries.to_vec(),
    }));
    Ok(canvas)
}
