//! Data shaping: turn validated rows into renderer-ready series.

use super::others::group_others_for;
use super::palette::{BaseColor, Palettes};
use super::transform::{POINT_SIZE_MAX, POINT_SIZE_MIN, calculate_bubble_point_radius, value_range};
use super::types::{
    AxisId, ChartFamily, ChartType, ColorSpec, NormalizedChartDataset, Point, Series, SeriesData,
};
use crate::error::{ChartError, Result};
use crate::format::convert_snake_to_low_case;
use crate::keys::{get_keys, legend_labels, validate_allowed_keys};
use crate::models::{Cell, Row};
use log::debug;

/// Z-order of bars (and plain lines); combined-chart lines use [`LINE_OVER_BAR_ORDER`].
pub const BAR_ORDER: i32 = 2;
/// Lower order draws on top, so combined lines stay visible over bars.
pub const LINE_OVER_BAR_ORDER: i32 = 1;
/// Scatter/bubble point radius and hover radius.
pub const POINT_RADIUS: f64 = 10.0;
pub const POINT_HOVER_RADIUS: f64 = 12.0;

/// Everything a family builder needs, computed once by [`chart_data_setup`].
pub(crate) struct ShapeInput<'a> {
    pub chart_type: ChartType,
    /// Rows after "Others" bucketing.
    pub rows: &'a [Row],
    /// All dataset keys, aggregation key first.
    pub keys: &'a [String],
    /// Aggregation key plus the validated primary keys, dataset order.
    pub reduced_keys: &'a [String],
    /// Line keys of a combined chart.
    pub secondary_keys: Option<&'a [String]>,
    pub palettes: &'a Palettes,
}

type DatasetBuilder = fn(&ShapeInput<'_>) -> Result<Vec<Series>>;

/// Builder table keyed by chart family.
fn dataset_builder(family: ChartFamily) -> DatasetBuilder {
    match family {
        ChartFamily::Basic => build_basic,
        ChartFamily::Combined => build_combined,
        ChartFamily::Radial => build_radial,
        ChartFamily::Point => build_point,
    }
}

/// Shape rows into the normalized dataset for `chart_type`.
///
/// `keys_a` are the value columns to plot (bar columns for combined charts);
/// `keys_b` are the line columns of a combined chart and ignored otherwise.
/// Pie/doughnut and scatter/bubble rows are bucketed into "Others" first.
pub fn chart_data_setup<S: AsRef<str>>(
    rows: &[Row],
    chart_type: ChartType,
    keys_a: &[S],
    keys_b: Option<&[S]>,
    palettes: &Palettes,
) -> Result<NormalizedChartDataset> {
    let rows = group_others_for(chart_type, rows)?;
    let keys = get_keys(&rows)?;
    let labels = category_labels(&rows, &keys[0]);
    let reduced_keys = validate_allowed_keys(&keys, keys_a)?;
    let secondary: Option<Vec<String>> =
        keys_b.map(|b| b.iter().map(|k| k.as_ref().to_string()).collect());

    let input = ShapeInput {
        chart_type,
        rows: &rows,
        keys: &keys,
        reduced_keys: &reduced_keys,
        secondary_keys: secondary.as_deref(),
        palettes,
    };
    let series = dataset_builder(chart_type.family())(&input)?;
    debug!(
        "{} chart: {} labels, {} series",
        chart_type,
        labels.len(),
        series.len()
    );
    Ok(NormalizedChartDataset { labels, series })
}

/// Aggregation-column values as category labels.
pub(crate) fn category_labels(rows: &[Row], aggregation_key: &str) -> Vec<String> {
    rows.iter()
        .map(|r| r.get(aggregation_key).map(Cell::label).unwrap_or_default())
        .collect()
}

fn cell_or_sentinel(row: &Row, key: &str) -> Cell {
    row.get(key).cloned().unwrap_or(Cell::NoValue)
}

fn column(rows: &[Row], key: &str) -> Vec<Cell> {
    rows.iter().map(|r| cell_or_sentinel(r, key)).collect()
}

/// One series per value key for line, bar, and area charts.
pub fn create_basic_chart_dataset(
    rows: &[Row],
    chart_type: ChartType,
    axis: AxisId,
    keys: &[String],
    base_color: BaseColor,
    order: i32,
    palettes: &Palettes,
) -> Result<Vec<Series>> {
    let legend = legend_labels(keys);
    if legend.is_empty() {
        return Ok(Vec::new());
    }
    let colors = palettes.pick(base_color, legend.len())?;
    let is_area = chart_type == ChartType::Area;

    Ok(legend
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(index, (metric, color))| {
            let mut series = Series::new(
                convert_snake_to_low_case(metric),
                chart_type.render_kind(),
                SeriesData::Values(column(rows, metric)),
            );
            series.background_color = Some(ColorSpec::Single(color.clone()));
            series.border_color = Some(ColorSpec::Single(color.clone()));
            series.y_axis_id = Some(axis);
            if is_area {
                series.order = Some(index as i32);
                series.fill = Some(true);
                series.point_radius = Some(0.0);
            } else {
                series.order = Some(order);
            }
            series
        })
        .collect())
}

fn build_basic(input: &ShapeInput<'_>) -> Result<Vec<Series>> {
    create_basic_chart_dataset(
        input.rows,
        input.chart_type,
        AxisId::Y,
        input.reduced_keys,
        BaseColor::Darkblue,
        BAR_ORDER,
        input.palettes,
    )
}

fn build_combined(input: &ShapeInput<'_>) -> Result<Vec<Series>> {
    let line_keys = input.secondary_keys.ok_or(ChartError::MissingLineKeys)?;
    let line_reduced = validate_allowed_keys(input.keys, line_keys)?;

    let mut series = create_basic_chart_dataset(
        input.rows,
        ChartType::Bar,
        AxisId::Y,
        input.reduced_keys,
        BaseColor::Darkblue,
        BAR_ORDER,
        input.palettes,
    )?;
    series.extend(create_basic_chart_dataset(
        input.rows,
        ChartType::Line,
        AxisId::Y2,
        &line_reduced,
        BaseColor::Orange,
        LINE_OVER_BAR_ORDER,
        input.palettes,
    )?);
    Ok(series)
}

/// One series per value key; slice colors live on the first series only,
/// since the renderer colors pie slices per data point.
pub fn create_pie_chart_dataset(
    rows: &[Row],
    chart_type: ChartType,
    keys: &[String],
    palettes: &Palettes,
) -> Result<Vec<Series>> {
    let legend = legend_labels(keys);
    if legend.is_empty() {
        return Ok(Vec::new());
    }
    let slice_colors = palettes.pick(BaseColor::Darkblue, rows.len())?.to_vec();

    let mut series: Vec<Series> = legend
        .iter()
        .map(|metric| {
            Series::new(
                convert_snake_to_low_case(metric),
                chart_type.render_kind(),
                SeriesData::Values(column(rows, metric)),
            )
        })
        .collect();
    if let Some(first) = series.first_mut() {
        first.background_color = Some(ColorSpec::PerPoint(slice_colors.clone()));
        first.border_color = Some(ColorSpec::PerPoint(slice_colors));
    }
    Ok(series)
}

fn build_radial(input: &ShapeInput<'_>) -> Result<Vec<Series>> {
    create_pie_chart_dataset(input.rows, input.chart_type, input.reduced_keys, input.palettes)
}

/// Value keys a point chart reads: x, y, and for bubbles the radius column.
pub(crate) fn point_keys(chart_type: ChartType, reduced_keys: &[String]) -> Result<&[String]> {
    let legend = legend_labels(reduced_keys);
    let required = if chart_type == ChartType::Bubble { 3 } else { 2 };
    if legend.len() < required {
        return Err(ChartError::NotEnoughKeys {
            chart_type: chart_type.as_str(),
            required,
            got: legend.len(),
        });
    }
    Ok(&legend[..required])
}

/// One series per row, each holding a single point.
pub fn create_scatter_chart_dataset(
    rows: &[Row],
    chart_type: ChartType,
    keys: &[String],
    palettes: &Palettes,
) -> Result<Vec<Series>> {
    let fields = point_keys(chart_type, keys)?;
    let colors = if rows.is_empty() {
        Vec::new()
    } else {
        palettes.scatter_colors(rows.len())?
    };
    let radius_key = fields.get(2);
    let radius_range = radius_key.and_then(|k| value_range(rows, k));

    Ok(rows
        .iter()
        .zip(colors)
        .map(|(row, color)| {
            let r = radius_key.map(|k| match (cell_or_sentinel(row, k), radius_range) {
                (Cell::Number(v), Some(range)) => Cell::Number(calculate_bubble_point_radius(
                    v,
                    range,
                    POINT_SIZE_MIN,
                    POINT_SIZE_MAX,
                )),
                _ => Cell::NoValue,
            });
            let point = Point {
                x: cell_or_sentinel(row, &fields[0]),
                y: cell_or_sentinel(row, &fields[1]),
                r,
            };
            let label = row.get(&keys[0]).map(Cell::label).unwrap_or_default();
            let mut series = Series::new(
                convert_snake_to_low_case(&label),
                chart_type.render_kind(),
                SeriesData::Points(vec![point]),
            );
            series.radius = Some(POINT_RADIUS);
            series.point_hover_radius = Some(POINT_HOVER_RADIUS);
            series.background_color = Some(ColorSpec::Single(color.clone()));
            series.border_color = Some(ColorSpec::Single(color));
            series
        })
        .collect())
}

fn build_point(input: &ShapeInput<'_>) -> Result<Vec<Series>> {
    create_scatter_chart_dataset(input.rows, input.chart_type, input.reduced_keys, input.palettes)
}
