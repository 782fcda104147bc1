//! "Others" bucketing: fold long-tail rows into one synthetic row.

use super::types::{ChartFamily, ChartType};
use crate::error::Result;
use crate::keys::get_keys;
use crate::models::{Cell, Row};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Pie and doughnut charts show at most this many slices before "Others".
pub const RADIAL_VISIBLE_ROWS: usize = 5;
/// Scatter and bubble charts show at most this many points before "Others".
pub const POINT_VISIBLE_ROWS: usize = 6;
/// Aggregation value of the synthetic row.
pub const OTHERS_LABEL: &str = "Others";

static AVERAGE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)average|avg").expect("static regex")
});

/// Columns named like an average are averaged when folded, not summed.
pub fn is_average_key(key: &str) -> bool {
    AVERAGE_KEY.is_match(key)
}

/// Keep the first `visible` rows and fold the remainder into an `Others` row.
///
/// Numeric cells of folded rows are summed per column (sentinels excluded);
/// columns matching `average`/`avg` are divided by the folded row count.
/// Datasets shorter than `visible` are returned unchanged. At exactly
/// `visible` rows the `Others` row is still appended: its sums are 0 and its
/// averages are the sentinel.
pub fn group_others(rows: &[Row], visible: usize) -> Result<Vec<Row>> {
    let keys = get_keys(rows)?;
    if rows.len() < visible {
        return Ok(rows.to_vec());
    }

    let (kept, folded) = rows.split_at(visible);
    debug!("folding {} rows into '{}'", folded.len(), OTHERS_LABEL);

    let mut others = Row::new();
    others.insert(keys[0].clone(), Cell::Text(OTHERS_LABEL.to_string()));
    for key in &keys[1..] {
        let sum: f64 = folded
            .iter()
            .filter_map(|r| r.get(key).and_then(Cell::as_number))
            .sum();
        let value = match (is_average_key(key), folded.len()) {
            (true, 0) => Cell::NoValue,
            (true, n) => Cell::Number(sum / n as f64),
            (false, _) => Cell::Number(sum),
        };
        others.insert(key.clone(), value);
    }

    let mut out = kept.to_vec();
    out.push(others);
    Ok(out)
}

/// Apply the bucketing rule of a chart type; other types pass rows through.
pub fn group_others_for(chart_type: ChartType, rows: &[Row]) -> Result<Vec<Row>> {
    match chart_type.family() {
        ChartFamily::Radial => group_others(rows, RADIAL_VISIBLE_ROWS),
        ChartFamily::Point => group_others(rows, POINT_VISIBLE_ROWS),
        ChartFamily::Basic | ChartFamily::Combined => Ok(rows.to_vec()),
    }
}
