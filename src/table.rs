//! Table view: column projection, summary footer, and sorting.

use crate::error::Result;
use crate::format::{ValueFormat, convert_snake_to_low_case, format_value_locale};
use crate::keys::{get_keys, legend_labels, validate_allowed_keys};
use crate::models::{Cell, Row, SummaryType};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Round to the nearest integer, halves toward positive infinity
/// (`2.5 -> 3`, `-2.5 -> -2`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Keep only the aggregation key and `allowed_keys` in every row, in dataset
/// column order. Without `allowed_keys` the rows are returned as they are.
pub fn reduce_dataset<S: AsRef<str>>(rows: &[Row], allowed_keys: Option<&[S]>) -> Result<Vec<Row>> {
    let Some(allowed) = allowed_keys else {
        return Ok(rows.to_vec());
    };
    let keys = validate_allowed_keys(&get_keys(rows)?, allowed)?;
    Ok(rows.iter().map(|row| row.project(&keys)).collect())
}

/// Footer row: `"Grand sum"` / `"Grand average"` followed by one figure per
/// value key.
///
/// Only numeric cells contribute; text and the sentinel are skipped. Averages
/// divide by the full row count and are rounded. A figure that is not a
/// number (average of zero rows) becomes the sentinel.
pub fn summarize_data(rows: &[Row], keys: &[String], summary_type: SummaryType) -> Vec<Cell> {
    let mut summary = vec![Cell::Text(format!("Grand {summary_type}"))];
    summary.extend(legend_labels(keys).iter().map(|key| {
        let sum: f64 = rows
            .iter()
            .filter_map(|r| r.get(key).and_then(Cell::as_number))
            .sum();
        let figure = match summary_type {
            SummaryType::Sum => sum,
            SummaryType::Average => round_half_up(sum / rows.len() as f64),
        };
        if figure.is_nan() { Cell::NoValue } else { Cell::Number(figure) }
    }));
    summary
}

fn rank(cell: &Cell) -> u8 {
    match cell {
        Cell::Number(_) => 0,
        Cell::Text(_) => 1,
        Cell::NoValue => 2,
    }
}

fn compare_values(a: &Cell, b: &Cell) -> Ordering {
    match (a, b) {
        (Cell::Number(x), Cell::Number(y)) => x.total_cmp(y),
        (Cell::Text(x), Cell::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()).then_with(|| x.cmp(y)),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Stable in-place sort of `rows` by the column `key`.
///
/// Rows holding the sentinel (or lacking the column) always sink to the
/// bottom. `ascending = true` orders values from high to low and `false`
/// from low to high, matching the header toggle of the dashboard tables.
pub fn sort_data_by_key(rows: &mut [Row], key: &str, ascending: bool) {
    let no_value = Cell::NoValue;
    rows.sort_by(|a, b| {
        let va = a.get(key).unwrap_or(&no_value);
        let vb = b.get(key).unwrap_or(&no_value);
        match (va.is_no_value(), vb.is_no_value()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) if ascending => compare_values(vb, va),
            (false, false) => compare_values(va, vb),
        }
    });
}

/// Column to sort a table by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: String,
    pub ascending: bool,
}

/// Table customization, defaults match the dashboard table component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    pub allowed_keys: Option<Vec<String>>,
    /// `None` hides the footer.
    pub summary_row: Option<SummaryType>,
    pub value_format: ValueFormat,
    pub sort: Option<SortOrder>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            allowed_keys: None,
            summary_row: Some(SummaryType::Sum),
            value_format: ValueFormat::Number,
            sort: None,
        }
    }
}

/// Display-ready table: prettified headers, formatted cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Raw column names, aggregation key first.
    pub keys: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
}

/// Format a row of cells; the first (aggregation) column stays raw.
fn format_line<'a>(cells: impl Iterator<Item = &'a Cell>, format: ValueFormat, locale_tag: &str) -> Vec<String> {
    cells
        .enumerate()
        .map(|(i, c)| if i == 0 { c.label() } else { format_value_locale(c, format, locale_tag) })
        .collect()
}

/// Assemble a [`TableView`] from rows that are known to be non-empty.
///
/// The footer is computed before sorting, so it does not depend on row order.
pub fn build_table_view(rows: &[Row], options: &TableOptions, locale_tag: &str) -> Result<TableView> {
    let mut data = reduce_dataset(rows, options.allowed_keys.as_deref())?;
    let keys = get_keys(&data)?;
    let summary = options
        .summary_row
        .map(|t| summarize_data(&data, &keys, t))
        .map(|cells| format_line(cells.iter(), options.value_format, locale_tag));

    if let Some(sort) = &options.sort {
        debug!("sorting table by '{}' (ascending={})", sort.key, sort.ascending);
        sort_data_by_key(&mut data, &sort.key, sort.ascending);
    }

    let no_value = Cell::NoValue;
    let body = data
        .iter()
        .map(|row| {
            let cells = keys.iter().map(|k| row.get(k).unwrap_or(&no_value));
            format_line(cells, options.value_format, locale_tag)
        })
        .collect();

    Ok(TableView {
        headers: keys.iter().map(|k| convert_snake_to_low_case(k)).collect(),
        keys,
        rows: body,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(v: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(v).unwrap()
    }

    fn column(rows: &[Row], key: &str) -> Vec<String> {
        rows.iter().map(|r| r.get(key).unwrap().label()).collect()
    }

    #[test]
    fn reduce_keeps_dataset_order() {
        let data = rows(json!([{"k": "1", "a": 1, "b": 2, "c": 3}]));
        let out = reduce_dataset(&data, Some(&["c", "a"][..])).unwrap();
        assert_eq!(out, rows(json!([{"k": "1", "a": 1, "c": 3}])));
        assert_eq!(reduce_dataset::<&str>(&data, None).unwrap(), data);
    }

    #[test]
    fn grand_sum_skips_sentinels() {
        let data = rows(json!([
            {"k": "1", "a": 1, "b": "-", "c": 3},
            {"k": "2", "a": "-", "b": "-", "c": 3},
            {"k": "3", "a": 1, "b": "-", "c": 3},
        ]));
        let keys = get_keys(&data).unwrap();
        assert_eq!(
            summarize_data(&data, &keys, SummaryType::Sum),
            vec![Cell::Text("Grand sum".into()), Cell::Number(2.0), Cell::Number(0.0), Cell::Number(9.0)]
        );
        assert_eq!(
            summarize_data(&data, &keys, SummaryType::Average),
            vec![Cell::Text("Grand average".into()), Cell::Number(1.0), Cell::Number(0.0), Cell::Number(3.0)]
        );
    }

    #[test]
    fn average_of_no_rows_is_sentinel() {
        let keys = vec!["k".to_string(), "a".to_string()];
        assert_eq!(summarize_data(&[], &keys, SummaryType::Average)[1], Cell::NoValue);
    }

    #[test]
    fn sort_sentinel_always_last() {
        let mut data = rows(json!([
            {"k": "a", "v": 2}, {"k": "b", "v": "-"}, {"k": "c", "v": 9}, {"k": "d", "v": 5},
        ]));
        sort_data_by_key(&mut data, "v", true);
        assert_eq!(column(&data, "v"), vec!["9", "5", "2", "-"]);
        sort_data_by_key(&mut data, "v", false);
        assert_eq!(column(&data, "v"), vec!["2", "5", "9", "-"]);
    }

    #[test]
    fn sort_text_and_stability() {
        let mut data = rows(json!([
            {"k": "beta", "v": 1}, {"k": "alpha", "v": 1}, {"k": "gamma", "v": 1},
        ]));
        sort_data_by_key(&mut data, "k", false);
        assert_eq!(column(&data, "k"), vec!["alpha", "beta", "gamma"]);
        sort_data_by_key(&mut data, "v", false);
        assert_eq!(column(&data, "k"), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn sort_text_ignores_case() {
        let mut data = rows(json!([
            {"k": "Zulu", "v": 1}, {"k": "bravo", "v": 1}, {"k": "alpha", "v": 1}, {"k": "Bravo", "v": 1},
        ]));
        sort_data_by_key(&mut data, "k", false);
        assert_eq!(column(&data, "k"), vec!["alpha", "Bravo", "bravo", "Zulu"]);
        sort_data_by_key(&mut data, "k", true);
        assert_eq!(column(&data, "k"), vec!["Zulu", "bravo", "Bravo", "alpha"]);
    }

    #[test]
    fn view_formats_value_columns_only() {
        let data = rows(json!([
            {"year": 2023, "net_sales": 1200.5, "share": "-"},
            {"year": 2024, "net_sales": 800, "share": 3},
        ]));
        let opts = TableOptions {
            value_format: ValueFormat::Euro,
            sort: Some(SortOrder { key: "net_sales".into(), ascending: false }),
            ..Default::default()
        };
        let view = build_table_view(&data, &opts, "en").unwrap();
        assert_eq!(view.headers, vec!["year", "net sales", "share"]);
        assert_eq!(view.rows[0], vec!["2024", "800€", "3€"]);
        assert_eq!(view.rows[1], vec!["2023", "1,200.5€", "-€"]);
        assert_eq!(view.summary.unwrap(), vec!["Grand sum", "2,000.5€", "3€"]);
    }

    #[test]
    fn view_without_footer() {
        let data = rows(json!([{"k": "1", "a": 1, "b": 2}]));
        let opts = TableOptions {
            summary_row: None,
            allowed_keys: Some(vec!["b".into()]),
            ..Default::default()
        };
        let view = build_table_view(&data, &opts, "en").unwrap();
        assert!(view.summary.is_none());
        assert_eq!(view.keys, vec!["k", "b"]);
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(1.4), 1.0);
    }
}
