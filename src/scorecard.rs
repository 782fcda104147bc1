//! Scorecard: one formatted figure summarizing a column.

use crate::error::{ChartError, Result};
use crate::format::{DEFAULT_LOCALE, ValueFormat, format_value_locale};
use crate::keys::get_keys;
use crate::models::{Cell, Row, SummaryType};
use crate::table::round_half_up;

/// Sum or average `key` over all rows and format the result.
///
/// Numeric strings count as numbers here; the sentinel and other text are
/// skipped. Averages divide by the full row count.
pub fn summarize_data(rows: &[Row], key: &str, summary_type: SummaryType, format: ValueFormat) -> Result<String> {
    summarize_data_locale(rows, key, summary_type, format, DEFAULT_LOCALE)
}

/// [`summarize_data`] with an explicit locale tag.
pub fn summarize_data_locale(
    rows: &[Row],
    key: &str,
    summary_type: SummaryType,
    format: ValueFormat,
    locale_tag: &str,
) -> Result<String> {
    if !get_keys(rows)?.iter().any(|k| k == key) {
        return Err(ChartError::UnknownKey(key.to_string()));
    }
    let total: f64 = rows
        .iter()
        .filter_map(|r| r.get(key).and_then(Cell::parse_number))
        .sum();
    let figure = match summary_type {
        SummaryType::Sum => total,
        SummaryType::Average => round_half_up(total / rows.len() as f64),
    };
    Ok(format_value_locale(&Cell::Number(figure), format, locale_tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Vec<Row> {
        serde_json::from_value(json!([
            {"aggregationKey": "1", "a": 1, "b": "-", "c": 3},
            {"aggregationKey": "2", "a": "-", "b": "-", "c": 3},
            {"aggregationKey": "3", "a": 1, "b": "-", "c": 3},
        ]))
        .unwrap()
    }

    #[test]
    fn sums_skip_sentinel() {
        assert_eq!(summarize_data(&data(), "a", SummaryType::Sum, ValueFormat::Euro).unwrap(), "2€");
        assert_eq!(summarize_data(&data(), "b", SummaryType::Sum, ValueFormat::Number).unwrap(), "0");
    }

    #[test]
    fn averages_are_rounded() {
        assert_eq!(summarize_data(&data(), "a", SummaryType::Average, ValueFormat::Number).unwrap(), "1");
        assert_eq!(summarize_data(&data(), "b", SummaryType::Average, ValueFormat::Number).unwrap(), "0");
    }

    #[test]
    fn numeric_strings_count() {
        let rows: Vec<Row> = serde_json::from_value(json!([
            {"k": "x", "total": "1500.5"},
            {"k": "y", "total": 2000},
        ]))
        .unwrap();
        assert_eq!(
            summarize_data_locale(&rows, "total", SummaryType::Sum, ValueFormat::Number, "de").unwrap(),
            "3.500,5"
        );
    }

    #[test]
    fn values_with_units_count_their_number() {
        let rows: Vec<Row> = serde_json::from_value(json!([
            {"k": "x", "weight": "12 kg"},
            {"k": "y", "weight": 3},
            {"k": "z", "weight": "n/a"},
        ]))
        .unwrap();
        assert_eq!(summarize_data(&rows, "weight", SummaryType::Sum, ValueFormat::Number).unwrap(), "15");
    }

    #[test]
    fn unknown_key() {
        assert_eq!(
            summarize_data(&data(), "zz", SummaryType::Sum, ValueFormat::Number).unwrap_err(),
            ChartError::UnknownKey("zz".into())
        );
    }
}
