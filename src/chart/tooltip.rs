//! Precomputed tooltip text for scatter and bubble points.
//!
//! The renderer only sees `{x, y, r}` per point, so the named fields and
//! their formats are resolved here, one entry per dataset (row).

use super::dataset::point_keys;
use super::others::group_others_for;
use super::types::{ChartType, TooltipEntry, ValueFormats};
use crate::error::Result;
use crate::format::{convert_snake_to_low_case, format_value_locale};
use crate::keys::{get_keys, validate_allowed_keys};
use crate::models::{Cell, Row};

/// Build one [`TooltipEntry`] per row, in the same order and with the same
/// "Others" bucketing as the series built by [`super::chart_data_setup`].
///
/// Text lines are `"<key label>: <formatted value>"` for x and y, plus the
/// radius line for bubbles. Formats come from `formats.x`, `formats.y` and
/// `formats.r`.
pub fn create_bubble_chart_tooltip_dataset<S: AsRef<str>>(
    rows: &[Row],
    chart_type: ChartType,
    formats: ValueFormats,
    allowed_keys: &[S],
    locale_tag: &str,
) -> Result<Vec<TooltipEntry>> {
    let rows = group_others_for(chart_type, rows)?;
    let keys = get_keys(&rows)?;
    let reduced = validate_allowed_keys(&keys, allowed_keys)?;
    let fields = point_keys(chart_type, &reduced)?;
    let field_formats = [formats.x, formats.y, formats.r];

    Ok(rows
        .iter()
        .map(|row| {
            let text = fields
                .iter()
                .zip(field_formats)
                .map(|(key, format)| {
                    let value = row.get(key).cloned().unwrap_or(Cell::NoValue);
                    format!(
                        "{}: {}",
                        convert_snake_to_low_case(key),
                        format_value_locale(&value, format, locale_tag)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            TooltipEntry {
                title: String::new(),
                label: row.get(&reduced[0]).cloned().unwrap_or(Cell::NoValue),
                text,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ValueFormat;
    use serde_json::json;

    fn rows(v: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn scatter_text_has_two_lines() {
        let data = rows(json!([{"country": "AT", "gdp_total": 1500, "growth": 2, "extra": 9}]));
        let formats = ValueFormats::point(ValueFormat::Euro, ValueFormat::Percent, ValueFormat::Number);
        let out =
            create_bubble_chart_tooltip_dataset(&data, ChartType::Scatter, formats, &["gdp_total", "growth"], "en")
                .unwrap();
        assert_eq!(
            out,
            vec![TooltipEntry {
                title: String::new(),
                label: Cell::Text("AT".into()),
                text: "gdp total: 1,500€\ngrowth: 2%".into(),
            }]
        );
    }

    #[test]
    fn bubble_adds_radius_line() {
        let data = rows(json!([{"k": "a", "x": 1, "y": "-", "size": 3}]));
        let out = create_bubble_chart_tooltip_dataset(
            &data,
            ChartType::Bubble,
            ValueFormats::default(),
            &["x", "y", "size"],
            "en",
        )
        .unwrap();
        assert_eq!(out[0].text, "x: 1\ny: -\nsize: 3");
    }

    #[test]
    fn entries_match_bucketed_rows() {
        let data: Vec<Row> = (0..9)
            .map(|i| {
                [("k", Cell::Number(i as f64)), ("x", Cell::Number(1.0)), ("y", Cell::Number(2.0))]
                    .into_iter()
                    .collect()
            })
            .collect();
        let out =
            create_bubble_chart_tooltip_dataset(&data, ChartType::Scatter, ValueFormats::default(), &["x", "y"], "en")
                .unwrap();
        assert_eq!(out.len(), 7);
        assert_eq!(out[6].label, Cell::Text("Others".into()));
        assert_eq!(out[6].text, "x: 3\ny: 6");
    }
}
