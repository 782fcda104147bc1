//! Numeric transforms applied before or while building series.

use crate::error::Result;
use crate::keys::get_keys;
use crate::models::{Cell, Row};
use log::debug;

/// Smallest bubble radius in pixels.
pub const POINT_SIZE_MIN: f64 = 5.0;
/// Largest bubble radius in pixels.
pub const POINT_SIZE_MAX: f64 = 20.0;

/// Rewrite each row so the allowed columns hold their share of the row total,
/// rounded to whole percent.
///
/// Sentinels are excluded from the total and kept as-is. A row whose total is
/// zero has no meaningful shares: its numeric cells become the sentinel.
pub fn calculate_data_percentage<S: AsRef<str>>(rows: &[Row], allowed_keys: &[S]) -> Result<Vec<Row>> {
    get_keys(rows)?;
    let allowed = |key: &str| allowed_keys.iter().any(|a| a.as_ref() == key);

    Ok(rows
        .iter()
        .map(|row| {
            let total: f64 = row
                .iter()
                .filter(|(k, _)| allowed(*k))
                .filter_map(|(_, v)| v.as_number())
                .sum();
            if total == 0.0 {
                debug!("row total is zero, shares left empty");
            }
            row.iter()
                .map(|(k, v)| {
                    let cell = if !allowed(k) {
                        v.clone()
                    } else {
                        match v {
                            Cell::Number(n) if total != 0.0 => Cell::Number((n / total * 100.0).round()),
                            _ => Cell::NoValue,
                        }
                    };
                    (k, cell)
                })
                .collect()
        })
        .collect())
}

/// Observed `(min, max)` of a numeric column, sentinels ignored.
pub fn value_range(rows: &[Row], key: &str) -> Option<(f64, f64)> {
    rows.iter()
        .filter_map(|r| r.get(key).and_then(Cell::as_number))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linearly rescale `value` from `range` into `[point_size_min, point_size_max]`.
///
/// A degenerate range (`min == max`) always yields `point_size_min`.
pub fn calculate_bubble_point_radius(
    value: f64,
    range: (f64, f64),
    point_size_min: f64,
    point_size_max: f64,
) -> f64 {
    let (min, max) = range;
    if min == max {
        return point_size_min;
    }
    (value - min) * (point_size_max - point_size_min) / (max - min) + point_size_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(v: serde_json::Value) -> Vec<Row> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn shares_skip_sentinel() {
        let data = rows(json!([{"k": "1", "a": 1, "b": "-", "c": 3}]));
        let out = calculate_data_percentage(&data, &["a", "b", "c"]).unwrap();
        assert_eq!(out, rows(json!([{"k": "1", "a": 25, "b": "-", "c": 75}])));
    }

    #[test]
    fn shares_sum_to_hundred() {
        let data = rows(json!([
            {"k": "1", "a": 1, "b": 1, "c": 1},
            {"k": "2", "a": 7, "b": 2, "c": 1},
        ]));
        let out = calculate_data_percentage(&data, &["a", "b", "c"]).unwrap();
        for row in &out {
            let sum: f64 = ["a", "b", "c"].iter().filter_map(|k| row.get(k).and_then(Cell::as_number)).sum();
            assert!((sum - 100.0).abs() <= 1.0, "sum was {sum}");
        }
        // Input untouched.
        assert_eq!(data[1].get("a"), Some(&Cell::Number(7.0)));
    }

    #[test]
    fn columns_outside_selection_are_kept() {
        let data = rows(json!([{"k": "1", "a": 1, "b": 3, "other": 50}]));
        let out = calculate_data_percentage(&data, &["a", "b"]).unwrap();
        assert_eq!(out[0].get("other"), Some(&Cell::Number(50.0)));
        assert_eq!(out[0].get("a"), Some(&Cell::Number(25.0)));
    }

    #[test]
    fn zero_total_yields_sentinels() {
        let data = rows(json!([{"k": "1", "a": 0, "b": "-"}]));
        let out = calculate_data_percentage(&data, &["a", "b"]).unwrap();
        assert_eq!(out[0].get("a"), Some(&Cell::NoValue));
        assert_eq!(out[0].get("b"), Some(&Cell::NoValue));
    }

    #[test]
    fn bubble_radius_bounds() {
        assert_eq!(calculate_bubble_point_radius(42.0, (3.0, 3.0), 5.0, 20.0), 5.0);
        assert_eq!(calculate_bubble_point_radius(10.0, (10.0, 40.0), 5.0, 20.0), 5.0);
        assert_eq!(calculate_bubble_point_radius(40.0, (10.0, 40.0), 5.0, 20.0), 20.0);
        assert_eq!(calculate_bubble_point_radius(25.0, (10.0, 40.0), 5.0, 20.0), 12.5);
    }

    #[test]
    fn range_ignores_sentinels() {
        let data = rows(json!([{"k": "1", "r": 4}, {"k": "2", "r": "-"}, {"k": "3", "r": -1}]));
        assert_eq!(value_range(&data, "r"), Some((-1.0, 4.0)));
        assert_eq!(value_range(&data, "missing"), None);
    }
}
