//! Key discovery and validation against the actual dataset columns.

use crate::error::{ChartError, Result};
use crate::models::Row;

/// Ordered key set of the first row.
///
/// Fails with [`ChartError::MalformedDataset`] when there is no row or the
/// first row has fewer than two keys (aggregation key + one value key).
pub fn get_keys(rows: &[Row]) -> Result<Vec<String>> {
    let first = rows.first().ok_or(ChartError::MalformedDataset)?;
    if first.len() < 2 {
        return Err(ChartError::MalformedDataset);
    }
    Ok(first.keys().map(str::to_string).collect())
}

/// Reduce `keys` to the aggregation key plus the requested columns.
///
/// The result keeps the dataset's column order, not the order of
/// `allowed_keys`. Every requested key missing from `keys` is reported.
pub fn validate_allowed_keys<S: AsRef<str>>(keys: &[String], allowed_keys: &[S]) -> Result<Vec<String>> {
    let unknown: Vec<&str> = allowed_keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|k| !keys.iter().any(|known| known.as_str() == *k))
        .collect();
    if !unknown.is_empty() {
        return Err(ChartError::UnknownKeys(unknown.join(", ")));
    }

    let Some(aggregation_key) = keys.first() else {
        return Ok(Vec::new());
    };
    Ok(keys
        .iter()
        .filter(|k| *k == aggregation_key || allowed_keys.iter().any(|a| a.as_ref() == k.as_str()))
        .cloned()
        .collect())
}

/// Keys without the aggregation key; these become legend entries.
pub fn legend_labels(keys: &[String]) -> &[String] {
    keys.get(1..).unwrap_or(&[])
}
