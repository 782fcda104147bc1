//! Dataset model: cells, ordered rows, and ingestion of API payloads.

use crate::error::{ChartError, Result};
use log::debug;
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Literal used by the analytics API in place of a missing number.
pub const NO_VALUE: &str = "-";

/// Leading decimal literal of a string; trailing text is ignored.
static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("static regex")
});

/// One cell of a dataset row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    /// The `"-"` sentinel. Excluded from sums, preserved in display.
    NoValue,
    /// Category label (aggregation column) or any other non-numeric text.
    Text(String),
}

impl Cell {
    /// Numeric value, if this cell holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Lenient numeric read: numbers, plus text that starts with a float
    /// (e.g. `"3"`, `" 4.5 "` or `"12 kg"`).
    pub fn parse_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => NUMBER_PREFIX
                .find(s.trim_start())
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .filter(|v| v.is_finite()),
            Cell::NoValue => None,
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, Cell::NoValue)
    }

    /// Plain string form: integers without a fractional part, the sentinel as `-`.
    pub fn label(&self) -> String {
        match self {
            Cell::Number(n) => number_to_string(*n),
            Cell::NoValue => NO_VALUE.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Number(v as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s == NO_VALUE {
            Cell::NoValue
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s == NO_VALUE { Cell::NoValue } else { Cell::Text(s) }
    }
}

/// Render a float the way the upstream API expects labels: `3` not `3.0`.
pub(crate) fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else if n.is_nan() {
        "NaN".to_string()
    } else {
        n.to_string()
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::NoValue => serializer.serialize_str(NO_VALUE),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = Cell;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number, a string, or the \"-\" sentinel")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Cell, E> {
                Ok(Cell::Number(v as f64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Cell, E> {
                Ok(Cell::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Cell, E> {
                Ok(Cell::Number(v))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Cell, E> {
                Ok(Cell::from(s))
            }

            fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Cell, E> {
                Ok(Cell::Text(b.to_string()))
            }

            // JSON null carries no value, same as the sentinel.
            fn visit_unit<E: de::Error>(self) -> std::result::Result<Cell, E> {
                Ok(Cell::NoValue)
            }

            fn visit_none<E: de::Error>(self) -> std::result::Result<Cell, E> {
                Ok(Cell::NoValue)
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// One dataset row. Key order is significant: the first key is the
/// aggregation key (category axis).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: Vec<(String, Cell)>) -> Self {
        Self { cells }
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.iter().any(|(k, _)| k == key)
    }

    /// Replace the value of an existing key in place, or append a new key.
    pub fn insert(&mut self, key: impl Into<String>, value: Cell) {
        let key = key.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Keep only the given keys, in the order they are listed.
    pub fn project(&self, keys: &[String]) -> Row {
        let cells = keys
            .iter()
            .map(|k| (k.clone(), self.get(k).cloned().unwrap_or(Cell::NoValue)))
            .collect();
        Row { cells }
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a JSON object mapping column names to values")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Row, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut cells = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, Cell>()? {
                    cells.push((k, v));
                }
                Ok(Row { cells })
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

/// Error payload returned by the analytics API in place of rows:
/// `[{ "error": { "code", "name", "message", "header" } }]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamError {
    pub code: Value,
    pub name: String,
    pub message: String,
    /// User-visible message.
    pub header: String,
}

/// Input dataset, discriminated once at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    /// `null`: the request is still pending.
    Loading,
    /// `[]`: loaded, nothing to show.
    Empty,
    /// First row carries an `error` field.
    Failed(UpstreamError),
    Rows(Vec<Row>),
}

impl Dataset {
    /// Interpret a JSON value coming from the analytics API.
    pub fn from_value(value: &Value) -> Result<Self> {
        let items = match value {
            Value::Null => return Ok(Dataset::Loading),
            Value::Array(items) => items,
            other => {
                return Err(ChartError::InvalidDataset(format!(
                    "expected an array of rows, got {}",
                    json_kind(other)
                )));
            }
        };

        let Some(first) = items.first() else {
            debug!("dataset is empty");
            return Ok(Dataset::Empty);
        };

        if let Some(err) = first.as_object().and_then(|o| o.get("error")) {
            let upstream = serde_json::from_value::<UpstreamError>(err.clone())
                .unwrap_or_else(|_| UpstreamError {
                    header: err.as_str().unwrap_or_default().to_string(),
                    ..UpstreamError::default()
                });
            debug!("dataset carries upstream error: {}", upstream.header);
            return Ok(Dataset::Failed(upstream));
        }

        let rows = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if !item.is_object() {
                    return Err(ChartError::InvalidDataset(format!(
                        "row {} is {}, expected an object",
                        i,
                        json_kind(item)
                    )));
                }
                Row::deserialize(item).map_err(|e| ChartError::InvalidDataset(e.to_string()))
            })
            .collect::<Result<Vec<Row>>>()?;
        Ok(Dataset::Rows(rows))
    }

    /// Parse a JSON document and interpret it with [`Dataset::from_value`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| ChartError::InvalidDataset(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Wrap already-typed rows; an empty vector becomes [`Dataset::Empty`].
    pub fn from_rows(rows: Vec<Row>) -> Self {
        if rows.is_empty() {
            Dataset::Empty
        } else {
            Dataset::Rows(rows)
        }
    }

    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            Dataset::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}

/// How a column is reduced to one figure (table footer, scorecard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    #[default]
    Sum,
    /// Sum divided by the row count, rounded half up.
    Average,
}

impl SummaryType {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryType::Sum => "sum",
            SummaryType::Average => "average",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_keeps_key_order_and_sentinel() {
        let row: Row = serde_json::from_value(json!({"zeta": "A", "alpha": 1, "mid": "-"})).unwrap();
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(row.get("alpha"), Some(&Cell::Number(1.0)));
        assert_eq!(row.get("mid"), Some(&Cell::NoValue));
    }

    #[test]
    fn null_cells_ingest_as_no_value() {
        let row: Row = serde_json::from_value(json!({"k": "1", "a": null})).unwrap();
        assert!(row.get("a").unwrap().is_no_value());
    }

    #[test]
    fn dataset_states_are_discriminated() {
        assert_eq!(Dataset::from_value(&Value::Null).unwrap(), Dataset::Loading);
        assert_eq!(Dataset::from_value(&json!([])).unwrap(), Dataset::Empty);

        let failed = Dataset::from_value(&json!([{
            "error": {"code": 500, "name": "ServerError", "message": "boom", "header": "Try again later"}
        }]))
        .unwrap();
        match failed {
            Dataset::Failed(e) => {
                assert_eq!(e.header, "Try again later");
                assert_eq!(e.code, json!(500));
            }
            other => panic!("unexpected {other:?}"),
        }

        let rows = Dataset::from_value(&json!([{"k": "1", "a": 2}])).unwrap();
        assert_eq!(rows.rows().map(|r| r.len()), Some(1));
    }

    #[test]
    fn non_array_input_is_rejected() {
        let err = Dataset::from_value(&json!({"k": 1})).unwrap_err();
        assert!(matches!(err, ChartError::InvalidDataset(_)));
    }

    #[test]
    fn cells_serialize_like_the_api() {
        let row: Row = [
            ("k", Cell::from("1")),
            ("a", Cell::Number(2.0)),
            ("b", Cell::Number(2.5)),
            ("c", Cell::NoValue),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"k": "1", "a": 2, "b": 2.5, "c": "-"})
        );
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(Cell::Number(3.0).label(), "3");
        assert_eq!(Cell::Number(-0.0).label(), "0");
        assert_eq!(Cell::Number(0.25).label(), "0.25");
        assert_eq!(Cell::Text(" 4.5 ".into()).parse_number(), Some(4.5));
    }

    #[test]
    fn text_numbers_read_leading_literal() {
        let parse = |s: &str| Cell::Text(s.into()).parse_number();
        assert_eq!(parse("12 kg"), Some(12.0));
        assert_eq!(parse("1e3x"), Some(1000.0));
        assert_eq!(parse(".5"), Some(0.5));
        assert_eq!(parse("-7.25%"), Some(-7.25));
        assert_eq!(parse("3."), Some(3.0));
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("kg 12"), None);
        assert_eq!(parse(""), None);
    }
}
