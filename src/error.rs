//! Error type shared by the shaping, canvas, table, and scorecard functions.
//!
//! Only conditions that make the current transformation impossible live here.
//! An empty dataset or an upstream error payload is a renderable state, not an
//! error; see [`crate::models::Dataset`].

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A row carries fewer than two keys (or there are no rows at all).
    #[error(
        "JSON object must include at least two key-value pairs: one for x-axis titles and one for y-axis values"
    )]
    MalformedDataset,

    /// One or more requested columns are not present in the dataset.
    /// Carries the offending names, comma-joined in request order.
    #[error("Unknown keys: {0}")]
    UnknownKeys(String),

    /// Single-key variant used by the scorecard.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// The chart type name is not one of the supported types.
    #[error("Chart type unknown: {0}")]
    UnknownChartType(String),

    /// Point charts need one value column per coordinate.
    #[error("{chart_type} chart requires at least {required} value keys, got {got}")]
    NotEnoughKeys {
        chart_type: &'static str,
        required: usize,
        got: usize,
    },

    /// A combined chart was requested without line keys.
    #[error("combined chart requires line keys")]
    MissingLineKeys,

    /// More series (or slices/points) than the palette has colors for.
    #[error("palette '{palette}' supports at most {available} colors, {requested} requested")]
    PaletteExhausted {
        palette: &'static str,
        requested: usize,
        available: usize,
    },

    /// Scatter/bubble canvas built without the precomputed tooltip entries.
    #[error("scatter and bubble charts require precomputed tooltip data")]
    MissingTooltipData,

    /// The input could not be interpreted as a list of rows.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
}
