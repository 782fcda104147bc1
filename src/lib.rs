//! dashboard_charts
//!
//! Turns loosely-typed analytics rows into view models for dashboard widgets:
//! chart datasets with matching render options, formatted tables, and
//! single-figure scorecards. Pairs with the `dashcharts` inspection CLI.
//!
//! ### Features
//! - Shape line, bar, area, pie, doughnut, scatter, bubble and combined bar/line charts
//! - "Others" bucketing, percentage stacking, bubble radius scaling
//! - Render options (axes, legend, grid, tooltips) from display customization
//! - Table footers (grand sum / average) and column sorting
//! - Locale-aware number, percent and euro formatting
//! - Uniform loading / empty / upstream-error handling
//!
//! ### Example
//! ```
//! use dashboard_charts::{ChartConfig, Dataset};
//! use dashboard_charts::chart::ChartType;
//! use dashboard_charts::view::{render_chart, ChartProps, ViewState};
//!
//! let dataset = Dataset::from_json_str(
//!     r#"[{"month": "Jan", "orders": 120, "returns": 4},
//!         {"month": "Feb", "orders": 95, "returns": "-"}]"#,
//! )?;
//! let props = ChartProps::new(ChartType::Line, &["orders", "returns"]);
//! match render_chart(&dataset, &props, &ChartConfig::default())? {
//!     ViewState::Ready(view) => assert_eq!(view.data.series.len(), 2),
//!     other => panic!("unexpected state {other:?}"),
//! }
//! # Ok::<(), dashboard_charts::ChartError>(())
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod keys;
pub mod models;
pub mod scorecard;
pub mod table;
pub mod view;

pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use format::{ValueFormat, convert_snake_to_low_case, format_value, format_value_locale};
pub use keys::{get_keys, legend_labels, validate_allowed_keys};
pub use models::{Cell, Dataset, NO_VALUE, Row, SummaryType, UpstreamError};
