//! Chart shaping and canvas configuration.
//!
//! Two independent steps produce everything a chart renderer needs:
//!
//! 1. [`chart_data_setup`] turns rows into a [`NormalizedChartDataset`]
//!    (category labels + series), bucketing long tails into "Others" for
//!    pie/doughnut and scatter/bubble charts.
//! 2. [`canvas_setup`] turns the caller's [`OptionsCustomization`] and value
//!    formats into [`RenderOptions`] (axes, legend, tooltip rules).
//!
//! Scatter and bubble charts additionally need
//! [`create_bubble_chart_tooltip_dataset`], whose entries are handed to
//! [`canvas_setup`].
//!
//! ### Example
//! ```
//! use dashboard_charts::chart::{chart_data_setup, ChartType, Palettes};
//! use dashboard_charts::models::Row;
//!
//! let rows: Vec<Row> = serde_json::from_str(
//!     r#"[{"year": "2023", "net_sales": 10, "returns": 2},
//!         {"year": "2024", "net_sales": 12, "returns": "-"}]"#,
//! )?;
//! let data = chart_data_setup(&rows, ChartType::Bar, &["net_sales"], None, &Palettes::default())?;
//! assert_eq!(data.labels, ["2023", "2024"]);
//! assert_eq!(data.series[0].label, "net sales");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canvas;
pub mod dataset;
pub mod options;
pub mod others;
pub mod palette;
pub mod tooltip;
pub mod transform;
pub mod types;

pub use canvas::{OptionsCustomization, canvas_setup};
pub use dataset::{
    chart_data_setup, create_basic_chart_dataset, create_pie_chart_dataset, create_scatter_chart_dataset,
};
pub use options::{RenderOptions, TooltipCallbacks, TooltipItem};
pub use others::{group_others, group_others_for};
pub use palette::{BaseColor, Palettes};
pub use tooltip::create_bubble_chart_tooltip_dataset;
pub use transform::{calculate_bubble_point_radius, calculate_data_percentage};
pub use types::{
    AxisId, ChartFamily, ChartType, ColorSpec, NormalizedChartDataset, Point, Series, SeriesData, SeriesKind,
    TooltipEntry, ValueFormats,
};
