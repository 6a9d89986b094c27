//! Chart Spec Builder
//!
//! Declarative chart descriptions and the pure functions that build them.
//!
//! - **spec**: Chart and option types (colors, hover formats, per-kind options)
//! - **builder**: Table + options → chart spec
//! - **plotly**: Chart spec → Plotly.js figure JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use covid_dashboard::charts::{bar_chart, BarOptions, ColumnStyle, PlotlyFigure};
//! use covid_dashboard::dataset::TotalsSummary;
//!
//! let totals = TotalsSummary { confirmed: 1_000, deaths: 20, recovered: 300 };
//! let chart = bar_chart(&totals, &ColumnStyle::standard(), &BarOptions::titled("Total Global Cases"));
//! println!("{}", chart.to_figure_string());
//! ```

pub mod builder;
pub mod plotly;
pub mod spec;

pub use builder::{bar_chart, bubble_map, line_chart, Overview};
pub use plotly::PlotlyFigure;
pub use spec::{
    Bar, BarChart, BarOptions, BubbleMap, BubbleMapOptions, ColorScale, ColumnStyle, HoverColumn,
    HoverField, HoverFormat, LineChart, LineOptions, LineSeries, LocationMode, Rgb, Template,
};
