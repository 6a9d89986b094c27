//! # COVID-19 Dashboard
//!
//! A single-page dashboard over a fixed COVID-19 case dataset. It shows a
//! world bubble map and a global totals chart. A country dropdown drives a
//! pair of charts (case time series and per-condition totals) that always
//! update together.
//!
//! ## Modules
//!
//! - [`dataset`]: Case data loading and the read-only provider contract
//! - [`charts`]: Declarative chart specs and their Plotly.js export
//! - [`selection`]: The reactive selection handler
//! - [`layout`]: Page tree, HTML table renderer and document rendering
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::dataset::{load, DatasetSource};
//! use covid_dashboard::selection::{Selection, SelectionHandler};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(load(&DatasetSource::default())?);
//!     let handler = SelectionHandler::new(dataset);
//!
//!     let pair = handler.handle_selection(&Selection::Country("Italy".into()))?;
//!     println!("{}: {} confirmed", pair.label, pair.summary.confirmed);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod layout;
pub mod selection;

// Re-export top-level types for convenience
pub use dataset::{
    load, CaseRecord, CellValue, Condition, DataTable, Dataset, DatasetError, DatasetProvider,
    DatasetResult, DatasetSource, Series, TotalsSummary,
};

pub use charts::{BarChart, BubbleMap, LineChart, Overview, PlotlyFigure};

pub use selection::{ChartPair, Selection, SelectionHandler, SelectionListener};

pub use layout::{build_page, render_document, render_table, Node};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LogFormat, LoggingConfig};
