//! Reactive Selection Handler
//!
//! Turns a dropdown value into the two charts that depend on it: the case
//! time series of the selected scope and its totals bar chart. The handler
//! is a pure function over the immutable dataset; the UI layer decides when
//! to call it and replaces both charts together with the result.

use std::sync::Arc;

use serde::Serialize;

use crate::charts::{
    bar_chart, line_chart, BarChart, BarOptions, ColumnStyle, LineChart, LineOptions,
};
use crate::dataset::{DatasetProvider, DatasetResult, TotalsSummary, GLOBAL_LABEL};

/// The active scope of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Selection {
    Global,
    Country(String),
}

impl Selection {
    /// Interpret a raw dropdown value
    ///
    /// Absent, blank and the literal "Global" all mean the global scope.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Selection::Global,
            Some(v) if v.eq_ignore_ascii_case(GLOBAL_LABEL) => Selection::Global,
            Some(v) => Selection::Country(v.to_string()),
        }
    }

    /// Text used in chart titles
    pub fn label(&self) -> &str {
        match self {
            Selection::Global => GLOBAL_LABEL,
            Selection::Country(name) => name.as_str(),
        }
    }
}

/// Title of the time-series chart for `label`
pub fn time_series_title(label: &str) -> String {
    format!("{} Cases Graph", label)
}

/// Title of the totals bar chart for `label`
pub fn totals_title(label: &str) -> String {
    format!("Total {} Cases", label)
}

/// Both selection-dependent charts, always replaced together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPair {
    pub label: String,
    pub time_series: LineChart,
    pub totals: BarChart,
    pub summary: TotalsSummary,
}

/// Event-handler seam between the UI runtime and the chart computation
pub trait SelectionListener: Send + Sync {
    fn on_selection_changed(&self, value: Option<&str>) -> DatasetResult<ChartPair>;
}

/// Computes [`ChartPair`]s from a dataset provider
pub struct SelectionHandler<P: ?Sized> {
    provider: Arc<P>,
    columns: [ColumnStyle; 3],
}

impl<P: DatasetProvider + ?Sized> SelectionHandler<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            columns: ColumnStyle::standard(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the scope, total it, and build both charts
    ///
    /// An unknown country is a lookup failure; it never falls back to global.
    pub fn handle_selection(&self, selection: &Selection) -> DatasetResult<ChartPair> {
        let series = match selection {
            Selection::Global => self.provider.global_series(),
            Selection::Country(name) => self.provider.country_series(name)?,
        };
        let label = selection.label();

        let time_series = line_chart(
            series,
            &self.columns,
            &LineOptions::titled(time_series_title(label)),
        );
        let summary = series.totals();
        let totals = bar_chart(&summary, &self.columns, &BarOptions::titled(totals_title(label)));

        tracing::debug!(
            selection = %label,
            days = series.len(),
            confirmed = summary.confirmed,
            "Selection charts built"
        );

        Ok(ChartPair {
            label: label.to_string(),
            time_series,
            totals,
            summary,
        })
    }
}

impl<P: DatasetProvider + ?Sized> SelectionListener for SelectionHandler<P> {
    fn on_selection_changed(&self, value: Option<&str>) -> DatasetResult<ChartPair> {
        self.handle_selection(&Selection::from_value(value))
    }
}
