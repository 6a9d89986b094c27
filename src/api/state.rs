//! Application State
//!
//! Shared state accessible by all API handlers.
//! Everything here is built once at startup and never mutated, so handlers
//! share it through `Arc` without locks.

use std::sync::Arc;
use std::time::Instant;

use crate::charts::Overview;
use crate::config::ApiConfig;
use crate::dataset::{Dataset, DatasetResult};
use crate::layout::{build_page, render_document, PAGE_TITLE};
use crate::selection::{Selection, SelectionHandler};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded case dataset
    pub dataset: Arc<Dataset>,
    /// Reactive selection handler
    pub selection: Arc<SelectionHandler<Dataset>>,
    /// Bubble map and global totals chart
    pub overview: Arc<Overview>,
    /// Rendered page HTML
    pub page: Arc<String>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build charts and the page from a loaded dataset
    pub fn new(dataset: Arc<Dataset>, config: ApiConfig) -> DatasetResult<Self> {
        let selection = Arc::new(SelectionHandler::new(Arc::clone(&dataset)));
        let overview = Arc::new(Overview::build(&dataset));

        let initial = selection.handle_selection(&Selection::Global)?;
        let page = render_document(PAGE_TITLE, &build_page(&dataset, &overview, &initial));
        tracing::debug!(bytes = page.len(), "Page rendered");

        Ok(Self {
            dataset,
            selection,
            overview,
            page: Arc::new(page),
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
