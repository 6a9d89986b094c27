//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dataset::TotalsSummary;

// ============================================
// COUNTRY DTOs
// ============================================

/// Country list response
#[derive(Debug, Serialize)]
pub struct CountryListResponse {
    pub countries: Vec<String>,
    pub total: usize,
}

// ============================================
// CHART DTOs
// ============================================

/// Selection query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    /// Country name; absent or empty means global
    #[serde(default)]
    pub country: Option<String>,
}

/// Both selection-dependent figures
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// "Global" or the country name
    pub label: String,
    /// Plotly figure of the case time series
    pub time_series: Value,
    /// Plotly figure of the totals bar chart
    pub totals: Value,
    /// Per-condition sums the totals chart was built from
    pub summary: TotalsSummary,
}

/// Figures that never change after startup
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub bubble_map: Value,
    pub totals: Value,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub dataset: DatasetHealth,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Loaded dataset summary
#[derive(Debug, Serialize)]
pub struct DatasetHealth {
    pub countries: usize,
    pub records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<String>,
}
