//! COVID-19 Dataset
//!
//! This module provides the case data every chart is built from:
//!
//! - **types**: Core data structures (CaseRecord, Series, TotalsSummary)
//! - **provider**: The immutable in-memory dataset and its read contract
//! - **loader**: CSV loading (long and JHU wide layouts)
//! - **error**: Error types
//!
//! # Lifecycle
//!
//! ```text
//! Startup:
//!   CSV file(s) → loader → Dataset (immutable, shared via Arc)
//!
//! Per selection:
//!   Dataset → country/global Series → TotalsSummary
//! ```

pub mod error;
pub mod loader;
pub mod provider;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{load, DatasetSource};
pub use provider::{Dataset, DatasetProvider, COUNTRY_TABLE_COLUMNS};
pub use types::{
    CaseRecord, CellValue, Condition, CountrySnapshot, DataTable, Series, TotalsSummary,
    GLOBAL_LABEL,
};
