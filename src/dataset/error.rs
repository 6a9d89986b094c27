//! Dataset error types
//!
//! Defines all errors that can occur while loading or querying the dataset.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the dataset layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Dataset file could not be read
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV framing error
    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("Missing column '{column}' in {path:?}")]
    MissingColumn { path: PathBuf, column: String },

    /// A row could not be interpreted
    #[error("Malformed data in {path:?} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// The source contained no case records
    #[error("Dataset contains no records")]
    Empty,

    /// Summing rows for one day exceeds the count range
    #[error("Case counts for {scope} on {date} overflow")]
    CountOverflow { scope: String, date: NaiveDate },

    /// A country uses the name reserved for the aggregated series
    #[error("Country name '{0}' is reserved for the global series")]
    ReservedCountry(String),

    /// Requested country is not part of the dataset
    #[error("Lookup failure: unknown country '{0}'")]
    UnknownCountry(String),
}

impl DatasetError {
    /// True for selection lookups that can be reported to the user;
    /// every other variant is a startup failure
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, DatasetError::UnknownCountry(_))
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::UnknownCountry("Atlantis".to_string());
        assert_eq!(err.to_string(), "Lookup failure: unknown country 'Atlantis'");

        let err = DatasetError::Malformed {
            path: PathBuf::from("cases.csv"),
            line: 4,
            reason: "invalid count 'x'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed data in \"cases.csv\" line 4: invalid count 'x'"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(DatasetError::UnknownCountry("Atlantis".into()).is_lookup_failure());
        assert!(!DatasetError::Empty.is_lookup_failure());
        assert!(!DatasetError::ReservedCountry("Global".into()).is_lookup_failure());
    }
}
