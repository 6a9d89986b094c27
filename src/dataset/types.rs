//! Core data types for the COVID-19 case dataset
//!
//! This module defines the fundamental types used throughout the dashboard:
//! - `CaseRecord`: one day of case counts for one country
//! - `Series`: a date-ordered run of records for one scope
//! - `TotalsSummary`: per-condition sums over a series
//! - `CountrySnapshot`: the latest known counts of a country
//! - `Condition`: the three tracked case columns

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::charts::Rgb;

/// Scope label used for the all-countries series
pub const GLOBAL_LABEL: &str = "Global";

/// The three tracked case conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Confirmed,
    Deaths,
    Recovered,
}

impl Condition {
    /// All conditions in display order
    pub const ALL: [Condition; 3] = [Condition::Confirmed, Condition::Deaths, Condition::Recovered];

    /// Human-readable column label
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Confirmed => "Confirmed",
            Condition::Deaths => "Deaths",
            Condition::Recovered => "Recovered",
        }
    }

    /// Lowercase key used in JSON payloads and CSV headers
    pub fn key(&self) -> &'static str {
        match self {
            Condition::Confirmed => "confirmed",
            Condition::Deaths => "deaths",
            Condition::Recovered => "recovered",
        }
    }

    /// Fixed display color, identical in every chart
    pub fn color(&self) -> Rgb {
        match self {
            Condition::Confirmed => Rgb::new(0x54, 0xa0, 0xff),
            Condition::Deaths => Rgb::new(0xee, 0x52, 0x53),
            Condition::Recovered => Rgb::new(0x1d, 0xd1, 0xa1),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of case counts for one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub country: String,
    pub date: NaiveDate,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl CaseRecord {
    pub fn new(
        country: impl Into<String>,
        date: NaiveDate,
        confirmed: u64,
        deaths: u64,
        recovered: u64,
    ) -> Self {
        Self {
            country: country.into(),
            date,
            confirmed,
            deaths,
            recovered,
        }
    }

    /// Count for a single condition
    pub fn count(&self, condition: Condition) -> u64 {
        match condition {
            Condition::Confirmed => self.confirmed,
            Condition::Deaths => self.deaths,
            Condition::Recovered => self.recovered,
        }
    }

    /// Add another record's counts into this one
    ///
    /// Returns `None`, leaving `self` untouched, if any sum overflows.
    pub(crate) fn accumulate(&mut self, other: &CaseRecord) -> Option<()> {
        let confirmed = self.confirmed.checked_add(other.confirmed)?;
        let deaths = self.deaths.checked_add(other.deaths)?;
        let recovered = self.recovered.checked_add(other.recovered)?;

        self.confirmed = confirmed;
        self.deaths = deaths;
        self.recovered = recovered;
        Some(())
    }
}

/// Date-ordered case records for a single scope (one country or global)
///
/// Immutable once the dataset is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    scope: String,
    records: Vec<CaseRecord>,
}

impl Series {
    /// Create a series, sorting the records by date
    pub fn new(scope: impl Into<String>, mut records: Vec<CaseRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self {
            scope: scope.into(),
            records,
        }
    }

    /// Country name, or "Global" for the aggregated series
    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Dates in series order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// One column of counts in series order
    pub fn values(&self, condition: Condition) -> Vec<u64> {
        self.records.iter().map(|r| r.count(condition)).collect()
    }

    /// Most recent record, if any
    pub fn latest(&self) -> Option<&CaseRecord> {
        self.records.last()
    }

    /// Sum every column over the whole series
    pub fn totals(&self) -> TotalsSummary {
        TotalsSummary::from_series(self)
    }
}

/// Per-condition sums over a series
///
/// Recomputed on every selection; never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl TotalsSummary {
    pub fn from_series(series: &Series) -> Self {
        Self::from_records(series.records())
    }

    /// Column sums; a sum past `u64::MAX` saturates
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CaseRecord>) -> Self {
        records
            .into_iter()
            .fold(TotalsSummary::default(), |acc, r| {
                acc.saturating_add(r.confirmed, r.deaths, r.recovered)
            })
    }

    pub(crate) fn saturating_add(self, confirmed: u64, deaths: u64, recovered: u64) -> Self {
        Self {
            confirmed: self.confirmed.saturating_add(confirmed),
            deaths: self.deaths.saturating_add(deaths),
            recovered: self.recovered.saturating_add(recovered),
        }
    }

    pub fn get(&self, condition: Condition) -> u64 {
        match condition {
            Condition::Confirmed => self.confirmed,
            Condition::Deaths => self.deaths,
            Condition::Recovered => self.recovered,
        }
    }

    /// (condition, count) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Condition, u64)> + '_ {
        Condition::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Latest known counts of a single country
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySnapshot {
    pub country: String,
    pub date: NaiveDate,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

impl CountrySnapshot {
    pub fn count(&self, condition: Condition) -> u64 {
        match condition {
            Condition::Confirmed => self.confirmed,
            Condition::Deaths => self.deaths,
            Condition::Recovered => self.recovered,
        }
    }
}

impl From<&CaseRecord> for CountrySnapshot {
    fn from(record: &CaseRecord) -> Self {
        Self {
            country: record.country.clone(),
            date: record.date,
            confirmed: record.confirmed,
            deaths: record.deaths,
            recovered: record.recovered,
        }
    }
}

/// A single cell of a rendered data table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(u64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Integer(n)
    }
}

/// A rectangular table of named columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DataTable {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder method: append a row
    pub fn row(mut self, row: Vec<CellValue>) -> Self {
        self.rows.push(row);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
    }

    #[test]
    fn test_series_sorted_by_date() {
        let series = Series::new(
            "Italy",
            vec![
                CaseRecord::new("Italy", date(3), 30, 3, 1),
                CaseRecord::new("Italy", date(1), 10, 1, 0),
                CaseRecord::new("Italy", date(2), 20, 2, 0),
            ],
        );

        assert_eq!(series.dates(), vec![date(1), date(2), date(3)]);
        assert_eq!(series.values(Condition::Confirmed), vec![10, 20, 30]);
        assert_eq!(series.latest().unwrap().date, date(3));
    }

    #[test]
    fn test_totals_sum_each_column() {
        let series = Series::new(
            "Italy",
            vec![
                CaseRecord::new("Italy", date(1), 10, 1, 0),
                CaseRecord::new("Italy", date(2), 20, 2, 5),
            ],
        );

        let totals = series.totals();
        assert_eq!(totals.get(Condition::Confirmed), 30);
        assert_eq!(totals.get(Condition::Deaths), 3);
        assert_eq!(totals.get(Condition::Recovered), 5);
    }

    #[test]
    fn test_totals_of_empty_series() {
        let series = Series::new("Nowhere", Vec::new());
        assert_eq!(series.totals(), TotalsSummary::default());
    }

    #[test]
    fn test_totals_saturate_instead_of_wrapping() {
        let series = Series::new(
            "Peru",
            vec![
                CaseRecord::new("Peru", date(1), 10_000_000_000_000_000_000, 0, 1),
                CaseRecord::new("Peru", date(2), 10_000_000_000_000_000_000, 0, 2),
            ],
        );

        let totals = series.totals();
        assert_eq!(totals.confirmed, u64::MAX);
        assert_eq!(totals.recovered, 3);
    }

    #[test]
    fn test_accumulate_overflow_leaves_record_untouched() {
        let mut record = CaseRecord::new("Peru", date(1), 1, u64::MAX, 0);
        let other = CaseRecord::new("Peru", date(1), 1, 1, 0);

        assert_eq!(record.accumulate(&other), None);
        assert_eq!(record.confirmed, 1);
        assert_eq!(record.deaths, u64::MAX);

        assert_eq!(record.accumulate(&CaseRecord::new("Peru", date(1), 2, 0, 5)), Some(()));
        assert_eq!((record.confirmed, record.recovered), (3, 5));
    }

    #[test]
    fn test_condition_order_and_colors() {
        let order: Vec<_> = TotalsSummary::default().iter().map(|(c, _)| c).collect();
        assert_eq!(order, Condition::ALL.to_vec());

        assert_eq!(Condition::Confirmed.color().to_string(), "#54a0ff");
        assert_eq!(Condition::Deaths.color().to_string(), "#ee5253");
        assert_eq!(Condition::Recovered.color().to_string(), "#1dd1a1");
    }
}
