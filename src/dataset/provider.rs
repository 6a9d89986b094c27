//! Dataset Provider
//!
//! The in-memory case dataset. Loaded once at startup and read-only for the
//! rest of the process, so it is shared across request handlers behind an
//! `Arc` without any locking.

use std::collections::btree_map::{BTreeMap, Entry};

use chrono::NaiveDate;

use super::error::{DatasetError, DatasetResult};
use super::types::{
    CaseRecord, CellValue, Condition, CountrySnapshot, DataTable, Series, TotalsSummary,
    GLOBAL_LABEL,
};

/// Column names of the per-country table, as shown in the page header row
pub const COUNTRY_TABLE_COLUMNS: [&str; 4] = ["Country_Region", "Confirmed", "Deaths", "Recovered"];

/// Read access to country and global case series
pub trait DatasetProvider: Send + Sync {
    /// Country names, sorted ascending
    fn list_countries(&self) -> &[String];

    /// Per-date sum over all countries
    fn global_series(&self) -> &Series;

    /// Series of a single country
    fn country_series(&self, name: &str) -> DatasetResult<&Series>;
}

/// Immutable in-memory dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    countries: Vec<String>,
    by_country: BTreeMap<String, Series>,
    global: Series,
    snapshots: Vec<CountrySnapshot>,
    record_count: usize,
}

impl Dataset {
    /// Build a dataset from raw records
    ///
    /// Rows sharing a (country, date) are summed, which collapses
    /// province-level rows into their country. A country named like the
    /// aggregated series is rejected, as is any sum past the count range.
    pub fn from_records(records: Vec<CaseRecord>) -> DatasetResult<Self> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut grouped: BTreeMap<String, BTreeMap<NaiveDate, CaseRecord>> = BTreeMap::new();
        for record in records {
            if record.country.trim().eq_ignore_ascii_case(GLOBAL_LABEL) {
                return Err(DatasetError::ReservedCountry(record.country));
            }

            let days = grouped.entry(record.country.clone()).or_default();
            match days.entry(record.date) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(mut slot) => {
                    slot.get_mut()
                        .accumulate(&record)
                        .ok_or_else(|| DatasetError::CountOverflow {
                            scope: record.country.clone(),
                            date: record.date,
                        })?;
                }
            }
        }

        let mut global_by_date: BTreeMap<NaiveDate, CaseRecord> = BTreeMap::new();
        let mut by_country = BTreeMap::new();
        let mut record_count = 0;

        for (country, days) in grouped {
            for record in days.values() {
                match global_by_date.entry(record.date) {
                    Entry::Vacant(slot) => {
                        slot.insert(CaseRecord {
                            country: GLOBAL_LABEL.to_string(),
                            ..record.clone()
                        });
                    }
                    Entry::Occupied(mut slot) => {
                        slot.get_mut()
                            .accumulate(record)
                            .ok_or_else(|| DatasetError::CountOverflow {
                                scope: GLOBAL_LABEL.to_string(),
                                date: record.date,
                            })?;
                    }
                }
            }
            record_count += days.len();
            by_country.insert(country.clone(), Series::new(country, days.into_values().collect()));
        }

        let countries: Vec<String> = by_country.keys().cloned().collect();
        let snapshots = by_country
            .values()
            .filter_map(|s: &Series| s.latest().map(CountrySnapshot::from))
            .collect();
        let global = Series::new(GLOBAL_LABEL, global_by_date.into_values().collect());

        tracing::debug!(
            countries = countries.len(),
            records = record_count,
            global_days = global.len(),
            "Dataset assembled"
        );

        Ok(Self {
            countries,
            by_country,
            global,
            snapshots,
            record_count,
        })
    }

    /// Latest record of each country, in country order
    pub fn snapshots(&self) -> &[CountrySnapshot] {
        &self.snapshots
    }

    /// Pre-aggregated global totals: the sum of every country's latest counts
    pub fn snapshot_totals(&self) -> TotalsSummary {
        self.snapshots
            .iter()
            .fold(TotalsSummary::default(), |acc, s| {
                acc.saturating_add(s.confirmed, s.deaths, s.recovered)
            })
    }

    /// The per-country table shown next to the bubble map
    pub fn country_table(&self) -> DataTable {
        let mut table = DataTable::new(COUNTRY_TABLE_COLUMNS);
        for snapshot in &self.snapshots {
            let mut row = vec![CellValue::from(snapshot.country.as_str())];
            row.extend(Condition::ALL.iter().map(|c| CellValue::from(snapshot.count(*c))));
            table = table.row(row);
        }
        table
    }

    /// Number of distinct (country, date) records
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// First and last date covered by the dataset
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let records = self.global.records();
        Some((records.first()?.date, records.last()?.date))
    }
}

impl DatasetProvider for Dataset {
    fn list_countries(&self) -> &[String] {
        &self.countries
    }

    fn global_series(&self) -> &Series {
        &self.global
    }

    fn country_series(&self, name: &str) -> DatasetResult<&Series> {
        self.by_country
            .get(name)
            .ok_or_else(|| DatasetError::UnknownCountry(name.to_string()))
    }
}
