//! Dataset Loader
//!
//! Reads case data from CSV into a [`Dataset`]. Two layouts are supported:
//!
//! - **Long**: one row per country and day
//!   (`country,date,confirmed,deaths,recovered`)
//! - **JHU**: the wide Johns Hopkins time-series layout, one file per
//!   condition with a column per day (`Province/State,Country/Region,Lat,Long,1/22/20,...`)
//!
//! Any unreadable or malformed input is an error; the caller is expected to
//! abort startup rather than serve partial data.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{DatasetError, DatasetResult};
use super::provider::Dataset;
use super::types::{CaseRecord, Condition};

/// Header aliases accepted for the country column
const COUNTRY_ALIASES: [&str; 3] = ["country", "country_region", "country/region"];

/// Pattern of a JHU date column header (m/d/yy)
const DATE_COLUMN_PATTERN: &str = r"^\d{1,2}/\d{1,2}/\d{2,4}$";

/// Where and how the dataset is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum DatasetSource {
    /// Single long-format CSV
    Long { path: PathBuf },
    /// Three JHU wide-format CSVs
    Jhu {
        confirmed: PathBuf,
        deaths: PathBuf,
        recovered: PathBuf,
    },
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Long {
            path: PathBuf::from("data/covid_daily.csv"),
        }
    }
}

impl DatasetSource {
    /// Paths read by this source
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            DatasetSource::Long { path } => vec![path.as_path()],
            DatasetSource::Jhu {
                confirmed,
                deaths,
                recovered,
            } => vec![confirmed.as_path(), deaths.as_path(), recovered.as_path()],
        }
    }
}

/// Load and assemble the dataset described by `source`
pub fn load(source: &DatasetSource) -> DatasetResult<Dataset> {
    let records = match source {
        DatasetSource::Long { path } => {
            tracing::info!(path = ?path, "Loading long-format dataset");
            parse_long(open(path)?, path)?
        }
        DatasetSource::Jhu {
            confirmed,
            deaths,
            recovered,
        } => {
            tracing::info!(
                confirmed = ?confirmed,
                deaths = ?deaths,
                recovered = ?recovered,
                "Loading JHU time-series dataset"
            );
            let confirmed = parse_jhu(open(confirmed)?, confirmed)?;
            let deaths = parse_jhu(open(deaths)?, deaths)?;
            let recovered = parse_jhu(open(recovered)?, recovered)?;
            join_jhu(confirmed, deaths, recovered)
        }
    };

    let dataset = Dataset::from_records(records)?;
    tracing::info!(
        countries = dataset.snapshots().len(),
        records = dataset.record_count(),
        "Dataset loaded"
    );
    Ok(dataset)
}

fn open(path: &Path) -> DatasetResult<File> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_error(origin: &Path) -> impl Fn(csv::Error) -> DatasetError + '_ {
    move |source| DatasetError::Csv {
        path: origin.to_path_buf(),
        source,
    }
}

fn malformed(origin: &Path, line: u64, reason: impl Into<String>) -> DatasetError {
    DatasetError::Malformed {
        path: origin.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Find a header by case-insensitive name
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn require_column(
    headers: &csv::StringRecord,
    names: &[&str],
    origin: &Path,
) -> DatasetResult<usize> {
    find_column(headers, names).ok_or_else(|| DatasetError::MissingColumn {
        path: origin.to_path_buf(),
        column: names[0].to_string(),
    })
}

/// Parse a calendar date in one of the accepted layouts
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    // Two-digit years must not be read as years 0-99
    let year_len = s.rsplit('/').next().map(str::len)?;
    let format = if year_len == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
    NaiveDate::parse_from_str(s, format).ok()
}

/// Parse a non-negative count; empty cells read as zero
fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0);
    }
    s.parse::<u64>().ok()
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parse long-format rows
pub fn parse_long<R: Read>(reader: R, origin: &Path) -> DatasetResult<Vec<CaseRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error(origin))?.clone();
    let country_col = require_column(&headers, &COUNTRY_ALIASES, origin)?;
    let date_col = require_column(&headers, &["date"], origin)?;
    let count_cols = Condition::ALL
        .iter()
        .map(|c| require_column(&headers, &[c.key()], origin))
        .collect::<DatasetResult<Vec<_>>>()?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_error(origin))?;
        let line = line_of(&row);

        let country = row.get(country_col).unwrap_or("").trim();
        if country.is_empty() {
            return Err(malformed(origin, line, "empty country name"));
        }

        let date_str = row.get(date_col).unwrap_or("");
        let date = parse_date(date_str)
            .ok_or_else(|| malformed(origin, line, format!("invalid date '{}'", date_str)))?;

        let mut counts = [0u64; 3];
        for (slot, (col, condition)) in counts
            .iter_mut()
            .zip(count_cols.iter().zip(Condition::ALL.iter()))
        {
            let raw = row.get(*col).unwrap_or("");
            *slot = parse_count(raw).ok_or_else(|| {
                malformed(
                    origin,
                    line,
                    format!("invalid {} count '{}'", condition.key(), raw),
                )
            })?;
        }

        records.push(CaseRecord::new(country, date, counts[0], counts[1], counts[2]));
    }

    tracing::debug!(path = ?origin, rows = records.len(), "Parsed long-format rows");
    Ok(records)
}

/// Parse one JHU wide-format file into (country, date) -> count,
/// summing province rows into their country
pub fn parse_jhu<R: Read>(
    reader: R,
    origin: &Path,
) -> DatasetResult<BTreeMap<(String, NaiveDate), u64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error(origin))?.clone();
    let country_col = require_column(&headers, &COUNTRY_ALIASES, origin)?;

    let pattern = Regex::new(DATE_COLUMN_PATTERN)
        .map_err(|e| malformed(origin, 1, format!("date column pattern: {}", e)))?;

    let mut date_cols = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let header = header.trim();
        if pattern.is_match(header) {
            let date = parse_date(header)
                .ok_or_else(|| malformed(origin, 1, format!("invalid date column '{}'", header)))?;
            date_cols.push((idx, date));
        }
    }
    if date_cols.is_empty() {
        return Err(DatasetError::MissingColumn {
            path: origin.to_path_buf(),
            column: "m/d/yy date".to_string(),
        });
    }

    let mut counts: BTreeMap<(String, NaiveDate), u64> = BTreeMap::new();
    for result in reader.records() {
        let row = result.map_err(csv_error(origin))?;
        let line = line_of(&row);

        let country = row.get(country_col).unwrap_or("").trim();
        if country.is_empty() {
            return Err(malformed(origin, line, "empty country name"));
        }

        for (col, date) in &date_cols {
            let raw = row.get(*col).unwrap_or("");
            let value = parse_count(raw).ok_or_else(|| {
                malformed(origin, line, format!("invalid count '{}' for {}", raw, date))
            })?;
            let total = counts.entry((country.to_string(), *date)).or_insert(0);
            *total = total.checked_add(value).ok_or_else(|| {
                malformed(origin, line, format!("{} count overflows on {}", country, date))
            })?;
        }
    }

    tracing::debug!(path = ?origin, cells = counts.len(), "Parsed JHU time-series file");
    Ok(counts)
}

/// Join the three per-condition JHU tables into case records
///
/// A (country, date) absent from one table counts as zero for that condition.
pub fn join_jhu(
    confirmed: BTreeMap<(String, NaiveDate), u64>,
    deaths: BTreeMap<(String, NaiveDate), u64>,
    recovered: BTreeMap<(String, NaiveDate), u64>,
) -> Vec<CaseRecord> {
    let mut joined: BTreeMap<(String, NaiveDate), [u64; 3]> = BTreeMap::new();
    for (slot, table) in [confirmed, deaths, recovered].into_iter().enumerate() {
        for (key, value) in table {
            joined.entry(key).or_insert([0; 3])[slot] = value;
        }
    }

    joined
        .into_iter()
        .map(|((country, date), [c, d, r])| CaseRecord::new(country, date, c, d, r))
        .collect()
}
