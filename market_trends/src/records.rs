//! Raw order records and the record store seam
//!
//! The services own their databases; this crate only consumes records
//! through the [`RecordStore`] trait and never writes. The shipped
//! [`CsvRecordStore`] reads marketplace order exports for offline
//! analysis and tests.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;
use tracing::{debug, warn};

/// A single timestamped measure from the order history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// When the order was placed
    pub timestamp: DateTime<Utc>,
    /// Aggregatable numeric measure, e.g. quantity times unit price
    pub measure: f64,
    /// Optional grouping key such as a product category or region
    pub group_key: Option<String>,
}

impl SalesRecord {
    /// Create a record without a grouping key
    pub fn new(timestamp: DateTime<Utc>, measure: f64) -> Self {
        Self {
            timestamp,
            measure,
            group_key: None,
        }
    }

    /// Create a record tagged with a grouping key
    pub fn with_group(timestamp: DateTime<Utc>, measure: f64, group_key: impl Into<String>) -> Self {
        Self {
            timestamp,
            measure,
            group_key: Some(group_key.into()),
        }
    }
}

/// Source of raw historical records
pub trait RecordStore {
    /// Fetch records, optionally restricted to one group key
    fn fetch(&self, group_key: Option<&str>) -> Result<Vec<SalesRecord>>;
}

/// Configuration for the CSV-backed record store
///
/// Passed explicitly at construction; nothing is read from the
/// environment. Column names are detected from the header row when not
/// set here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvStoreConfig {
    /// Location of the order export
    pub path: PathBuf,
    /// Name of the timestamp column
    pub timestamp_column: Option<String>,
    /// Name of the measure column
    pub measure_column: Option<String>,
    /// Name of the grouping column
    pub group_column: Option<String>,
}

impl CsvStoreConfig {
    /// Configuration with all columns detected from the header row
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timestamp_column: None,
            measure_column: None,
            group_column: None,
        }
    }
}

/// CSV-backed record store
#[derive(Debug)]
pub struct CsvRecordStore {
    config: CsvStoreConfig,
}

impl CsvRecordStore {
    /// Create a store over the configured export file
    pub fn new(config: CsvStoreConfig) -> Self {
        Self { config }
    }

    /// Load every record from the export
    ///
    /// Rows whose timestamp or measure cannot be parsed are skipped with
    /// a warning rather than failing the whole load.
    pub fn load(&self) -> Result<Vec<SalesRecord>> {
        let file = File::open(&self.config.path)?;
        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers()?.clone();

        let timestamp_idx = required_column(
            &headers,
            self.config.timestamp_column.as_deref(),
            &["timestamp", "date", "created"],
            "timestamp",
        )?;
        let measure_idx = required_column(
            &headers,
            self.config.measure_column.as_deref(),
            &["measure", "amount", "total", "price"],
            "measure",
        )?;
        let group_idx = optional_column(
            &headers,
            self.config.group_column.as_deref(),
            &["category", "group", "region"],
        );

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let raw = result?;

            let timestamp = match raw.get(timestamp_idx).and_then(parse_timestamp) {
                Some(timestamp) => timestamp,
                None => {
                    warn!(row, "skipping row with unparseable timestamp");
                    continue;
                }
            };
            let measure = match raw.get(measure_idx).and_then(|v| v.trim().parse::<f64>().ok()) {
                Some(measure) => measure,
                None => {
                    warn!(row, "skipping row with unparseable measure");
                    continue;
                }
            };
            let group_key = group_idx
                .and_then(|i| raw.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            records.push(SalesRecord {
                timestamp,
                measure,
                group_key,
            });
        }

        debug!(count = records.len(), "loaded sales records");
        Ok(records)
    }
}

impl RecordStore for CsvRecordStore {
    fn fetch(&self, group_key: Option<&str>) -> Result<Vec<SalesRecord>> {
        let records = self.load()?;
        match group_key {
            Some(key) => Ok(records
                .into_iter()
                .filter(|r| r.group_key.as_deref() == Some(key))
                .collect()),
            None => Ok(records),
        }
    }
}

/// Find a column either by its configured name or by header substring
fn required_column(
    headers: &StringRecord,
    configured: Option<&str>,
    candidates: &[&str],
    role: &str,
) -> Result<usize> {
    if let Some(name) = configured {
        return headers.iter().position(|h| h == name).ok_or_else(|| {
            ForecastError::DataError(format!("configured {} column '{}' not found", role, name))
        });
    }

    for candidate in candidates {
        if let Some(idx) = headers
            .iter()
            .position(|h| h.to_lowercase().contains(candidate))
        {
            return Ok(idx);
        }
    }

    Err(ForecastError::DataError(format!(
        "no {} column found in data",
        role
    )))
}

fn optional_column(
    headers: &StringRecord,
    configured: Option<&str>,
    candidates: &[&str],
) -> Option<usize> {
    if let Some(name) = configured {
        return headers.iter().position(|h| h == name);
    }

    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(candidate))
    })
}

/// Parse the timestamp formats seen in the order exports: RFC 3339,
/// `YYYY-MM-DD HH:MM:SS`, or a bare `YYYY-MM-DD` date.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    None
}
