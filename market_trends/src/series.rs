//! Period bucketing: from raw records to an evenly spaced series
//!
//! The trend fitter depends on even spacing, so the builder always emits
//! one observation per period in the window. A period with no matching
//! records is a 0, never a gap.

use crate::error::{ForecastError, Result};
use crate::records::SalesRecord;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Calendar bucket size for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    /// One calendar day per period
    Daily,
    /// One ISO week (Monday start) per period
    Weekly,
    /// One calendar month per period
    Monthly,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Monthly
    }
}

impl Granularity {
    /// First day of the period containing the given instant
    pub(crate) fn period_start(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        let date = timestamp.date_naive();
        match self {
            Granularity::Daily => date,
            Granularity::Weekly => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            Granularity::Monthly => date.with_day(1).unwrap(),
        }
    }

    /// First day of the period immediately after the one starting at `start`
    pub(crate) fn next_start(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => start + Duration::days(1),
            Granularity::Weekly => start + Duration::days(7),
            Granularity::Monthly => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap()
            }
        }
    }

    /// First day of the period immediately before the one starting at `start`
    pub(crate) fn prev_start(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => start - Duration::days(1),
            Granularity::Weekly => start - Duration::days(7),
            Granularity::Monthly => {
                let (year, month) = if start.month() == 1 {
                    (start.year() - 1, 12)
                } else {
                    (start.year(), start.month() - 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap()
            }
        }
    }

    /// Dashboard label for the period starting at `start`
    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            Granularity::Daily => start.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => {
                let week = start.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Granularity::Monthly => start.format("%Y-%m").to_string(),
        }
    }
}

/// How records within one bucket collapse into an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reduction {
    /// Sum the measures (e.g. monthly revenue)
    Sum,
    /// Count the records (e.g. monthly order volume)
    Count,
}

impl Default for Reduction {
    fn default() -> Self {
        Reduction::Sum
    }
}

/// Aggregated value for one period
///
/// The period index is carried explicitly rather than implied by array
/// position, so a change in aggregation order cannot silently misalign
/// the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// 1-based position within the series
    pub period_index: usize,
    /// First day of the period
    pub period_start: NaiveDate,
    /// Aggregated measure for the period
    pub value: f64,
}

/// An ordered, gap-free sequence of observations, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub(crate) fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// The observations, oldest first
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The observation values alone, in period order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Number of periods in the series
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no periods at all
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Index of the newest period, or 0 for an empty series
    pub fn last_period_index(&self) -> usize {
        self.observations.last().map(|o| o.period_index).unwrap_or(0)
    }

    /// First day of the newest period
    pub fn last_period_start(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.period_start)
    }
}

/// Groups raw records into a trailing window of equally spaced periods
#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    window_periods: usize,
    granularity: Granularity,
    reduction: Reduction,
    group_key: Option<String>,
    require_activity: bool,
    trim_leading_empty: bool,
}

impl SeriesBuilder {
    /// Create a builder for a trailing window of `window_periods`
    /// periods: the period containing the reference instant plus the
    /// preceding ones.
    pub fn new(window_periods: i64) -> Result<Self> {
        if window_periods <= 0 {
            return Err(ForecastError::InvalidWindow(format!(
                "window must span at least one period, got {}",
                window_periods
            )));
        }

        Ok(Self {
            window_periods: window_periods as usize,
            granularity: Granularity::default(),
            reduction: Reduction::default(),
            group_key: None,
            require_activity: false,
            trim_leading_empty: false,
        })
    }

    /// Set the calendar bucket size
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set how records within a bucket collapse into an observation
    pub fn reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Aggregate only records tagged with this group key
    pub fn group_key(mut self, key: impl Into<String>) -> Self {
        self.group_key = Some(key.into());
        self
    }

    /// Fail with `EmptyInput` when the whole window aggregates to zero,
    /// instead of returning an all-zero series
    pub fn require_activity(mut self, require: bool) -> Self {
        self.require_activity = require;
        self
    }

    /// Drop zero-valued periods before the first non-zero observation
    /// and re-index from 1. Off by default: a newly onboarded category
    /// keeps its zero-filled window unless the caller opts in.
    pub fn trim_leading_empty(mut self, trim: bool) -> Self {
        self.trim_leading_empty = trim;
        self
    }

    /// Bucket `records` into the window ending at the period containing
    /// `as_of`. Records outside the window, or not matching the group
    /// key, are ignored.
    pub fn build(&self, records: &[SalesRecord], as_of: DateTime<Utc>) -> Result<Series> {
        let mut starts = self.window_starts(as_of);
        let index_of: HashMap<NaiveDate, usize> = starts
            .iter()
            .enumerate()
            .map(|(i, start)| (*start, i))
            .collect();

        let mut totals = vec![0.0; starts.len()];
        for record in records {
            if let Some(wanted) = &self.group_key {
                if record.group_key.as_deref() != Some(wanted.as_str()) {
                    continue;
                }
            }

            let start = self.granularity.period_start(record.timestamp);
            if let Some(&i) = index_of.get(&start) {
                match self.reduction {
                    Reduction::Sum => totals[i] += record.measure,
                    Reduction::Count => totals[i] += 1.0,
                }
            }
        }

        if self.require_activity && totals.iter().all(|v| *v == 0.0) {
            return Err(ForecastError::EmptyInput(
                "window contains no activity".to_string(),
            ));
        }

        if self.trim_leading_empty {
            match totals.iter().position(|v| *v != 0.0) {
                Some(skip) => {
                    starts.drain(..skip);
                    totals.drain(..skip);
                }
                None => {
                    return Err(ForecastError::EmptyInput(
                        "window contains no activity".to_string(),
                    ));
                }
            }
        }

        let observations = starts
            .into_iter()
            .zip(totals)
            .enumerate()
            .map(|(i, (period_start, value))| Observation {
                period_index: i + 1,
                period_start,
                value,
            })
            .collect();

        Ok(Series::new(observations))
    }

    /// Period starts of the window, oldest first
    fn window_starts(&self, as_of: DateTime<Utc>) -> Vec<NaiveDate> {
        let mut starts = Vec::with_capacity(self.window_periods);
        let mut start = self.granularity.period_start(as_of);
        for _ in 0..self.window_periods {
            starts.push(start);
            start = self.granularity.prev_start(start);
        }
        starts.reverse();
        starts
    }
}
