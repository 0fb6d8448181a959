//! The forecasting pipeline: aggregate, fit, project
//!
//! Everything here is recomputed per request. No fitted model is cached
//! across calls, so there is no staleness to track; concurrent requests
//! share nothing.

use crate::error::{ForecastError, Result};
use crate::records::SalesRecord;
use crate::series::{Series, SeriesBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use trend_math::projection::project;
use trend_math::regression::{fit_trend, TrendModel};

/// One projected value for a period beyond the observed window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 1-based period index, strictly greater than the fitted range
    pub period_index: usize,
    /// Projected value, never negative, rounded to two decimals
    pub value: f64,
}

/// Serialize points into the dashboard payload shape
pub fn points_to_json(points: &[ForecastPoint]) -> Result<String> {
    serde_json::to_string(points).map_err(|e| ForecastError::DataError(e.to_string()))
}

/// Fit the trend line through a series
pub fn fit_series(series: &Series) -> Result<TrendModel> {
    Ok(fit_trend(&series.values())?)
}

/// Project a fitted model over the next `horizon` periods
///
/// A horizon of 0 yields an empty sequence; a negative horizon is an
/// error. The signed type matches what arrives from the HTTP handlers.
pub fn project_model(model: &TrendModel, horizon: i64) -> Result<Vec<ForecastPoint>> {
    if horizon < 0 {
        return Err(ForecastError::InvalidHorizon(format!(
            "horizon must not be negative, got {}",
            horizon
        )));
    }

    let values = project(model, horizon as usize)?;
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(i, value)| ForecastPoint {
            period_index: model.last_period_index + i + 1,
            value,
        })
        .collect())
}

/// Per-request forecasting pipeline
///
/// Stateless apart from its builder settings; every call re-aggregates
/// and refits from the records handed in.
#[derive(Debug, Clone)]
pub struct TrendForecaster {
    builder: SeriesBuilder,
}

impl TrendForecaster {
    /// Pipeline over a trailing window of `window_periods` periods with
    /// default aggregation settings
    pub fn new(window_periods: i64) -> Result<Self> {
        Ok(Self {
            builder: SeriesBuilder::new(window_periods)?,
        })
    }

    /// Pipeline over a fully configured series builder
    pub fn with_builder(builder: SeriesBuilder) -> Self {
        Self { builder }
    }

    /// Forecast from the window ending now
    pub fn forecast(&self, records: &[SalesRecord], horizon: i64) -> Result<Vec<ForecastPoint>> {
        self.forecast_at(records, horizon, Utc::now())
    }

    /// Forecast from the window ending at the period containing `as_of`
    pub fn forecast_at(
        &self,
        records: &[SalesRecord],
        horizon: i64,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<ForecastPoint>> {
        // Validation happens before any aggregation work.
        if horizon < 0 {
            return Err(ForecastError::InvalidHorizon(format!(
                "horizon must not be negative, got {}",
                horizon
            )));
        }

        let series = self.builder.build(records, as_of)?;
        let model = fit_series(&series)?;
        debug!(
            slope = model.slope,
            intercept = model.intercept,
            periods = model.last_period_index,
            "fitted trend model"
        );

        project_model(&model, horizon)
    }
}

/// The single pipeline operation the service handlers call: bucket the
/// trailing window of records, fit the trend, project it forward.
pub fn forecast(
    records: &[SalesRecord],
    window_periods: i64,
    horizon: i64,
) -> Result<Vec<ForecastPoint>> {
    TrendForecaster::new(window_periods)?.forecast(records, horizon)
}
