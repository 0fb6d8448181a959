//! Utility functions for the market_trends crate

use crate::error::{ForecastError, Result};
use crate::series::{Granularity, Series};

/// Labels for each observed period, oldest first
pub fn period_labels(series: &Series, granularity: Granularity) -> Vec<String> {
    series
        .observations()
        .iter()
        .map(|o| granularity.label(o.period_start))
        .collect()
}

/// Labels for the `horizon` periods after the observed window
///
/// The presentation layer zips these with the forecast points.
pub fn future_period_labels(
    series: &Series,
    granularity: Granularity,
    horizon: usize,
) -> Result<Vec<String>> {
    let mut start = match series.last_period_start() {
        Some(start) => start,
        None => {
            return Err(ForecastError::EmptyInput(
                "series has no periods to extend".to_string(),
            ))
        }
    };

    let mut labels = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        start = granularity.next_start(start);
        labels.push(granularity.label(start));
    }

    Ok(labels)
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::DataError(
            "forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    // Mean Absolute Error
    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;

    // Mean Squared Error
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;

    // Root Mean Squared Error
    let rmse = mse.sqrt();

    // Mean Absolute Percentage Error; zero actuals are left out
    let mape = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .sum::<f64>()
        / n;

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
    })
}

/// Forecast accuracy metrics
#[derive(Debug, Clone)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        Ok(())
    }
}
