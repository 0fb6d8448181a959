//! Ordinary least squares trend fitting over a period-indexed series
//!
//! The independent variable is the 1-based position of each observation,
//! so the input must be evenly spaced and gap-free. Building such a
//! series from raw records is the caller's job.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// A fitted linear trend over periods 1..=last_period_index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    /// Change in value per period
    pub slope: f64,
    /// Value of the line at period 0
    pub intercept: f64,
    /// Index of the last observed period (equals the series length)
    pub last_period_index: usize,
}

impl TrendModel {
    /// Evaluate the fitted line at the given period index
    pub fn value_at(&self, period_index: usize) -> f64 {
        self.intercept + self.slope * period_index as f64
    }
}

/// Fit a least-squares line through `values`, treating each value's
/// 1-based position as the independent variable.
///
/// A single observation yields a flat line: slope 0, intercept equal to
/// that observation. An empty slice is an error.
pub fn fit_trend(values: &[f64]) -> Result<TrendModel> {
    if values.is_empty() {
        return Err(MathError::EmptyInput(
            "cannot fit a trend to an empty series".to_string(),
        ));
    }

    let n = values.len() as f64;

    // Accumulated in index order; results are reproducible bit-for-bit.
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = (i + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    // Zero denominator means x has no variance, which only happens for a
    // single observation. The model degrades to a flat line.
    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(TrendModel {
        slope,
        intercept,
        last_period_index: values.len(),
    })
}
