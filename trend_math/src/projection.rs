//! Forward projection of a fitted trend

use crate::regression::TrendModel;
use crate::{MathError, Result};

/// Project the model over the next `horizon` periods, oldest first.
///
/// Each value is the line evaluated at periods
/// `last_period_index + 1 ..= last_period_index + horizon`, rounded to two
/// decimals and clamped at zero: forecasted marketplace prices and
/// quantities cannot go negative. A horizon of 0 yields an empty vector.
pub fn project(model: &TrendModel, horizon: usize) -> Result<Vec<f64>> {
    if model.last_period_index == 0 {
        return Err(MathError::NoModel(
            "model was fitted on an empty series".to_string(),
        ));
    }

    let mut values = Vec::with_capacity(horizon);
    for step in 1..=horizon {
        let raw = model.value_at(model.last_period_index + step);
        values.push(round_to_cents(raw).max(0.0));
    }

    Ok(values)
}

/// Round to two decimal places, matching currency-scale precision.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
