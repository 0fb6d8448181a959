//! Error types for the market_trends crate

use thiserror::Error;
use trend_math::MathError;

/// Custom error types for the market_trends crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Requested historical window length was zero or negative
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Nothing to fit: an empty series, or a window with no activity
    /// when the caller required some
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Requested forecast horizon was negative
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Projection was asked to extend a model fitted on nothing
    #[error("No model: {0}")]
    NoModel(String),

    /// Error related to malformed input rows or columns
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::EmptyInput(msg) => ForecastError::EmptyInput(msg),
            MathError::NoModel(msg) => ForecastError::NoModel(msg),
        }
    }
}
