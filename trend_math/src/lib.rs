//! # Trend Math
//!
//! Closed-form trend fitting and projection for evenly spaced series.
//! This crate is the shared numeric core of the marketplace analytics
//! services: an ordinary-least-squares line over a 1-based period index,
//! and the forward projection of that line.

use thiserror::Error;

pub mod projection;
pub mod regression;

/// Errors that can occur in trend calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("No model: {0}")]
    NoModel(String),
}

/// Result type for trend math operations
pub type Result<T> = std::result::Result<T, MathError>;
