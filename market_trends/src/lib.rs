//! # Market Trends
//!
//! A Rust library for marketplace sales aggregation and trend forecasting.
//! Both the API server and the admin analytics service import this crate,
//! so the aggregation and regression logic exists exactly once.
//!
//! ## Features
//!
//! - Raw order records bucketed into an evenly spaced, gap-free period series
//! - Closed-form linear trend fitting through the shared `trend_math` core
//! - Forward projection with a floor-at-zero, round-to-cents policy
//! - CSV-backed record store for offline analysis and tests
//! - Period label helpers and forecast accuracy metrics for the dashboard
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use market_trends::forecast::TrendForecaster;
//! use market_trends::records::SalesRecord;
//!
//! fn main() -> market_trends::error::Result<()> {
//!     // Raw order history, in any order
//!     let records = vec![
//!         SalesRecord::new(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(), 1200.0),
//!         SalesRecord::new(Utc.with_ymd_and_hms(2024, 2, 14, 0, 0, 0).unwrap(), 1350.0),
//!         SalesRecord::new(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap(), 1500.0),
//!     ];
//!
//!     // Three trailing months, projected two months forward
//!     let forecaster = TrendForecaster::new(3)?;
//!     let as_of = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();
//!     let points = forecaster.forecast_at(&records, 2, as_of)?;
//!
//!     assert_eq!(points.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod forecast;
pub mod records;
pub mod series;
pub mod utils;

// Re-export commonly used types
pub use crate::error::ForecastError;
pub use crate::forecast::{forecast, ForecastPoint, TrendForecaster};
pub use crate::records::{CsvRecordStore, CsvStoreConfig, RecordStore, SalesRecord};
pub use crate::series::{Granularity, Observation, Reduction, Series, SeriesBuilder};
pub use trend_math::regression::TrendModel;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
