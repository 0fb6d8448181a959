use chrono::{Duration, TimeZone, Utc};
use market_trends::forecast::fit_series;
use market_trends::records::SalesRecord;
use market_trends::series::{Granularity, SeriesBuilder};
use market_trends::utils::{future_period_labels, period_labels};
use market_trends::TrendForecaster;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Market Trends: Basic Forecasting Example");
    println!("========================================\n");

    // Create sample data
    println!("Creating sample order history...");
    let records = create_sample_orders();
    println!("Sample data created: {} orders\n", records.len());

    let as_of = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

    // Aggregate the trailing year into a monthly series
    let builder = SeriesBuilder::new(12)?;
    let series = builder.build(&records, as_of)?;

    println!("Monthly revenue series:");
    let labels = period_labels(&series, Granularity::Monthly);
    for (label, observation) in labels.iter().zip(series.observations()) {
        println!("  {}: {:>10.2}", label, observation.value);
    }

    // Fit the trend line
    let model = fit_series(&series)?;
    println!(
        "\nFitted trend: slope {:.2} per month, intercept {:.2}",
        model.slope, model.intercept
    );

    // Project the next quarter
    let forecaster = TrendForecaster::with_builder(builder);
    let points = forecaster.forecast_at(&records, 3, as_of)?;
    let future_labels = future_period_labels(&series, Granularity::Monthly, 3)?;

    println!("\nNext quarter forecast:");
    for (label, point) in future_labels.iter().zip(&points) {
        println!("  {}: {:>10.2}", label, point.value);
    }

    println!("\nForecasting complete!");

    Ok(())
}

/// A year of orders with a steady upward revenue trend and a few orders
/// scattered within each month.
fn create_sample_orders() -> Vec<SalesRecord> {
    let mut records = Vec::new();

    for month in 1..=12u32 {
        let monthly_base = 5000.0 + (month - 1) as f64 * 250.0;
        let first_order = Utc.with_ymd_and_hms(2024, month, 3, 10, 0, 0).unwrap();

        // Split the monthly total over three orders
        records.push(SalesRecord::new(first_order, monthly_base * 0.5));
        records.push(SalesRecord::new(
            first_order + Duration::days(9),
            monthly_base * 0.3,
        ));
        records.push(SalesRecord::new(
            first_order + Duration::days(18),
            monthly_base * 0.2,
        ));
    }

    records
}
