use chrono::{Duration, TimeZone, Utc};
use market_trends::records::SalesRecord;
use market_trends::series::{Reduction, SeriesBuilder};
use market_trends::TrendForecaster;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Market Trends: Per-Category Forecasting Example");
    println!("===============================================\n");

    let records = create_sample_orders();
    let as_of = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();

    // Revenue forecast per category over the trailing six months
    for category in ["marble", "granite"] {
        let forecaster = TrendForecaster::with_builder(
            SeriesBuilder::new(6)?.group_key(category),
        );
        let points = forecaster.forecast_at(&records, 2, as_of)?;

        println!("{} revenue forecast:", category);
        for point in points {
            println!("  period {}: {:>10.2}", point.period_index, point.value);
        }
        println!();
    }

    // Order volume rather than revenue: count records per month
    let volume = TrendForecaster::with_builder(
        SeriesBuilder::new(6)?.reduction(Reduction::Count),
    );
    let points = volume.forecast_at(&records, 2, as_of)?;

    println!("Order volume forecast (all categories):");
    for point in points {
        println!("  period {}: {:>6.1} orders", point.period_index, point.value);
    }

    Ok(())
}

/// Six months of orders: marble revenue ramps up, granite drifts down.
fn create_sample_orders() -> Vec<SalesRecord> {
    let mut records = Vec::new();

    for month in 1..=6u32 {
        let placed = Utc.with_ymd_and_hms(2024, month, 10, 9, 0, 0).unwrap();

        records.push(SalesRecord::with_group(
            placed,
            2000.0 + (month - 1) as f64 * 400.0,
            "marble",
        ));
        records.push(SalesRecord::with_group(
            placed + Duration::days(5),
            3000.0 - (month - 1) as f64 * 150.0,
            "granite",
        ));
    }

    records
}
