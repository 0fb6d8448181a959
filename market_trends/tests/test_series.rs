use chrono::{NaiveDate, TimeZone, Utc};
use market_trends::{
    ForecastError, Granularity, Reduction, SalesRecord, SeriesBuilder,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn ts(year: i32, month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 30, 0).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_monthly_aggregation_sums_within_period() {
    let records = vec![
        SalesRecord::new(ts(2024, 3, 2), 100.0),
        SalesRecord::new(ts(2024, 3, 28), 50.0),
        SalesRecord::new(ts(2024, 4, 10), 75.0),
    ];

    let series = SeriesBuilder::new(2)
        .unwrap()
        .build(&records, ts(2024, 4, 30))
        .unwrap();

    assert_eq!(series.values(), vec![150.0, 75.0]);
    assert_eq!(series.last_period_index(), 2);
}

#[test]
fn test_empty_periods_are_zero_filled_not_omitted() {
    // Orders in the first and last month only; the gap must stay.
    let records = vec![
        SalesRecord::new(ts(2024, 1, 5), 10.0),
        SalesRecord::new(ts(2024, 4, 5), 40.0),
    ];

    let series = SeriesBuilder::new(4)
        .unwrap()
        .build(&records, ts(2024, 4, 15))
        .unwrap();

    assert_eq!(series.values(), vec![10.0, 0.0, 0.0, 40.0]);
}

#[test]
fn test_records_outside_window_are_ignored() {
    let records = vec![
        SalesRecord::new(ts(2023, 6, 1), 999.0),
        SalesRecord::new(ts(2024, 3, 1), 30.0),
        SalesRecord::new(ts(2024, 5, 1), 999.0),
    ];

    let series = SeriesBuilder::new(3)
        .unwrap()
        .build(&records, ts(2024, 4, 1))
        .unwrap();

    // Window is Feb, Mar, Apr 2024; June 2023 and May 2024 fall outside.
    assert_eq!(series.values(), vec![0.0, 30.0, 0.0]);
}

#[test]
fn test_window_crosses_year_boundary() {
    let records = vec![
        SalesRecord::new(ts(2023, 11, 20), 11.0),
        SalesRecord::new(ts(2023, 12, 24), 12.0),
        SalesRecord::new(ts(2024, 1, 2), 1.0),
    ];

    let series = SeriesBuilder::new(3)
        .unwrap()
        .build(&records, ts(2024, 1, 31))
        .unwrap();

    assert_eq!(series.values(), vec![11.0, 12.0, 1.0]);
    let starts: Vec<_> = series
        .observations()
        .iter()
        .map(|o| o.period_start)
        .collect();
    assert_eq!(
        starts,
        vec![date(2023, 11, 1), date(2023, 12, 1), date(2024, 1, 1)]
    );
}

#[rstest]
#[case(Granularity::Daily, ts(2024, 3, 6), date(2024, 3, 4))]
#[case(Granularity::Weekly, ts(2024, 3, 6), date(2024, 2, 19))]
#[case(Granularity::Monthly, ts(2024, 3, 6), date(2024, 1, 1))]
fn test_window_start_per_granularity(
    #[case] granularity: Granularity,
    #[case] as_of: chrono::DateTime<Utc>,
    #[case] expected_first_start: NaiveDate,
) {
    // 2024-03-06 is a Wednesday; its ISO week starts Monday 2024-03-04.
    let series = SeriesBuilder::new(3)
        .unwrap()
        .granularity(granularity)
        .build(&[], as_of)
        .unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.observations()[0].period_start, expected_first_start);
}

#[test]
fn test_weekly_buckets_align_to_monday() {
    // Friday and the following Monday land in different weeks.
    let records = vec![
        SalesRecord::new(ts(2024, 3, 1), 5.0),
        SalesRecord::new(ts(2024, 3, 4), 7.0),
    ];

    let series = SeriesBuilder::new(2)
        .unwrap()
        .granularity(Granularity::Weekly)
        .build(&records, ts(2024, 3, 6))
        .unwrap();

    assert_eq!(series.values(), vec![5.0, 7.0]);
}

#[test]
fn test_count_reduction() {
    let records = vec![
        SalesRecord::new(ts(2024, 2, 1), 100.0),
        SalesRecord::new(ts(2024, 2, 2), 250.0),
        SalesRecord::new(ts(2024, 3, 1), 40.0),
    ];

    let series = SeriesBuilder::new(2)
        .unwrap()
        .reduction(Reduction::Count)
        .build(&records, ts(2024, 3, 31))
        .unwrap();

    assert_eq!(series.values(), vec![2.0, 1.0]);
}

#[test]
fn test_group_key_filters_records() {
    let records = vec![
        SalesRecord::with_group(ts(2024, 2, 3), 100.0, "marble"),
        SalesRecord::with_group(ts(2024, 2, 4), 60.0, "granite"),
        SalesRecord::new(ts(2024, 2, 5), 30.0),
    ];

    let series = SeriesBuilder::new(1)
        .unwrap()
        .group_key("marble")
        .build(&records, ts(2024, 2, 28))
        .unwrap();

    assert_eq!(series.values(), vec![100.0]);
}

#[rstest]
#[case(0)]
#[case(-5)]
fn test_non_positive_window_is_rejected(#[case] window: i64) {
    let result = SeriesBuilder::new(window);
    assert!(matches!(result, Err(ForecastError::InvalidWindow(_))));
}

#[test]
fn test_empty_records_yield_all_zero_series() {
    let series = SeriesBuilder::new(6)
        .unwrap()
        .build(&[], ts(2024, 6, 1))
        .unwrap();

    assert_eq!(series.values(), vec![0.0; 6]);
}

#[test]
fn test_require_activity_rejects_all_zero_window() {
    let result = SeriesBuilder::new(6)
        .unwrap()
        .require_activity(true)
        .build(&[], ts(2024, 6, 1));

    assert!(matches!(result, Err(ForecastError::EmptyInput(_))));
}

#[test]
fn test_require_activity_accepts_any_nonzero_observation() {
    let records = vec![SalesRecord::new(ts(2024, 5, 10), 1.0)];

    let series = SeriesBuilder::new(6)
        .unwrap()
        .require_activity(true)
        .build(&records, ts(2024, 6, 1))
        .unwrap();

    assert_eq!(series.len(), 6);
}

#[test]
fn test_trim_leading_empty_reindexes_from_one() {
    let records = vec![
        SalesRecord::new(ts(2024, 4, 1), 20.0),
        SalesRecord::new(ts(2024, 5, 1), 30.0),
    ];

    let series = SeriesBuilder::new(6)
        .unwrap()
        .trim_leading_empty(true)
        .build(&records, ts(2024, 5, 31))
        .unwrap();

    assert_eq!(series.values(), vec![20.0, 30.0]);
    assert_eq!(series.observations()[0].period_index, 1);
    assert_eq!(series.observations()[0].period_start, date(2024, 4, 1));
    assert_eq!(series.last_period_index(), 2);
}

#[test]
fn test_trim_leading_empty_keeps_interior_zeros() {
    let records = vec![
        SalesRecord::new(ts(2024, 3, 1), 20.0),
        SalesRecord::new(ts(2024, 5, 1), 30.0),
    ];

    let series = SeriesBuilder::new(6)
        .unwrap()
        .trim_leading_empty(true)
        .build(&records, ts(2024, 5, 31))
        .unwrap();

    assert_eq!(series.values(), vec![20.0, 0.0, 30.0]);
}

#[test]
fn test_trim_leading_empty_on_silent_window_fails() {
    let result = SeriesBuilder::new(4)
        .unwrap()
        .trim_leading_empty(true)
        .build(&[], ts(2024, 5, 31));

    assert!(matches!(result, Err(ForecastError::EmptyInput(_))));
}
