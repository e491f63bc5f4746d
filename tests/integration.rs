//! Integration tests for the Salescope pipeline

use salescope::{clean_records, load_records, write_cleaned, segments, stats, timeseries, viz};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV with the messy shapes the cleaner has to handle:
/// surrounding whitespace, mixed casing, missing numeric cells, an
/// unparseable date, and an exact duplicate pair.
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Date Purchase,Customer Reference ID,Item Purchased,Purchase Amount (USD),Review Rating,Payment Method"
    )
    .unwrap();

    writeln!(file, "2023-01-15,C1, handbag ,100,4.5,credit card").unwrap();
    // Missing purchase amount
    writeln!(file, "2023-01-20,C2,dress,,3,Cash").unwrap();
    // Missing review rating
    writeln!(file, "2023-02-10,C3,tunic,50,,cash").unwrap();
    // Unparseable date: dropped entirely
    writeln!(file, "not-a-date,C4,shirt ,10,4,cash").unwrap();
    // Exact duplicates after cleaning
    writeln!(file, "2023-04-05,C1, shirt,20,4,cash").unwrap();
    writeln!(file, "2023-04-05,C1,Shirt ,20,4,Cash").unwrap();
    writeln!(file, "2023-04-10,C2,handbag,30,5,credit card").unwrap();

    file
}

#[test]
fn test_cleaning_invariants() {
    let test_file = create_test_csv();
    let rows = load_records(test_file.path()).unwrap();
    assert_eq!(rows.len(), 7);

    let table = clean_records(rows);
    // Bad-date row dropped, duplicate pair collapsed
    assert_eq!(table.len(), 5);

    for r in &table.records {
        // No missing values
        assert!(r.amount.is_finite());
        assert!(r.rating.is_finite());
        // Trimmed and title-cased text
        assert_eq!(r.item, r.item.trim());
        assert_eq!(r.payment_method, r.payment_method.trim());
    }
    assert_eq!(table.records[0].item, "Handbag");
    assert_eq!(table.records[0].payment_method, "Credit Card");

    // Ordered by date ascending
    for pair in table.records.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }

    // The missing amount was filled with the pre-fill mean, which includes
    // the value of the row later dropped for its bad date
    let expected_mean = (100.0 + 50.0 + 10.0 + 20.0 + 20.0 + 30.0) / 6.0;
    let filled = table
        .records
        .iter()
        .find(|r| r.customer_id == "C2" && r.item == "Dress")
        .unwrap();
    assert!((filled.amount - expected_mean).abs() < 1e-9);

    // The missing rating was filled with the pre-fill median
    let filled = table
        .records
        .iter()
        .find(|r| r.customer_id == "C3")
        .unwrap();
    assert_eq!(filled.rating, 4.0);
}

#[test]
fn test_statistics_over_cleaned_table() {
    let test_file = create_test_csv();
    let table = clean_records(load_records(test_file.path()).unwrap());

    let amount_stats = stats::ColumnStats::compute(&table.amounts()).unwrap();
    assert_eq!(amount_stats.count, 5);
    assert_eq!(amount_stats.min, 20.0);
    assert_eq!(amount_stats.max, 100.0);
    assert!(amount_stats.std_dev.is_finite());

    let rating_stats = stats::ColumnStats::compute(&table.ratings()).unwrap();
    assert_eq!(rating_stats.min, 3.0);
    assert_eq!(rating_stats.max, 5.0);
}

#[test]
fn test_time_series_consistency() {
    let test_file = create_test_csv();
    let table = clean_records(load_records(test_file.path()).unwrap());

    let monthly = timeseries::monthly_totals(&table);
    let yearly = timeseries::yearly_totals(&table);

    // January through April, with the empty March filled in as 0
    assert_eq!(monthly.len(), 4);
    assert_eq!(monthly[2].1, 0.0);

    let grand_total: f64 = table.amounts().iter().sum();
    let monthly_sum: f64 = monthly.iter().map(|&(_, v)| v).sum();
    let yearly_sum: f64 = yearly.iter().map(|&(_, v)| v).sum();
    assert!((monthly_sum - grand_total).abs() < 1e-9);
    assert!((yearly_sum - grand_total).abs() < 1e-9);

    // Trailing 3-month window: first two points undefined
    let rolled = timeseries::rolling_mean(&monthly, timeseries::ROLLING_WINDOW);
    assert_eq!(rolled[0].1, None);
    assert_eq!(rolled[1].1, None);
    assert!(rolled[2].1.is_some());
}

#[test]
fn test_segment_rankings() {
    let test_file = create_test_csv();
    let table = clean_records(load_records(test_file.path()).unwrap());

    let customers = segments::analyze_customers(&table);
    assert_eq!(customers.unique_customers, 3);

    // Descending by total spend, deterministic across runs
    for pair in customers.top_by_spend.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
    assert_eq!(customers.top_by_spend[0].0, "C1");
    let again = segments::analyze_customers(&table);
    assert_eq!(customers.top_by_spend, again.top_by_spend);

    let products = segments::analyze_products(&table);
    assert_eq!(products.top_by_count[0], ("Handbag".to_string(), 2));
    assert_eq!(products.top_by_revenue[0], ("Handbag".to_string(), 130.0));

    let payments = segments::payment_distribution(&table);
    let total: usize = payments.iter().map(|(_, c)| c).sum();
    assert_eq!(total, table.len());
    assert_eq!(payments[0].0, "Cash");
}

#[test]
fn test_writer_round_trip_is_idempotent() {
    let test_file = create_test_csv();
    let first = clean_records(load_records(test_file.path()).unwrap());

    // Write the cleaned table and run it through the pipeline again
    let temp_dir = tempdir().unwrap();
    let cleaned_path = temp_dir.path().join("cleaned.csv");
    write_cleaned(&first, &cleaned_path).unwrap();

    let second = clean_records(load_records(&cleaned_path).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_charts_render_from_pipeline_output() {
    let test_file = create_test_csv();
    let table = clean_records(load_records(test_file.path()).unwrap());
    let temp_dir = tempdir().unwrap();

    let monthly = timeseries::monthly_totals(&table);
    let monthly_path = temp_dir.path().join("monthly.png");
    viz::line_chart(
        &monthly,
        "Monthly Sales Trend",
        "Total Purchase Amount (USD)",
        "%Y-%m",
        &plotters::style::colors::BLUE,
        &monthly_path,
    )
    .unwrap();
    assert!(monthly_path.exists());

    let customers = segments::analyze_customers(&table);
    let bar_path = temp_dir.path().join("top_customers.png");
    viz::bar_chart(
        &customers.top_by_spend,
        "Top 10 Customers by Spending",
        "Customer ID",
        "Total Purchase Amount (USD)",
        &plotters::style::colors::GREEN,
        &bar_path,
    )
    .unwrap();
    assert!(bar_path.exists());

    let payments = segments::payment_distribution(&table);
    let pie_path = temp_dir.path().join("payments.png");
    viz::pie_chart(&payments, "Payment Method Distribution", &pie_path).unwrap();
    assert!(pie_path.exists());
}

#[test]
fn test_missing_input_is_fatal() {
    let result = load_records("no/such/file.csv");
    assert!(result.is_err());
}
