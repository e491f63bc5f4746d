//! Salescope: retail sales EDA pipeline
//!
//! This is the main entrypoint that runs the sequential pipeline: load,
//! clean, descriptive statistics, time-series aggregation, segmentation,
//! chart rendering, and writing the cleaned dataset.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use plotters::style::colors::{BLUE, GREEN, MAGENTA};
use plotters::style::RGBColor;
use salescope::{clean_records, load_records, segments, stats, timeseries, viz, write_cleaned, Args, SalesTable};
use std::time::Instant;

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("Salescope - Retail Sales Exploratory Data Analysis");
        println!("==================================================\n");
    }

    let start_time = Instant::now();

    // Step 1: Load the dataset
    if args.verbose {
        println!("Step 1: Loading dataset");
        println!("  Input file: {}", args.input);
    }
    let load_start = Instant::now();
    let raw_rows = load_records(&args.input)?;
    println!("✓ Dataset loaded: {} rows", raw_rows.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", load_start.elapsed().as_secs_f64());
    }

    // Step 2: Clean the dataset
    let table = clean_records(raw_rows);
    println!("✓ Data cleaning done: {} rows kept", table.len());
    print_preview(&table);

    // Step 3: Descriptive statistics
    stats::print_report(&table);

    // Step 4: Time-series aggregation and trend charts
    std::fs::create_dir_all(&args.charts_dir)
        .with_context(|| format!("failed to create charts directory: {}", args.charts_dir))?;

    let monthly = timeseries::monthly_totals(&table);
    let yearly = timeseries::yearly_totals(&table);
    timeseries::print_series("Monthly Sales", &monthly);
    timeseries::print_series("Yearly Sales", &yearly);

    viz::line_chart(
        &monthly,
        "Monthly Sales Trend",
        "Total Purchase Amount (USD)",
        "%Y-%m",
        &BLUE,
        &args.chart_path("monthly_sales_trend"),
    )?;
    viz::line_chart(
        &yearly,
        "Yearly Sales Trend",
        "Total Purchase Amount (USD)",
        "%Y",
        &ORANGE,
        &args.chart_path("yearly_sales_trend"),
    )?;

    // First two months carry no rolling value: the window is trailing and
    // needs full history
    let rolled: Vec<(NaiveDate, f64)> = timeseries::rolling_mean(&monthly, timeseries::ROLLING_WINDOW)
        .into_iter()
        .filter_map(|(date, value)| value.map(|v| (date, v)))
        .collect();
    viz::line_chart(
        &rolled,
        "3-Month Rolling Average of Sales",
        "Purchase Amount (USD)",
        "%Y-%m",
        &MAGENTA,
        &args.chart_path("rolling_average"),
    )?;

    // Step 5: Customer, product, and payment segmentation
    let customers = segments::analyze_customers(&table);
    segments::print_customer_analysis(&customers);
    viz::bar_chart(
        &customers.top_by_spend,
        "Top 10 Customers by Spending",
        "Customer ID",
        "Total Purchase Amount (USD)",
        &GREEN,
        &args.chart_path("top_customers"),
    )?;

    let products = segments::analyze_products(&table);
    segments::print_product_analysis(&products);
    let counts_f64: Vec<(String, f64)> = products
        .top_by_count
        .iter()
        .map(|(item, count)| (item.clone(), *count as f64))
        .collect();
    viz::bar_chart(
        &counts_f64,
        "Top 10 Products by Purchase Count",
        "Product",
        "Number of Purchases",
        &SKY_BLUE,
        &args.chart_path("top_products_by_count"),
    )?;
    viz::bar_chart(
        &products.top_by_revenue,
        "Top 10 Products by Revenue",
        "Product",
        "Total Revenue (USD)",
        &ORANGE,
        &args.chart_path("top_products_by_revenue"),
    )?;

    let payments = segments::payment_distribution(&table);
    segments::print_payment_distribution(&payments);
    viz::pie_chart(
        &payments,
        "Payment Method Distribution",
        &args.chart_path("payment_methods"),
    )?;

    // Step 6: Recommendations derived from the analysis
    print_recommendations(&products, &payments, &monthly);

    // Step 7: Write the cleaned dataset
    let cleaned_path = args.cleaned_path();
    write_cleaned(&table, &cleaned_path)?;
    println!("\n✓ Cleaned dataset saved to: {}", cleaned_path.display());

    if args.verbose {
        println!(
            "\nTotal processing time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Echo the first rows of the cleaned table, like a dataset head preview
fn print_preview(table: &SalesTable) {
    println!("\nFirst 5 rows:");
    for r in table.records.iter().take(5) {
        println!(
            "  {}  {}  {}  {:.2}  {:.1}  {}",
            r.date.format("%Y-%m-%d"),
            r.customer_id,
            r.item,
            r.amount,
            r.rating,
            r.payment_method
        );
    }
}

/// Print the closing recommendations, built from the computed rankings
fn print_recommendations(
    products: &segments::ProductAnalysis,
    payments: &[(String, usize)],
    monthly: &[(NaiveDate, f64)],
) {
    println!("\n=== Recommendations ===\n");
    println!("1. Focus marketing and loyalty programs on the top 10 customers to boost repeat purchases.");

    let top_products: Vec<&str> = products
        .top_by_revenue
        .iter()
        .take(3)
        .map(|(item, _)| item.as_str())
        .collect();
    if !top_products.is_empty() {
        println!(
            "2. Promote the top-selling products ({}) as they generate maximum revenue.",
            top_products.join(", ")
        );
    }

    if let Some((method, _)) = payments.first() {
        println!(
            "3. Encourage the most popular payment method ({}) since most customers prefer it.",
            method
        );
    }

    let low_month = monthly
        .iter()
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    if let Some((date, _)) = low_month {
        println!(
            "4. Plan promotions during low-sales months such as {}.",
            date.format("%B %Y")
        );
    }

    println!("5. Improve product reviews for high-selling items with lower ratings to enhance customer satisfaction.");
}
