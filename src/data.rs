//! Sales dataset loading, cleaning, and serialization

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::stats;

/// One CSV row as read from disk, before any cleaning
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    /// Purchase date as it appears in the file
    #[serde(rename = "Date Purchase")]
    pub date_purchase: String,
    #[serde(rename = "Customer Reference ID")]
    pub customer_id: String,
    #[serde(rename = "Item Purchased")]
    pub item: String,
    /// Missing cells deserialize to `None` and are filled during cleaning
    #[serde(rename = "Purchase Amount (USD)")]
    pub amount: Option<f64>,
    #[serde(rename = "Review Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Payment Method")]
    pub payment_method: String,
}

/// One cleaned sales record
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub customer_id: String,
    pub item: String,
    pub amount: f64,
    pub rating: f64,
    pub payment_method: String,
}

/// Cleaned sales table, ordered by purchase date ascending
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalesTable {
    pub records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Purchase-amount column
    pub fn amounts(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.amount).collect()
    }

    /// Review-rating column
    pub fn ratings(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.rating).collect()
    }
}

/// Load raw sales records from a CSV file
///
/// Fatal if the file is missing or a row fails to deserialize; missing
/// numeric cells are not an error and come back as `None`.
pub fn load_records<P: AsRef<Path>>(path: P) -> crate::Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input file: {}", path.display()))?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: RawRecord = result
            .with_context(|| format!("malformed row in {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Clean raw records into a `SalesTable`
///
/// Steps, in order: fill missing amounts with the pre-fill mean, fill
/// missing ratings with the pre-fill median, trim and title-case the text
/// columns, drop rows whose date does not parse, drop exact duplicates,
/// and sort by date ascending. Total over its input: bad data is filled
/// or dropped, never an error.
pub fn clean_records(rows: Vec<RawRecord>) -> SalesTable {
    // Fill values are computed over the values present *before* any fill
    let present_amounts: Vec<f64> = rows.iter().filter_map(|r| r.amount).collect();
    let present_ratings: Vec<f64> = rows.iter().filter_map(|r| r.rating).collect();
    let amount_fill = stats::mean(&present_amounts);
    let rating_fill = stats::median(&present_ratings);

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        // Rows with unparseable dates are a data-quality condition, not an
        // error: silently excluded from all downstream steps.
        let date = match parse_date(&row.date_purchase) {
            Some(d) => d,
            None => continue,
        };

        records.push(SalesRecord {
            date,
            customer_id: row.customer_id.trim().to_string(),
            item: title_case(&row.item),
            amount: row.amount.unwrap_or(amount_fill),
            rating: row.rating.unwrap_or(rating_fill),
            payment_method: title_case(&row.payment_method),
        });
    }

    // Exact duplicates across all fields collapse to the first occurrence
    let mut seen = HashSet::new();
    records.retain(|r| {
        seen.insert((
            r.date,
            r.customer_id.clone(),
            r.item.clone(),
            r.amount.to_bits(),
            r.rating.to_bits(),
            r.payment_method.clone(),
        ))
    });

    // Reindex: stable ascending order by purchase date
    records.sort_by_key(|r| r.date);

    SalesTable { records }
}

/// Serialize the cleaned table to CSV, date as the leading column
pub fn write_cleaned<P: AsRef<Path>>(table: &SalesTable, path: P) -> crate::Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;

    writer
        .write_record([
            "Date Purchase",
            "Customer Reference ID",
            "Item Purchased",
            "Purchase Amount (USD)",
            "Review Rating",
            "Payment Method",
        ])
        .context("failed to write CSV header")?;

    for r in &table.records {
        writer
            .write_record([
                r.date.format("%Y-%m-%d").to_string(),
                r.customer_id.clone(),
                r.item.clone(),
                r.amount.to_string(),
                r.rating.to_string(),
                r.payment_method.clone(),
            ])
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush output file: {}", path.display()))?;
    Ok(())
}

/// Parse a purchase date, trying the formats seen in the wild
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%d/%m/%Y"];
    for fmt in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Trim surrounding whitespace and title-case the text: the first letter of
/// every maximal alphabetic run is uppercased, the rest lowercased, so
/// `" summer  t-shirt "` becomes `"Summer  T-Shirt"`. Idempotent.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.trim().chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}
