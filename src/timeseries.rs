//! Calendar resampling and rolling averages over the cleaned table

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::data::SalesTable;

/// Rolling window length used for the smoothed monthly series
pub const ROLLING_WINDOW: usize = 3;

/// Sum of purchase amounts per calendar month, labeled by month-end date.
///
/// Months with no rows between the first and last observed month are
/// included with a total of 0, matching the gap-filling convention of
/// calendar resampling.
pub fn monthly_totals(table: &SalesTable) -> Vec<(NaiveDate, f64)> {
    let mut buckets: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in &table.records {
        *buckets.entry((r.date.year(), r.date.month())).or_insert(0.0) += r.amount;
    }

    let (first, last) = match (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) {
        (Some(f), Some(l)) => (f, l),
        _ => return Vec::new(),
    };

    let mut series = Vec::new();
    let (mut year, mut month) = first;
    loop {
        let total = buckets.get(&(year, month)).copied().unwrap_or(0.0);
        series.push((month_end(year, month), total));
        if (year, month) == last {
            break;
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    series
}

/// Sum of purchase amounts per calendar year, labeled by year-end date
pub fn yearly_totals(table: &SalesTable) -> Vec<(NaiveDate, f64)> {
    let mut buckets: BTreeMap<i32, f64> = BTreeMap::new();
    for r in &table.records {
        *buckets.entry(r.date.year()).or_insert(0.0) += r.amount;
    }

    let (first, last) = match (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) {
        (Some(f), Some(l)) => (f, l),
        _ => return Vec::new(),
    };

    (first..=last)
        .map(|year| {
            let total = buckets.get(&year).copied().unwrap_or(0.0);
            (year_end(year), total)
        })
        .collect()
}

/// Trailing rolling mean over a dated series.
///
/// A full window is required: the first `window - 1` points carry `None`.
pub fn rolling_mean(
    series: &[(NaiveDate, f64)],
    window: usize,
) -> Vec<(NaiveDate, Option<f64>)> {
    if window == 0 {
        return series.iter().map(|&(d, _)| (d, None)).collect();
    }
    series
        .iter()
        .enumerate()
        .map(|(i, &(date, _))| {
            if i + 1 < window {
                (date, None)
            } else {
                let sum: f64 = series[i + 1 - window..=i].iter().map(|&(_, v)| v).sum();
                (date, Some(sum / window as f64))
            }
        })
        .collect()
}

/// Print a dated series as labeled console lines
pub fn print_series(title: &str, series: &[(NaiveDate, f64)]) {
    println!("{}:", title);
    for (date, total) in series {
        println!("  {}  {:.2}", date.format("%Y-%m-%d"), total);
    }
    println!();
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MIN)
}

fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MIN)
}
