//! Descriptive statistics over numeric columns

use crate::data::SalesTable;

/// Descriptive statistics for one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Smallest modal value when several values tie for the highest frequency
    pub mode: f64,
    /// Sample standard deviation (NaN below two values)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Compute statistics over the finite values of a column.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if vals.is_empty() {
            return None;
        }
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = vals.len();
        let min = vals[0];
        let max = vals[count - 1];
        let mean = vals.iter().sum::<f64>() / count as f64;
        let median = median_of_sorted(&vals);
        let mode = mode_of_sorted(&vals);

        let std_dev = if count < 2 {
            f64::NAN
        } else {
            let sum_sq: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (count - 1) as f64).sqrt()
        };

        Some(ColumnStats {
            count,
            mean,
            median,
            mode,
            std_dev,
            min,
            max,
        })
    }
}

/// Arithmetic mean; NaN for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; NaN for an empty slice
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut vals = values.to_vec();
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    median_of_sorted(&vals)
}

fn median_of_sorted(vals: &[f64]) -> f64 {
    let n = vals.len();
    if n % 2 == 0 {
        (vals[n / 2 - 1] + vals[n / 2]) / 2.0
    } else {
        vals[n / 2]
    }
}

/// First modal value of a sorted slice (smallest value on frequency ties)
fn mode_of_sorted(vals: &[f64]) -> f64 {
    let mut best = vals[0];
    let mut best_count = 0usize;
    let mut i = 0;
    while i < vals.len() {
        let mut j = i + 1;
        while j < vals.len() && vals[j] == vals[i] {
            j += 1;
        }
        // Strictly greater keeps the smallest value on ties
        if j - i > best_count {
            best_count = j - i;
            best = vals[i];
        }
        i = j;
    }
    best
}

/// Print the descriptive-statistics section of the report
pub fn print_report(table: &SalesTable) {
    println!("\n=== Descriptive Statistics ===\n");

    let amounts = table.amounts();
    let ratings = table.ratings();

    if let (Some(amount), Some(rating)) = (
        ColumnStats::compute(&amounts),
        ColumnStats::compute(&ratings),
    ) {
        println!("Mean Purchase Amount: {:.2}", amount.mean);
        println!("Mean Review Rating: {:.2}\n", rating.mean);

        println!("Median Purchase Amount: {:.2}", amount.median);
        println!("Median Review Rating: {:.2}\n", rating.median);

        println!("Mode of Purchase Amount: {:.2}", amount.mode);
        println!("Mode of Review Rating: {:.2}\n", rating.mode);

        println!("Standard Deviation of Purchase Amount: {:.2}", amount.std_dev);
        println!("Standard Deviation of Review Rating: {:.2}\n", rating.std_dev);

        println!("Minimum Purchase Amount: {:.2}", amount.min);
        println!("Maximum Purchase Amount: {:.2}", amount.max);
        println!("Minimum Review Rating: {:.2}", rating.min);
        println!("Maximum Review Rating: {:.2}\n", rating.max);
    }

    println!("Total rows in dataset: {}\n", table.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[10.0, 20.0]), 15.0);
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(mean(&[]).is_nan());
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_column_stats() {
        let stats = ColumnStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 4.5);
        assert_eq!(stats.mode, 4.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        // Sample variance of this series is 32/7
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mode_tie_takes_smallest() {
        let stats = ColumnStats::compute(&[3.0, 1.0, 3.0, 1.0, 2.0]).unwrap();
        assert_eq!(stats.mode, 1.0);
    }

    #[test]
    fn test_std_dev_needs_two_values() {
        let stats = ColumnStats::compute(&[5.0]).unwrap();
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_empty_column() {
        assert_eq!(ColumnStats::compute(&[]), None);
    }
}
