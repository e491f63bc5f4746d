//! Customer, product, and payment-method segmentation

use std::collections::HashMap;

use crate::data::{SalesRecord, SalesTable};

/// Ranking depth used throughout the report
pub const TOP_N: usize = 10;

/// Per-customer aggregates and the top-spender ranking
#[derive(Debug, Clone)]
pub struct CustomerAnalysis {
    pub unique_customers: usize,
    /// Purchase count per customer, first-seen order
    pub purchase_counts: Vec<(String, usize)>,
    /// Mean spend per customer, first-seen order
    pub average_spend: Vec<(String, f64)>,
    /// Top customers by total spend, descending
    pub top_by_spend: Vec<(String, f64)>,
}

/// Product rankings by purchase count and by revenue
#[derive(Debug, Clone)]
pub struct ProductAnalysis {
    pub top_by_count: Vec<(String, usize)>,
    pub top_by_revenue: Vec<(String, f64)>,
}

/// Group records by a key, accumulating amount totals and row counts.
///
/// Groups come back in first-seen order, which is what the stable ranking
/// sorts below use as their tie-break.
fn group_by<F>(table: &SalesTable, key: F) -> Vec<(String, f64, usize)>
where
    F: Fn(&SalesRecord) -> &str,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, f64, usize)> = Vec::new();
    for r in &table.records {
        let k = key(r);
        match index.get(k) {
            Some(&i) => {
                groups[i].1 += r.amount;
                groups[i].2 += 1;
            }
            None => {
                index.insert(k.to_string(), groups.len());
                groups.push((k.to_string(), r.amount, 1));
            }
        }
    }
    groups
}

fn top_by_value<T: PartialOrd + Copy>(mut entries: Vec<(String, T)>, n: usize) -> Vec<(String, T)> {
    // Stable sort keeps first-seen order between equal values
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries.truncate(n);
    entries
}

pub fn analyze_customers(table: &SalesTable) -> CustomerAnalysis {
    let groups = group_by(table, |r| &r.customer_id);

    let purchase_counts = groups.iter().map(|(k, _, c)| (k.clone(), *c)).collect();
    let average_spend = groups
        .iter()
        .map(|(k, total, c)| (k.clone(), total / *c as f64))
        .collect();
    let totals: Vec<(String, f64)> = groups
        .iter()
        .map(|(k, total, _)| (k.clone(), *total))
        .collect();

    CustomerAnalysis {
        unique_customers: groups.len(),
        purchase_counts,
        average_spend,
        top_by_spend: top_by_value(totals, TOP_N),
    }
}

pub fn analyze_products(table: &SalesTable) -> ProductAnalysis {
    let groups = group_by(table, |r| &r.item);

    let counts: Vec<(String, usize)> = groups.iter().map(|(k, _, c)| (k.clone(), *c)).collect();
    let revenue: Vec<(String, f64)> = groups
        .iter()
        .map(|(k, total, _)| (k.clone(), *total))
        .collect();

    ProductAnalysis {
        top_by_count: top_by_value(counts, TOP_N),
        top_by_revenue: top_by_value(revenue, TOP_N),
    }
}

/// Count of purchases per payment method, descending
pub fn payment_distribution(table: &SalesTable) -> Vec<(String, usize)> {
    let groups = group_by(table, |r| &r.payment_method);
    let counts: Vec<(String, usize)> = groups.iter().map(|(k, _, c)| (k.clone(), *c)).collect();
    top_by_value(counts, usize::MAX)
}

pub fn print_customer_analysis(analysis: &CustomerAnalysis) {
    println!("\n=== Customer Analysis ===\n");
    println!("Total Unique Customers: {}", analysis.unique_customers);

    println!("\nPurchase frequency per customer (first 5):");
    for (customer, count) in analysis.purchase_counts.iter().take(5) {
        println!("  {}  {}", customer, count);
    }

    println!("\nAverage purchase per customer (first 5):");
    for (customer, avg) in analysis.average_spend.iter().take(5) {
        println!("  {}  {:.2}", customer, avg);
    }

    println!("\nTop {} Customers by Total Spending:", TOP_N);
    for (customer, total) in &analysis.top_by_spend {
        println!("  {}  {:.2}", customer, total);
    }
}

pub fn print_product_analysis(analysis: &ProductAnalysis) {
    println!("\n=== Product Analysis ===\n");

    println!("Top {} Products by Purchase Count:", TOP_N);
    for (item, count) in &analysis.top_by_count {
        println!("  {}  {}", item, count);
    }

    println!("\nTop {} Products by Revenue:", TOP_N);
    for (item, revenue) in &analysis.top_by_revenue {
        println!("  {}  {:.2}", item, revenue);
    }
}

pub fn print_payment_distribution(distribution: &[(String, usize)]) {
    println!("\nPayment Method Distribution:");
    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    for (method, count) in distribution {
        let percentage = if total > 0 {
            (*count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}  {} ({:.1}%)", method, count, percentage);
    }
}
