//! Per-hop bucket rows and ASCII table formatting for the attempt summary
//!
//! This module provides shared functionality for bucket-based reporting:
//! - [`HopBucketRow`] type summarizing one hop's attempt counts
//! - ASCII table formatting using the [`tabled`] crate

use tabled::{Table, Tabled};

/// Summary of the attempt counts observed at a single hop distance
#[derive(Debug, Clone, Tabled)]
pub struct HopBucketRow {
    /// Hop count (TTL delta) this row describes
    #[tabled(rename = "Hop")]
    pub hop: u32,
    /// Number of samples observed at this hop
    #[tabled(rename = "Samples")]
    pub samples: usize,
    /// Smallest attempt count, "-" when the hop was never observed
    #[tabled(rename = "Min")]
    pub min: String,
    /// Median attempt count, "-" when the hop was never observed
    #[tabled(rename = "Median")]
    pub median: String,
    /// Largest attempt count, "-" when the hop was never observed
    #[tabled(rename = "Max")]
    pub max: String,
    /// Share of all samples that landed in this hop's bucket
    #[tabled(rename = "Share")]
    pub share: String,
}

impl HopBucketRow {
    /// Creates a summary row for one hop's bucket with formatted share
    pub fn new(hop: u32, values: &[u32], total: usize) -> Self {
        let share = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", (values.len() as f64 / total as f64) * 100.0)
        };

        let (min, median, max) = if values.is_empty() {
            ("-".to_string(), "-".to_string(), "-".to_string())
        } else {
            let mut sorted = values.to_vec();
            sorted.sort_unstable();
            (
                sorted[0].to_string(),
                format!("{:.1}", median_of_sorted(&sorted)),
                sorted[sorted.len() - 1].to_string(),
            )
        };

        Self {
            hop,
            samples: values.len(),
            min,
            median,
            max,
            share,
        }
    }
}

/// Median of an already sorted slice, averaging the middle pair for even lengths
fn median_of_sorted(sorted: &[u32]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
    }
}

/// Formats hop rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - A slice of [`HopBucketRow`] to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_bucket_table(rows: &[HopBucketRow], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available for bucketing".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
