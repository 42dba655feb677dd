//! Attempt aggregation and reporting
//!
//! This module buckets timestamp addition attempts by hop count, rebuilds the
//! dense 1..=max hop range, and generates the debug dump, the plain-text
//! summary, and the box plot.

use super::constants::{PLOT_FILE_NAME, SUMMARY_FILE_NAME, TIMESTAMP_SLOTS};
use crate::common::buckets::{format_bucket_table, HopBucketRow};
use crate::common::plots::create_attempts_box_plot;
use crate::common::{PlotError, ProbeRecord};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur during attempt analysis
#[derive(Debug)]
pub enum AttemptsError {
    NoRecords,
    FileWrite(std::io::Error),
    PlotGeneration(PlotError),
}

impl std::fmt::Display for AttemptsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptsError::NoRecords => {
                write!(f, "No records were parsed from the input files")
            }
            AttemptsError::FileWrite(e) => write!(f, "Failed to write file: {}", e),
            AttemptsError::PlotGeneration(e) => write!(f, "Failed to generate plot: {}", e),
        }
    }
}

impl std::error::Error for AttemptsError {}

impl From<std::io::Error> for AttemptsError {
    fn from(err: std::io::Error) -> Self {
        AttemptsError::FileWrite(err)
    }
}

impl From<PlotError> for AttemptsError {
    fn from(err: PlotError) -> Self {
        AttemptsError::PlotGeneration(err)
    }
}

type Result<T> = core::result::Result<T, AttemptsError>;

/// Ordered attempt counts bucketed by hop count
///
/// Buckets are created lazily on the first record for a hop, never removed,
/// and preserve encounter order within each bucket.
#[derive(Debug)]
pub struct AttemptAggregate {
    buckets: BTreeMap<u32, Vec<u32>>,
}

impl AttemptAggregate {
    /// Buckets every record's attempt count under its hop count
    ///
    /// The raw overflow value only counts attempts beyond the timestamp
    /// option's capacity, so each stored value is `overflow + TIMESTAMP_SLOTS`.
    pub fn from_records(records: &[ProbeRecord]) -> Self {
        let mut buckets: BTreeMap<u32, Vec<u32>> = BTreeMap::new();

        for record in records {
            buckets
                .entry(record.ttl_delta)
                .or_default()
                .push(record.overflow + TIMESTAMP_SLOTS);
        }

        Self { buckets }
    }

    /// Rebuilds the dense hop range `1..=max(hop)`
    ///
    /// Position `i` of the result holds the bucket for hop `i + 1`, or an
    /// empty bucket for hops that were never observed, so every hop in range
    /// keeps its slot in the plot.
    ///
    /// # Returns
    /// * `Ok(Vec<Vec<u32>>)` - Dense per-hop buckets
    /// * `Err(AttemptsError::NoRecords)` - If no records were ever aggregated
    pub fn dense_buckets(&self) -> Result<Vec<Vec<u32>>> {
        let max_hop = *self
            .buckets
            .keys()
            .next_back()
            .ok_or(AttemptsError::NoRecords)?;

        Ok((1..=max_hop)
            .map(|hop| self.buckets.get(&hop).cloned().unwrap_or_default())
            .collect())
    }
}

/// Writes one debug line per hop in the dense range
///
/// Lines have the form `1 [4, 6]`. Purely observational; the summary and the
/// plot do not depend on this output.
pub fn write_bucket_dump<W: io::Write>(out: &mut W, buckets: &[Vec<u32>]) -> io::Result<()> {
    for (index, bucket) in buckets.iter().enumerate() {
        writeln!(out, "{} {:?}", index + 1, bucket)?;
    }
    Ok(())
}

/// Generate the plain-text attempt summary
///
/// Writes one table row per hop in the dense range, followed by a summary
/// section, to `ttl-ovf.txt` in `output_dir`.
///
/// # Arguments
/// * `buckets` - Dense per-hop attempt buckets for hops `1..=buckets.len()`
/// * `output_dir` - Directory where the summary file should be saved
///
/// # Returns
/// * `Ok(())` - If summary generation was successful
/// * `Err(AttemptsError)` - If file operations failed
pub fn generate_attempt_summary(buckets: &[Vec<u32>], output_dir: &Path) -> Result<()> {
    let total_samples: usize = buckets.iter().map(Vec::len).sum();

    let rows: Vec<HopBucketRow> = buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| HopBucketRow::new(index as u32 + 1, bucket, total_samples))
        .collect();
    let table = format_bucket_table(&rows, Some("Timestamp Addition Attempts per TTL Hop"));

    let summary = format!(
        "Summary\n{}\nTotal samples: {}\nHop range: 1-{}",
        "=".repeat(7),
        total_samples,
        buckets.len()
    );

    let output_file = output_dir.join(SUMMARY_FILE_NAME);
    let output = format!(
        "Attempt Analysis\n{}\n\n{}\n\n{}",
        "=".repeat(16),
        table,
        summary
    );

    fs::write(&output_file, output)?;

    Ok(())
}

/// Generate the attempts-per-hop box plot
///
/// Renders the box plot with its identity reference overlay and saves it to
/// `ttl-ovf.svg` in `output_dir`.
///
/// # Arguments
/// * `buckets` - Dense per-hop attempt buckets for hops `1..=buckets.len()`
/// * `output_dir` - Directory where the SVG file should be saved
///
/// # Returns
/// * `Ok(())` - If the plot was successfully generated
/// * `Err(AttemptsError)` - If plot generation failed
pub fn generate_attempt_plots(buckets: &[Vec<u32>], output_dir: &Path) -> Result<()> {
    create_attempts_box_plot(buckets, &output_dir.join(PLOT_FILE_NAME))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ttl_delta: u32, overflow: u32) -> ProbeRecord {
        ProbeRecord {
            ttl_delta,
            overflow,
        }
    }

    #[test]
    fn test_aggregate_offsets_and_groups() {
        // Input lines "1 0", "2 1", "1 2"
        let aggregate =
            AttemptAggregate::from_records(&[record(1, 0), record(2, 1), record(1, 2)]);
        let buckets = aggregate.dense_buckets().unwrap();
        assert_eq!(buckets, vec![vec![4, 6], vec![5]]);
    }

    #[test]
    fn test_dense_buckets_fill_unobserved_hops() {
        // Input lines "3 0", "1 0" - hop 2 never observed
        let aggregate = AttemptAggregate::from_records(&[record(3, 0), record(1, 0)]);
        assert_eq!(
            aggregate.dense_buckets().unwrap(),
            vec![vec![4], vec![], vec![4]]
        );
    }

    #[test]
    fn test_bucket_order_matches_encounter_order() {
        let aggregate =
            AttemptAggregate::from_records(&[record(1, 9), record(1, 0), record(1, 3)]);
        assert_eq!(aggregate.dense_buckets().unwrap(), vec![vec![13, 4, 7]]);
    }

    #[test]
    fn test_dense_buckets_require_records() {
        let aggregate = AttemptAggregate::from_records(&[]);
        assert!(matches!(
            aggregate.dense_buckets(),
            Err(AttemptsError::NoRecords)
        ));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = [record(2, 0), record(1, 1), record(2, 3)];
        let first = AttemptAggregate::from_records(&records)
            .dense_buckets()
            .unwrap();
        let second = AttemptAggregate::from_records(&records)
            .dense_buckets()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bucket_dump_format() {
        let buckets = vec![vec![4, 6], vec![5]];
        let mut out = Vec::new();
        write_bucket_dump(&mut out, &buckets).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 [4, 6]\n2 [5]\n");
    }

    #[test]
    fn test_bucket_dump_prints_empty_hops() {
        let buckets = vec![vec![4], vec![], vec![4]];
        let mut out = Vec::new();
        write_bucket_dump(&mut out, &buckets).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 [4]\n2 []\n3 [4]\n");
    }

    #[test]
    fn test_generate_attempt_summary_writes_table() {
        let output_dir = std::env::temp_dir().join("attempt_summary_test");
        fs::create_dir_all(&output_dir).unwrap();

        let buckets = vec![vec![4, 6], vec![]];
        generate_attempt_summary(&buckets, &output_dir).unwrap();

        let contents = fs::read_to_string(output_dir.join(SUMMARY_FILE_NAME)).unwrap();
        assert!(contents.contains("Timestamp Addition Attempts per TTL Hop"));
        assert!(contents.contains("Total samples: 2"));
        assert!(contents.contains("Hop range: 1-2"));

        let _ = fs::remove_dir_all(&output_dir);
    }

    #[test]
    fn test_generate_attempt_plots_writes_figure() {
        let output_dir = std::env::temp_dir().join("attempt_plots_test");
        fs::create_dir_all(&output_dir).unwrap();

        let buckets = vec![vec![4, 6, 8], vec![5]];
        generate_attempt_plots(&buckets, &output_dir).unwrap();
        assert!(output_dir.join(PLOT_FILE_NAME).exists());

        let _ = fs::remove_dir_all(&output_dir);
    }
}
