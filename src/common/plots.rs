//! Plotting infrastructure for the attempts-per-hop box plot
//!
//! This module renders the box-and-whisker chart comparing timestamp addition
//! attempts against the hop-count identity line using the [`plotters`] crate.
//! Charts are saved as SVG so they can be embedded in typeset documents.

use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Figure dimensions in pixels
const PLOT_SIZE: (u32, u32) = (800, 600);

/// Creates the attempts-per-hop box plot and saves it as an SVG file
///
/// Each position in `buckets` corresponds to one hop count (position `i`
/// holds hop `i + 1`); empty positions keep their slot on the x-axis but get
/// no box. Blue cross markers at `(x, x)` trace the identity line "number of
/// attempts equals number of hops". Axis labels use a serif face, with
/// horizontal grid lines on the major y ticks only.
///
/// # Arguments
/// * `buckets` - Dense per-hop attempt buckets for hops `1..=buckets.len()`
/// * `output_path` - Path where the SVG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If an error occurred during chart generation
pub fn create_attempts_box_plot(buckets: &[Vec<u32>], output_path: &Path) -> Result<()> {
    if buckets.is_empty() {
        return Err(PlotError::InvalidData(
            "Bucket list cannot be empty".to_string(),
        ));
    }

    let max_hop = buckets.len() as u32;
    let max_attempts = buckets
        .iter()
        .flat_map(|bucket| bucket.iter())
        .copied()
        .max()
        .unwrap_or(0);

    // Leave headroom above whichever is taller, the data or the identity line
    let y_max = max_attempts.max(max_hop) as f32 * 1.05;

    let root = SVGBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(0..max_hop as i32 + 1, 0f32..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    // Horizontal grid lines on the major y ticks only
    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&TRANSPARENT)
        .x_desc("Number of TTL hops")
        .y_desc("Timestamp addition attempts")
        .axis_desc_style(("serif", 16))
        .label_style(("serif", 12))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // One box per observed hop; unobserved hops keep an empty slot
    chart
        .draw_series(
            buckets
                .iter()
                .enumerate()
                .filter(|(_, bucket)| !bucket.is_empty())
                .map(|(index, bucket)| {
                    Boxplot::new_vertical(index as i32 + 1, &Quartiles::new(bucket)).width(20)
                }),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Identity reference: attempts == hops
    chart
        .draw_series((1..=max_hop as i32).map(|hop| Cross::new((hop, hop as f32), 4, BLUE.filled())))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Ensure everything is properly rendered and saved
    root.present()
        .map_err(|e| PlotError::FileSave(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_attempts_box_plot_validation() {
        let output_path = std::env::temp_dir().join("test_attempts_plot_invalid.svg");

        let result = create_attempts_box_plot(&[], &output_path);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_create_attempts_box_plot_writes_svg() {
        let output_path = std::env::temp_dir().join("test_attempts_plot.svg");
        let _ = fs::remove_file(&output_path);

        let buckets = vec![vec![4, 6, 7, 9], vec![], vec![5, 5, 8]];
        create_attempts_box_plot(&buckets, &output_path).unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("Number of TTL hops"));
        assert!(contents.contains("Timestamp addition attempts"));

        let _ = fs::remove_file(&output_path);
    }

    #[test]
    fn test_single_hop_plot() {
        let output_path = std::env::temp_dir().join("test_attempts_plot_single.svg");
        let _ = fs::remove_file(&output_path);

        let buckets = vec![vec![4]];
        create_attempts_box_plot(&buckets, &output_path).unwrap();
        assert!(output_path.exists());

        let _ = fs::remove_file(&output_path);
    }
}
