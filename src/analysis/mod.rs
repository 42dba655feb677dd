//! Domain-specific analysis modules
//!
//! This module contains the attempt aggregation and reporting logic.

pub mod attempts;
pub mod constants;

// Re-export analysis functions for convenience
pub use attempts::{
    generate_attempt_plots, generate_attempt_summary, write_bucket_dump, AttemptAggregate,
};
