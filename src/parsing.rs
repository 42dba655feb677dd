//! Input file parsing for TTL/overflow measurement data
//!
//! This module handles reading the measurement files and converting each line
//! into a [`ProbeRecord`].

use crate::common::ProbeRecord;
use indicatif::ProgressBar;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: expected 2 whitespace-separated integers, found {token_count} token(s)", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        token_count: usize,
    },

    #[error("{}:{line}: invalid integer token {token:?}: {source}", .path.display())]
    InvalidInteger {
        path: PathBuf,
        line: usize,
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Parse every supplied measurement file, in argument order
///
/// Each file is read whole, then parsed line by line. The returned records
/// preserve encounter order: file order first, then line order within a file.
/// A single malformed line aborts the whole run.
///
/// # Arguments
/// * `paths` - Paths to the measurement files
///
/// # Returns
/// * `Ok(Vec<ProbeRecord>)` - All parsed records in encounter order
/// * `Err(ParsingError)` - If any file could not be read or any line is malformed
pub fn parse_probe_files(paths: &[PathBuf]) -> Result<Vec<ProbeRecord>> {
    let mut records = Vec::new();

    // Progress is drawn to stderr so stdout stays reserved for the bucket dump
    let progress = ProgressBar::new(paths.len() as u64);
    for path in paths {
        let contents = fs::read_to_string(path).map_err(|source| ParsingError::FileRead {
            path: path.clone(),
            source,
        })?;

        for (index, line) in contents.lines().enumerate() {
            records.push(parse_probe_line(path, index + 1, line)?);
        }

        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(records)
}

/// Parse a single measurement line into a [`ProbeRecord`]
///
/// Tab characters are removed outright (not treated as separators), the line
/// is split on single spaces, and empty tokens are discarded. Exactly two
/// unsigned integer tokens must remain.
fn parse_probe_line(path: &Path, line_number: usize, line: &str) -> Result<ProbeRecord> {
    let cleaned = line.replace('\t', "");
    let tokens: Vec<&str> = cleaned
        .split(' ')
        .filter(|token| !token.is_empty())
        .collect();

    let (ttl_token, ovf_token) = match tokens.as_slice() {
        [ttl, ovf] => (*ttl, *ovf),
        other => {
            return Err(ParsingError::MalformedLine {
                path: path.to_path_buf(),
                line: line_number,
                token_count: other.len(),
            })
        }
    };

    Ok(ProbeRecord {
        ttl_delta: parse_count(path, line_number, ttl_token)?,
        overflow: parse_count(path, line_number, ovf_token)?,
    })
}

/// Convert one token to an unsigned count, attaching file and line context on failure
fn parse_count(path: &Path, line_number: usize, token: &str) -> Result<u32> {
    token
        .parse()
        .map_err(|source| ParsingError::InvalidInteger {
            path: path.to_path_buf(),
            line: line_number,
            token: token.to_string(),
            source,
        })
}
