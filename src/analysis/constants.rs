//! Domain constants for the attempt analysis

/// Entry capacity of the probe's IP timestamp option
///
/// The option ships with four timestamp slots and the overflow counter
/// reported by the responder only counts attempts beyond those, so every raw
/// overflow value is offset by this constant to recover the actual attempt
/// count.
pub const TIMESTAMP_SLOTS: u32 = 4;

/// Fixed file name for the rendered box plot, relative to the working directory
pub const PLOT_FILE_NAME: &str = "ttl-ovf.svg";

/// Fixed file name for the plain-text summary, relative to the working directory
pub const SUMMARY_FILE_NAME: &str = "ttl-ovf.txt";
