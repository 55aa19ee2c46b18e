//! Source data layer
//!
//! Fetches the wide-format confirmed-cases CSV over HTTP and parses it
//! into a typed [`WideTable`]. The fetch happens at most once per process
//! (see [`crate::dataset::DatasetCache`]); everything downstream works on
//! the parsed table.

mod fetch;
mod parse;

pub use fetch::{CsvSource, SourceConfig};
pub use parse::{parse_wide_csv, WideRow, WideTable};

use thiserror::Error;

/// Errors from fetching or parsing the source CSV
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source responded with a non-success status
    #[error("Source fetch failed with HTTP status {status}")]
    Fetch { status: u16 },

    /// Network-level failure (connect, timeout, TLS)
    #[error("Source request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A date header or cell value could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required identifier column is missing from the header
    #[error("Schema error: missing column {0:?}")]
    Schema(String),

    /// CSV-level read failure (malformed quoting, uneven records)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;
