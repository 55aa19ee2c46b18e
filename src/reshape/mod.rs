//! Time-Series Reshaper
//!
//! The core data pipeline: unpivots the wide source table into long-format
//! rows, then aggregates those rows into one per-country series under a
//! chosen display mode.
//!
//! Both operations are pure. The long table is derived once per fetch and
//! cached (see [`crate::dataset`]); aggregation is recomputed from it on
//! every interaction with no shared mutable state.

mod aggregate;
mod pivot;
mod types;

pub use aggregate::aggregate;
pub use pivot::reshape_to_long;
pub use types::{CasePoint, DisplayMode, LongRecord};

use thiserror::Error;

/// Errors from the aggregation step
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// The user selected zero countries. Recoverable: surfaced as a
    /// warning, the session stays usable.
    #[error("Please select at least one country.")]
    EmptySelection,
}
