//! # Epidash
//!
//! COVID-19 case dashboard backend. Fetches the Johns Hopkins CSSE
//! confirmed-cases time series (a wide-format CSV), reshapes it into a
//! normalized long table, and serves per-country case series — cumulative
//! or daily new cases — ready for an external chart renderer.
//!
//! ## How it fits together
//!
//! - **Fetch once**: the source CSV is downloaded at most once per process
//!   and held in a single-slot cache
//! - **Reshape once**: the wide table is unpivoted into long-format rows
//!   at load time
//! - **Aggregate per interaction**: every request recomputes the selected
//!   countries' series from the cached long table with a pure function
//!
//! ## Modules
//!
//! - [`source`]: HTTP fetch and wide-CSV parsing
//! - [`reshape`]: the wide-to-long unpivot and per-country aggregation
//! - [`dataset`]: the memoized dataset and its cache
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use epidash::dataset::{Dataset, DatasetCache};
//! use epidash::reshape::{aggregate, DisplayMode};
//! use epidash::source::{CsvSource, SourceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = CsvSource::new(SourceConfig::default())?;
//!     let cache = DatasetCache::new(source);
//!
//!     // First access fetches and reshapes; later accesses are free
//!     let dataset = cache.get().await?;
//!
//!     let selection = vec!["US".to_string()];
//!     let series = aggregate(&dataset.records, &selection, DisplayMode::Daily)?;
//!
//!     println!("{} daily data points for US", series.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod reshape;
pub mod source;

// Re-export top-level types for convenience
pub use reshape::{aggregate, reshape_to_long, CasePoint, DisplayMode, LongRecord, ReshapeError};

pub use source::{parse_wide_csv, CsvSource, SourceConfig, SourceError, WideRow, WideTable};

pub use dataset::{Dataset, DatasetCache};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
