//! Memoized dataset
//!
//! Single-slot cache for the fetched-and-reshaped long table. The slot is
//! owned by the application state, populated lazily on the first request
//! that needs data, and read-only afterwards. There is no invalidation;
//! a restart is the only refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use crate::reshape::{reshape_to_long, LongRecord};
use crate::source::{parse_wide_csv, CsvSource, SourceResult};

/// The process-wide dataset: long-format records plus derived metadata
#[derive(Debug)]
pub struct Dataset {
    /// Long-format rows, sorted by (date, country)
    pub records: Vec<LongRecord>,
    /// Unique country names, sorted ascending (feeds the selection widget)
    pub countries: Vec<String>,
    /// When the source was fetched
    pub fetched_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a dataset from a raw wide-format CSV body
    pub fn from_csv(data: &str) -> SourceResult<Self> {
        let table = parse_wide_csv(data)?;
        let records = reshape_to_long(&table);

        let mut countries: Vec<String> = records.iter().map(|r| r.country.clone()).collect();
        countries.sort();
        countries.dedup();

        Ok(Self {
            records,
            countries,
            fetched_at: Utc::now(),
        })
    }
}

/// Lazily populated single-slot dataset cache.
///
/// The first caller of [`get`](Self::get) pays the fetch; concurrent first
/// callers coalesce onto the same in-flight initialization. A failed fetch
/// leaves the slot empty, so the next interaction retries.
pub struct DatasetCache {
    source: CsvSource,
    slot: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    /// Create an empty cache backed by the given source
    pub fn new(source: CsvSource) -> Self {
        Self {
            source,
            slot: OnceCell::new(),
        }
    }

    /// Create a cache already holding a dataset. Used by tests and by the
    /// `fetch` CLI path, which never goes through the lazy slot.
    pub fn preloaded(source: CsvSource, dataset: Dataset) -> Self {
        Self {
            source,
            slot: OnceCell::new_with(Some(Arc::new(dataset))),
        }
    }

    /// Get the dataset, fetching and reshaping it on first access
    pub async fn get(&self) -> SourceResult<Arc<Dataset>> {
        let dataset = self
            .slot
            .get_or_try_init(|| async {
                let body = self.source.fetch().await?;
                let dataset = Dataset::from_csv(&body)?;
                tracing::info!(
                    records = dataset.records.len(),
                    countries = dataset.countries.len(),
                    "Dataset loaded"
                );
                Ok::<_, crate::source::SourceError>(Arc::new(dataset))
            })
            .await?;

        Ok(Arc::clone(dataset))
    }

    /// Whether the slot has been populated
    pub fn is_loaded(&self) -> bool {
        self.slot.initialized()
    }

    /// The dataset, if already loaded. Never triggers a fetch.
    pub fn loaded(&self) -> Option<Arc<Dataset>> {
        self.slot.get().map(Arc::clone)
    }
}
