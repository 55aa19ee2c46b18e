//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reshape::DisplayMode;

// ============================================
// SERIES DTOs
// ============================================

/// Series request: which countries, which display mode, which shape
#[derive(Debug, Deserialize)]
pub struct SeriesRequest {
    /// Countries to plot. Defaults to the dashboard's initial selection.
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,

    /// Display mode: cumulative or daily
    #[serde(default)]
    pub mode: DisplayMode,

    /// Output shape: "json" (rows) or "chart" (labels + datasets)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_countries() -> Vec<String> {
    vec!["US".to_string()]
}

fn default_format() -> String {
    "json".to_string()
}

impl Default for SeriesRequest {
    fn default() -> Self {
        Self {
            countries: default_countries(),
            mode: DisplayMode::default(),
            format: default_format(),
        }
    }
}

/// Series response (JSON format)
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    /// One row per (country, date), sorted by (country, date)
    pub rows: Vec<SeriesRow>,
    /// Response metadata
    pub meta: SeriesMeta,
}

/// Single aggregated row
#[derive(Debug, Serialize)]
pub struct SeriesRow {
    pub country: String,
    pub date: NaiveDate,
    pub cases: i64,
}

/// Series metadata
#[derive(Debug, Serialize)]
pub struct SeriesMeta {
    /// Display mode the rows were computed under
    pub mode: DisplayMode,
    /// Number of rows returned
    pub row_count: usize,
    /// Aggregation time in milliseconds
    pub execution_time_ms: u64,
}

// ============================================
// CHART DTOs
// ============================================

/// Chart-ready response for the external renderer
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Chart title, e.g. "Cumulative COVID-19 Cases"
    pub title: String,
    /// Legend title
    pub legend_title: String,
    /// X-axis labels (ISO dates), shared by all datasets
    pub labels: Vec<String>,
    /// One dataset per selected country
    pub datasets: Vec<ChartDataset>,
}

/// One line on the chart
#[derive(Debug, Serialize)]
pub struct ChartDataset {
    /// Country name
    pub label: String,
    /// Values aligned with `labels`; `null` where the country has no
    /// observation on that date
    pub data: Vec<Option<i64>>,
    /// Line color (hex)
    pub color: String,
}

// ============================================
// COUNTRIES DTOs
// ============================================

/// Country list for the selection widget
#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    /// All countries present in the dataset, sorted ascending
    pub countries: Vec<String>,
    /// Selection the widget should start with
    pub default_selection: Vec<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Dataset slot: "loaded" or "pending"
    pub dataset: String,
    /// Long-table record count, 0 while pending
    pub records: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_request_defaults() {
        let req: SeriesRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.countries, vec!["US".to_string()]);
        assert_eq!(req.mode, DisplayMode::Cumulative);
        assert_eq!(req.format, "json");
    }

    #[test]
    fn test_series_request_full() {
        let req: SeriesRequest = serde_json::from_str(
            r#"{"countries": ["France", "Italy"], "mode": "daily", "format": "chart"}"#,
        )
        .unwrap();
        assert_eq!(req.countries.len(), 2);
        assert_eq!(req.mode, DisplayMode::Daily);
        assert_eq!(req.format, "chart");
    }

    #[test]
    fn test_chart_dataset_null_gaps() {
        let dataset = ChartDataset {
            label: "US".to_string(),
            data: vec![Some(1), None, Some(3)],
            color: "#4CAF50".to_string(),
        };
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.contains("[1,null,3]"));
    }
}
