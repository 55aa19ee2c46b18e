//! Series Route
//!
//! Endpoint for the aggregated per-country case series.
//!
//! - POST /api/v1/series - Aggregate and return rows or a chart payload

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crate::api::dto::{
    ChartDataset, ChartResponse, SeriesMeta, SeriesRequest, SeriesResponse, SeriesRow,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::reshape::{aggregate, CasePoint, DisplayMode};

/// Line color palette, cycled across selected countries
const COLORS: [&str; 5] = ["#4CAF50", "#2196F3", "#FF9800", "#9C27B0", "#F44336"];

/// POST /api/v1/series
///
/// Aggregate the cached long table for the selected countries and mode.
/// An empty selection is rejected with `EMPTY_SELECTION` before any data
/// is touched, mirroring the dashboard's blocking warning.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeriesRequest>,
) -> ApiResult<Response> {
    let dataset = state.cache.get().await?;

    let started = Instant::now();
    let points = aggregate(&dataset.records, &req.countries, req.mode)?;
    let execution_time_ms = started.elapsed().as_millis() as u64;

    tracing::debug!(
        countries = req.countries.len(),
        mode = %req.mode,
        rows = points.len(),
        execution_time_ms,
        "Series aggregated"
    );

    match req.format.to_lowercase().as_str() {
        "json" => Ok(format_json_response(points, req.mode, execution_time_ms)),
        "chart" => Ok(format_chart_response(&points, req.mode)),
        other => Err(ApiError::Validation(format!(
            "Invalid format: {}. Use json or chart",
            other
        ))),
    }
}

/// Format response as plain rows
fn format_json_response(points: Vec<CasePoint>, mode: DisplayMode, execution_time_ms: u64) -> Response {
    let rows: Vec<SeriesRow> = points
        .into_iter()
        .map(|p| SeriesRow {
            country: p.country,
            date: p.date,
            cases: p.cases,
        })
        .collect();

    let response = SeriesResponse {
        meta: SeriesMeta {
            mode,
            row_count: rows.len(),
            execution_time_ms,
        },
        rows,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Format response for the external chart renderer: one label axis shared
/// by all countries, one dataset per country
fn format_chart_response(points: &[CasePoint], mode: DisplayMode) -> Response {
    // Union of dates across the selection, ascending
    let dates: BTreeSet<_> = points.iter().map(|p| p.date).collect();
    let labels: Vec<String> = dates.iter().map(|d| d.to_string()).collect();

    // Countries in output order (points are sorted by country already)
    let mut countries: Vec<&str> = points.iter().map(|p| p.country.as_str()).collect();
    countries.dedup();

    let datasets: Vec<ChartDataset> = countries
        .iter()
        .enumerate()
        .map(|(i, country)| {
            let data: Vec<Option<i64>> = dates
                .iter()
                .map(|date| {
                    points
                        .iter()
                        .find(|p| p.country == *country && p.date == *date)
                        .map(|p| p.cases)
                })
                .collect();

            ChartDataset {
                label: country.to_string(),
                data,
                color: COLORS[i % COLORS.len()].to_string(),
            }
        })
        .collect();

    let response = ChartResponse {
        title: format!("{} COVID-19 Cases", mode.label()),
        legend_title: "Country".to_string(),
        labels,
        datasets,
    };

    (StatusCode::OK, Json(response)).into_response()
}
