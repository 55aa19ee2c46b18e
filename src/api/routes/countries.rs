//! Countries Route
//!
//! Feeds the external country multi-select widget.
//!
//! - GET /api/v1/countries - All countries in the dataset

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::CountriesResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/countries
///
/// Returns the sorted unique country list plus the default selection.
/// Triggers the dataset fetch if the cache slot is still empty.
pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CountriesResponse>> {
    let dataset = state.cache.get().await?;

    Ok(Json(CountriesResponse {
        countries: dataset.countries.clone(),
        default_selection: vec!["US".to_string()],
    }))
}
