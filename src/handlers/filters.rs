use axum::extract::State;
use axum::response::Json;

use crate::error::AppResult;
use crate::models::{FilterOptions, FilterSelection};
use crate::state::AppState;

/// Distinct filter values, proxied from the upstream API.
pub async fn options(State(state): State<AppState>) -> AppResult<Json<FilterOptions>> {
    let options = state.api.filter_options().await?;
    Ok(Json(options))
}

/// The currently active filter selection.
pub async fn selection(State(state): State<AppState>) -> Json<FilterSelection> {
    Json(state.selection())
}

/// Replace the active selection and schedule a debounced dataset refresh.
/// Rapid successive updates settle into a single upstream fetch; charts
/// keep serving the preserved snapshot until fresh data lands.
pub async fn update_selection(
    State(state): State<AppState>,
    Json(selection): Json<FilterSelection>,
) -> Json<FilterSelection> {
    state.set_selection(selection.clone());
    state.schedule_refresh();
    Json(selection)
}
