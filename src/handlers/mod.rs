pub mod charts;
pub mod filters;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Filter options and the active selection
        .route("/api/filters", get(filters::options))
        .route("/api/selection", get(filters::selection))
        .route("/api/selection", post(filters::update_selection))
        // Chart view models (JSON)
        .route("/api/charts/sales-by-year", get(charts::sales_by_year))
        .route("/api/charts/year-sales", get(charts::year_sales))
        .route("/api/charts/market-share", get(charts::market_share))
        .route("/api/charts/monthly-trend", get(charts::monthly_trend))
        .route("/api/charts/monthly-share", get(charts::monthly_share))
        .route("/api/charts/kpi-summary", get(charts::kpi_summary))
        .route("/api/charts/correlation", get(charts::correlation))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
