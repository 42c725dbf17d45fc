use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::charts::{
    BarChart, CorrelationChart, DonutChart, KpiSummary, ShareTrendChart, TrendChart,
};
use crate::models::{Dimension, Metric, TrendEntity};
use crate::services::{correlation, kpi, market_share, monthly, pivot};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    pub dimension: Option<String>,
    pub metric: Option<String>,
    pub entity: Option<String>,
}

impl ChartParams {
    fn dimension(&self) -> AppResult<Dimension> {
        match &self.dimension {
            None => Ok(Dimension::default()),
            Some(s) => Dimension::from_str(s)
                .ok_or_else(|| AppError::Validation(format!("unknown dimension: {}", s))),
        }
    }

    fn metric(&self) -> AppResult<Metric> {
        match &self.metric {
            None => Ok(Metric::default()),
            Some(s) => Metric::from_str(s)
                .ok_or_else(|| AppError::Validation(format!("unknown metric: {}", s))),
        }
    }

    fn entity(&self) -> AppResult<TrendEntity> {
        match &self.entity {
            None => Ok(TrendEntity::default()),
            Some(s) => TrendEntity::from_str(s)
                .ok_or_else(|| AppError::Validation(format!("unknown entity: {}", s))),
        }
    }
}

/// Stacked bars: periods (years) by category labels for the selected
/// dimension and metric.
pub async fn sales_by_year(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<BarChart>> {
    let dimension = params.dimension()?;
    let metric = params.metric()?;
    let data = state.cache.snapshot();

    let mut chart = pivot::stacked_by_period(
        data.sales_rows(dimension),
        data.volume_rows(dimension),
        dimension,
        metric,
    );
    let key = format!("sales-by-year:{}:{}", dimension.as_str(), metric.as_str());
    chart.axis_max = state.axis.apply(&key, chart.stacked_total_max(), metric);
    Ok(Json(chart))
}

/// Grouped bars: category labels by year series.
pub async fn year_sales(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<BarChart>> {
    let dimension = params.dimension()?;
    let data = state.cache.snapshot();

    let mut chart = pivot::grouped_by_category(data.year_rows(dimension), dimension);
    let key = format!("year-sales:{}", dimension.as_str());
    chart.axis_max = state.axis.apply(&key, chart.cell_max(), Metric::SalesValue);
    Ok(Json(chart))
}

/// Market-share donut for the selected dimension and metric.
pub async fn market_share(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<DonutChart>> {
    let dimension = params.dimension()?;
    let metric = params.metric()?;
    let data = state.cache.snapshot();
    Ok(Json(market_share::market_share(
        data.share_rows(dimension),
        dimension,
        metric,
    )))
}

/// Multi-series monthly trend (value, volume and ASP per point).
pub async fn monthly_trend(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<TrendChart>> {
    let entity = params.entity()?;
    let data = state.cache.snapshot();
    Ok(Json(monthly::monthly_trend(data.trend_rows(entity), entity)))
}

/// Market share over time: per-month percentage of the monthly total.
pub async fn monthly_share(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<ShareTrendChart>> {
    let entity = params.entity()?;
    if entity == TrendEntity::Total {
        return Err(AppError::Validation(
            "monthly share requires entity=brand or entity=channel".into(),
        ));
    }
    let metric = params.metric()?;
    if metric == Metric::Asp {
        return Err(AppError::Validation(
            "monthly share supports metric=sales or metric=volume".into(),
        ));
    }
    let data = state.cache.snapshot();
    Ok(Json(monthly::monthly_share(
        data.trend_rows(entity),
        entity,
        metric,
    )))
}

/// KPI header summary.
pub async fn kpi_summary(State(state): State<AppState>) -> Json<KpiSummary> {
    let data = state.cache.snapshot();
    Json(kpi::kpi_summary(&data))
}

/// Correlation heatmap over the backend-provided matrix.
pub async fn correlation(State(state): State<AppState>) -> Json<CorrelationChart> {
    let data = state.cache.snapshot();
    Json(correlation::correlation_matrix(&data.kpi_correlation))
}
