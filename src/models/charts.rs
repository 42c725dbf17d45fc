//! Per-chart view models served as JSON.
//!
//! These are the shapes the chart renderers consume; the transforms in
//! `services` produce them from the raw dataset sections.

use serde::{Deserialize, Serialize};

use super::dataset::StatBlock;

/// One series of a bar chart, dense over the chart's periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: String,
    pub values: Vec<f64>,
}

/// Stacked or grouped bar chart: `periods` labels one axis, each series
/// holds one value per period (missing combinations are 0).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BarChart {
    pub periods: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub axis_max: f64,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.series.is_empty()
    }

    /// Largest stacked total across periods.
    pub fn stacked_total_max(&self) -> f64 {
        (0..self.periods.len())
            .map(|i| {
                self.series
                    .iter()
                    .map(|s| s.values.get(i).copied().unwrap_or(0.0))
                    .sum::<f64>()
            })
            .fold(0.0, f64::max)
    }

    /// Largest single cell across the dense matrix.
    pub fn cell_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Cumulative range of one stacked segment: the sum of all series
    /// preceding it in stack order, and that start plus its own value.
    /// Lets a tooltip show "from X to Y" instead of just the magnitude.
    pub fn segment_range(&self, period_idx: usize, series_name: &str) -> Option<(f64, f64)> {
        if period_idx >= self.periods.len() {
            return None;
        }
        let target = self.series.iter().position(|s| s.name == series_name)?;
        let start: f64 = self.series[..target]
            .iter()
            .map(|s| s.values.get(period_idx).copied().unwrap_or(0.0))
            .sum();
        let own = self.series[target].values.get(period_idx).copied().unwrap_or(0.0);
        Some((start, start + own))
    }
}

/// One slice of a market-share donut.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DonutChart {
    pub slices: Vec<DonutSlice>,
    pub total: f64,
}

/// One month of one trend series: the raw metric trio the renderer (or a
/// number-tween layer above it) needs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub value: f64,
    pub volume: f64,
    pub asp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<TrendPoint>,
}

/// Multi-series monthly trend, dense over `months` (`YYYY-MM` keys with
/// matching human-readable `labels`, e.g. "May-23").
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TrendChart {
    pub months: Vec<String>,
    pub labels: Vec<String>,
    pub series: Vec<TrendSeries>,
}

/// Market-share-over-time: per-month percentage of the monthly total for
/// the top entities.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ShareTrendChart {
    pub months: Vec<String>,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Display strings for the KPI header cards.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct KpiDisplay {
    pub sales_value: String,
    pub volume: String,
    pub asp: String,
    pub yoy_growth: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sales_value: f64,
    pub total_volume: f64,
    pub asp: f64,
    /// Year-over-year growth in percent, 0 when fewer than two years are
    /// present or the previous year's total is 0.
    pub yoy_growth: f64,
    pub sales: StatBlock,
    pub volume: StatBlock,
    pub display: KpiDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationCell {
    pub row: String,
    pub col: String,
    pub value: f64,
    pub display: String,
    pub color: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CorrelationChart {
    pub kpis: Vec<String>,
    pub cells: Vec<CorrelationCell>,
}
