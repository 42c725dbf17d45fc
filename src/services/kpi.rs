//! KPI header summary: totals, overall ASP and year-over-year growth.

use std::collections::HashMap;

use crate::format::{format_currency, format_percentage, format_volume};
use crate::models::charts::{KpiDisplay, KpiSummary};
use crate::models::dataset::{Dataset, DimensionalRow, StatBlock};
use crate::models::Metric;

fn stats_from(values: impl Iterator<Item = f64>) -> StatBlock {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    if count == 0 {
        return StatBlock::default();
    }
    StatBlock {
        sum,
        average: sum / count as f64,
        min,
        max,
    }
}

/// Year-over-year growth in percent over the two most recent distinct
/// years; 0 with fewer than two years or a zero previous-year total.
fn yoy_growth(rows: &[DimensionalRow]) -> f64 {
    let mut totals: HashMap<i32, f64> = HashMap::new();
    for row in rows {
        *totals.entry(row.year).or_insert(0.0) += row.sales_value;
    }
    let mut years: Vec<i32> = totals.keys().copied().collect();
    years.sort_unstable();
    if years.len() < 2 {
        return 0.0;
    }
    let current = totals[&years[years.len() - 1]];
    let previous = totals[&years[years.len() - 2]];
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Build the KPI summary. Backend-provided summary statistics take
/// precedence; otherwise they are computed from the flat rows, zero-valued
/// rows included.
pub fn kpi_summary(data: &Dataset) -> KpiSummary {
    let (sales, volume) = match &data.kpi_stats {
        Some(stats) => (stats.value.clone(), stats.volume.clone()),
        None => (
            stats_from(data.sales_by_brand_year.iter().map(|r| r.sales_value)),
            stats_from(data.volume_by_brand_year.iter().map(|r| r.volume)),
        ),
    };

    let total_sales_value = sales.sum;
    let total_volume = volume.sum;
    let asp = Metric::Asp.derive(total_sales_value, total_volume);

    let growth_rows: &[DimensionalRow] = if data.sales_by_year.is_empty() {
        &data.sales_by_brand_year
    } else {
        &data.sales_by_year
    };
    let yoy = yoy_growth(growth_rows);

    KpiSummary {
        total_sales_value,
        total_volume,
        asp,
        yoy_growth: yoy,
        display: KpiDisplay {
            sales_value: format_currency(total_sales_value),
            volume: format_volume(total_volume),
            asp: format!("€{:.2}", asp),
            yoy_growth: format_percentage(yoy),
        },
        sales,
        volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::KpiStats;

    fn row(year: i32, sales_value: f64, volume: f64) -> DimensionalRow {
        DimensionalRow {
            year,
            brand: Some("Brand 1".into()),
            sales_value,
            volume,
            ..Default::default()
        }
    }

    #[test]
    fn test_backend_stats_take_precedence() {
        let mut data = Dataset::default();
        data.sales_by_brand_year = vec![row(2023, 999.0, 0.0)];
        data.kpi_stats = Some(KpiStats {
            value: StatBlock { sum: 100.0, average: 50.0, min: 10.0, max: 90.0 },
            volume: StatBlock { sum: 20.0, average: 10.0, min: 5.0, max: 15.0 },
        });

        let summary = kpi_summary(&data);
        assert_eq!(summary.total_sales_value, 100.0);
        assert_eq!(summary.total_volume, 20.0);
        assert_eq!(summary.asp, 5.0);
    }

    #[test]
    fn test_fallback_stats_include_zero_rows() {
        let mut data = Dataset::default();
        data.sales_by_brand_year = vec![row(2023, 10.0, 0.0), row(2023, 0.0, 0.0)];
        data.volume_by_brand_year = vec![row(2023, 0.0, 4.0), row(2023, 0.0, 0.0)];

        let summary = kpi_summary(&data);
        assert_eq!(summary.sales.sum, 10.0);
        assert_eq!(summary.sales.average, 5.0);
        assert_eq!(summary.sales.min, 0.0);
        assert_eq!(summary.sales.max, 10.0);
        assert_eq!(summary.volume.sum, 4.0);
        assert_eq!(summary.asp, 2.5);
    }

    #[test]
    fn test_growth_uses_two_most_recent_years() {
        let mut data = Dataset::default();
        data.sales_by_year = vec![row(2021, 50.0, 0.0), row(2022, 100.0, 0.0), row(2023, 150.0, 0.0)];

        let summary = kpi_summary(&data);
        assert_eq!(summary.yoy_growth, 50.0);
        assert_eq!(summary.display.yoy_growth, "+50.0%");
    }

    #[test]
    fn test_growth_is_zero_when_previous_year_is_zero() {
        let mut data = Dataset::default();
        data.sales_by_year = vec![row(2022, 0.0, 0.0), row(2023, 150.0, 0.0)];
        assert_eq!(kpi_summary(&data).yoy_growth, 0.0);
    }

    #[test]
    fn test_growth_falls_back_to_brand_rows() {
        let mut data = Dataset::default();
        data.sales_by_brand_year = vec![
            row(2022, 60.0, 0.0),
            row(2022, 40.0, 0.0),
            row(2023, 120.0, 0.0),
        ];
        assert_eq!(kpi_summary(&data).yoy_growth, 20.0);
    }

    #[test]
    fn test_empty_dataset_yields_zeroed_summary() {
        let summary = kpi_summary(&Dataset::default());
        assert_eq!(summary.total_sales_value, 0.0);
        assert_eq!(summary.asp, 0.0);
        assert_eq!(summary.display.sales_value, "€0");
        assert_eq!(summary.display.yoy_growth, "+0.0%");
    }
}
