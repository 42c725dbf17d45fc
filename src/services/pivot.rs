//! Dense pivoting of flat dimensional rows into bar-chart view models.

use std::collections::HashMap;

use crate::models::charts::{BarChart, ChartSeries};
use crate::models::dataset::DimensionalRow;
use crate::models::{Dimension, Metric};
use crate::palette::{brand_color, year_color};
use crate::services::axis::nice_axis_max;
use crate::sort_utils::sort_brands;

fn distinct_years(row_sets: &[&[DimensionalRow]]) -> Vec<i32> {
    let mut years: Vec<i32> = Vec::new();
    for rows in row_sets {
        for row in *rows {
            if !years.contains(&row.year) {
                years.push(row.year);
            }
        }
    }
    years.sort_unstable();
    years
}

fn distinct_labels(row_sets: &[&[DimensionalRow]], dimension: Dimension) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for rows in row_sets {
        for row in *rows {
            if let Some(label) = row.label_of(dimension) {
                if !labels.iter().any(|l| l.as_str() == label) {
                    labels.push(label.to_string());
                }
            }
        }
    }
    if dimension == Dimension::Brand {
        sort_brands(&mut labels);
    } else {
        labels.sort();
    }
    labels
}

/// Cell lookup keyed by (year, label). First match wins, mirroring a
/// find-by-equality over rows where each (label, period) pair is unique.
fn cell_map<'a>(
    rows: &'a [DimensionalRow],
    dimension: Dimension,
    field: fn(&DimensionalRow) -> f64,
) -> HashMap<(i32, &'a str), f64> {
    let mut map = HashMap::new();
    for row in rows {
        if let Some(label) = row.label_of(dimension) {
            map.entry((row.year, label)).or_insert_with(|| field(row));
        }
    }
    map
}

/// Pivot flat rows into a stacked chart: one period per distinct year
/// (ascending), one series per distinct label, every cell populated and
/// defaulting to 0. ASP cells divide the matching sales and volume cells,
/// 0 when the volume is 0.
pub fn stacked_by_period(
    sales: &[DimensionalRow],
    volume: &[DimensionalRow],
    dimension: Dimension,
    metric: Metric,
) -> BarChart {
    let driving: Vec<&[DimensionalRow]> = match metric {
        Metric::SalesValue => vec![sales],
        Metric::Volume => vec![volume],
        Metric::Asp => vec![sales, volume],
    };
    let years = distinct_years(&driving);
    let labels = distinct_labels(&driving, dimension);

    let sales_cells = cell_map(sales, dimension, |r| r.sales_value);
    let volume_cells = cell_map(volume, dimension, |r| r.volume);

    let series: Vec<ChartSeries> = labels
        .iter()
        .map(|label| ChartSeries {
            name: label.clone(),
            color: brand_color(label).to_string(),
            values: years
                .iter()
                .map(|&year| {
                    let s = sales_cells.get(&(year, label.as_str())).copied().unwrap_or(0.0);
                    let v = volume_cells.get(&(year, label.as_str())).copied().unwrap_or(0.0);
                    metric.derive(s, v)
                })
                .collect(),
        })
        .collect();

    let mut chart = BarChart {
        periods: years.iter().map(|y| y.to_string()).collect(),
        series,
        axis_max: 0.0,
    };
    chart.axis_max = nice_axis_max(chart.stacked_total_max(), metric);
    chart
}

/// Pivot flat rows into a grouped chart: categories on the axis, one
/// series per year, cells defaulting to 0.
pub fn grouped_by_category(rows: &[DimensionalRow], dimension: Dimension) -> BarChart {
    let years = distinct_years(&[rows]);
    let labels = distinct_labels(&[rows], dimension);
    let cells = cell_map(rows, dimension, |r| r.sales_value);

    let series: Vec<ChartSeries> = years
        .iter()
        .enumerate()
        .map(|(index, &year)| ChartSeries {
            name: year.to_string(),
            color: year_color(year, index).to_string(),
            values: labels
                .iter()
                .map(|label| cells.get(&(year, label.as_str())).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    let mut chart = BarChart {
        periods: labels,
        series,
        axis_max: 0.0,
    };
    chart.axis_max = nice_axis_max(chart.cell_max(), Metric::SalesValue);
    chart
}
