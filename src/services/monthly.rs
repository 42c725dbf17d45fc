//! Monthly trend transforms: absolute multi-series trends and the
//! percentage-of-monthly-total share variant.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::charts::{ChartSeries, ShareTrendChart, TrendChart, TrendPoint, TrendSeries};
use crate::models::dataset::MonthlyRow;
use crate::models::{Metric, TrendEntity};
use crate::palette::brand_color;
use crate::sort_utils::sort_brands;

/// The share-over-time chart keeps only the strongest entities.
pub const MAX_SHARE_SERIES: usize = 6;

/// Line color for the single overall-total series.
const TOTAL_SERIES_COLOR: &str = "#66BB6A";

/// Human-readable label for a `YYYY-MM` key, e.g. "May-23".
fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|date| date.format("%b-%y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

fn distinct_months(rows: &[MonthlyRow]) -> Vec<String> {
    let mut months: Vec<String> = Vec::new();
    for row in rows {
        if let Some(key) = row.month_key() {
            if !months.contains(&key) {
                months.push(key);
            }
        }
    }
    months.sort();
    months
}

fn distinct_entities(rows: &[MonthlyRow], entity: TrendEntity) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        if let Some(name) = row.entity_of(entity) {
            if !names.iter().any(|n| n.as_str() == name) {
                names.push(name.to_string());
            }
        }
    }
    match entity {
        TrendEntity::Brand => sort_brands(&mut names),
        TrendEntity::Channel => names.sort(),
        TrendEntity::Total => {}
    }
    names
}

/// Dense (month, entity) cell lookup; first match wins.
fn cell_map(rows: &[MonthlyRow], entity: TrendEntity) -> HashMap<(String, String), (f64, f64)> {
    let mut map = HashMap::new();
    for row in rows {
        let (Some(month), Some(name)) = (row.month_key(), row.entity_of(entity)) else {
            continue;
        };
        map.entry((month, name.to_string()))
            .or_insert((row.sales_value, row.volume));
    }
    map
}

fn series_color(entity: TrendEntity, name: &str) -> String {
    match entity {
        TrendEntity::Total => TOTAL_SERIES_COLOR.to_string(),
        _ => brand_color(name).to_string(),
    }
}

/// Build one dense row per calendar month present in the data, with the
/// value/volume/ASP trio per entity per month.
pub fn monthly_trend(rows: &[MonthlyRow], entity: TrendEntity) -> TrendChart {
    let months = distinct_months(rows);
    let entities = distinct_entities(rows, entity);
    let cells = cell_map(rows, entity);

    let series = entities
        .iter()
        .map(|name| TrendSeries {
            name: name.clone(),
            color: series_color(entity, name),
            points: months
                .iter()
                .map(|month| {
                    let (value, volume) = cells
                        .get(&(month.clone(), name.clone()))
                        .copied()
                        .unwrap_or((0.0, 0.0));
                    TrendPoint {
                        value,
                        volume,
                        asp: Metric::Asp.derive(value, volume),
                    }
                })
                .collect(),
        })
        .collect();

    TrendChart {
        labels: months.iter().map(|m| month_label(m)).collect(),
        months,
        series,
    }
}

/// Market share over time: each entity's per-month percentage of that
/// month's total across all entities, limited to the top
/// [`MAX_SHARE_SERIES`] entities by whole-window total, ranked descending.
pub fn monthly_share(rows: &[MonthlyRow], entity: TrendEntity, metric: Metric) -> ShareTrendChart {
    let months = distinct_months(rows);
    let entities = distinct_entities(rows, entity);
    let cells = cell_map(rows, entity);

    let metric_cell = |month: &str, name: &str| -> f64 {
        let (value, volume) = cells
            .get(&(month.to_string(), name.to_string()))
            .copied()
            .unwrap_or((0.0, 0.0));
        metric.derive(value, volume)
    };

    // Monthly totals run over every entity, not just the plotted ones.
    let month_totals: Vec<f64> = months
        .iter()
        .map(|month| entities.iter().map(|name| metric_cell(month, name)).sum())
        .collect();

    let mut ranked: Vec<(String, f64)> = entities
        .iter()
        .map(|name| {
            let total = months.iter().map(|month| metric_cell(month, name)).sum();
            (name.clone(), total)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(MAX_SHARE_SERIES);

    let series = ranked
        .into_iter()
        .map(|(name, _)| ChartSeries {
            color: series_color(entity, &name),
            values: months
                .iter()
                .zip(&month_totals)
                .map(|(month, &total)| {
                    if total == 0.0 {
                        0.0
                    } else {
                        metric_cell(month, &name) / total * 100.0
                    }
                })
                .collect(),
            name,
        })
        .collect();

    ShareTrendChart {
        labels: months.iter().map(|m| month_label(m)).collect(),
        months,
        series,
    }
}
