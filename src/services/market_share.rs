//! Market-share donut transform.

use crate::models::charts::{DonutChart, DonutSlice};
use crate::models::dataset::MarketShareRow;
use crate::models::{Dimension, Metric};
use crate::palette::brand_color;
use crate::sort_utils::brand_order;

/// The combined dimension is capped so the legend stays legible; the tail
/// is folded into a synthetic bucket.
pub const MAX_COMBO_SLICES: usize = 12;
pub const OTHERS_LABEL: &str = "Others";

/// Map share rows to donut slices for the selected metric. Brand slices
/// follow brand order; other dimensions rank by descending value. The
/// combo dimension keeps the top twelve by value and sums the rest into
/// an "Others" slice.
pub fn market_share(rows: &[MarketShareRow], dimension: Dimension, metric: Metric) -> DonutChart {
    let mut entries: Vec<(String, f64)> = rows
        .iter()
        .filter_map(|row| {
            let label = row.label_of(dimension)?.to_string();
            Some((label, metric.derive(row.sales_value, row.volume)))
        })
        .collect();

    if dimension == Dimension::Brand {
        entries.sort_by(|a, b| brand_order(&a.0, &b.0));
    } else {
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    }

    if dimension == Dimension::Combo && entries.len() > MAX_COMBO_SLICES {
        let tail: f64 = entries[MAX_COMBO_SLICES..].iter().map(|(_, v)| v).sum();
        entries.truncate(MAX_COMBO_SLICES);
        entries.push((OTHERS_LABEL.to_string(), tail));
    }

    let total: f64 = entries.iter().map(|(_, v)| v).sum();
    let slices = entries
        .into_iter()
        .map(|(label, value)| DonutSlice {
            color: brand_color(&label).to_string(),
            percentage: if total > 0.0 { value / total * 100.0 } else { 0.0 },
            label,
            value,
        })
        .collect();

    DonutChart { slices, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand_row(brand: &str, sales_value: f64, volume: f64) -> MarketShareRow {
        MarketShareRow {
            brand: Some(brand.to_string()),
            sales_value,
            volume,
            ..Default::default()
        }
    }

    fn combo_row(combo: &str, sales_value: f64) -> MarketShareRow {
        MarketShareRow {
            combo: Some(combo.to_string()),
            sales_value,
            volume: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_brand_slices_follow_brand_order() {
        let rows = vec![
            brand_row("Brand 2", 10.0, 1.0),
            brand_row("Brand 10", 30.0, 1.0),
            brand_row("Brand 1", 20.0, 1.0),
        ];
        let chart = market_share(&rows, Dimension::Brand, Metric::SalesValue);
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Brand 1", "Brand 2", "Brand 10"]);
        assert_eq!(chart.total, 60.0);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let rows = vec![brand_row("Brand 1", 25.0, 1.0), brand_row("Brand 2", 75.0, 1.0)];
        let chart = market_share(&rows, Dimension::Brand, Metric::SalesValue);
        assert_eq!(chart.slices[0].percentage, 25.0);
        assert_eq!(chart.slices[1].percentage, 75.0);
    }

    #[test]
    fn test_volume_metric_reads_the_volume_column() {
        let rows = vec![brand_row("Brand 1", 100.0, 7.0)];
        let chart = market_share(&rows, Dimension::Brand, Metric::Volume);
        assert_eq!(chart.slices[0].value, 7.0);
    }

    #[test]
    fn test_combo_dimension_caps_at_twelve_plus_others() {
        // 15 combos with distinct positive values 1..=15.
        let rows: Vec<MarketShareRow> = (1..=15)
            .map(|i| combo_row(&format!("Combo {i}"), i as f64))
            .collect();
        let chart = market_share(&rows, Dimension::Combo, Metric::SalesValue);

        assert_eq!(chart.slices.len(), MAX_COMBO_SLICES + 1);
        let others = chart.slices.last().unwrap();
        assert_eq!(others.label, OTHERS_LABEL);
        // The excluded tail is the three smallest values: 1 + 2 + 3.
        assert_eq!(others.value, 6.0);
        assert_eq!(chart.total, 120.0);
    }

    #[test]
    fn test_combo_under_cap_is_untouched() {
        let rows: Vec<MarketShareRow> = (1..=12)
            .map(|i| combo_row(&format!("Combo {i}"), i as f64))
            .collect();
        let chart = market_share(&rows, Dimension::Combo, Metric::SalesValue);
        assert_eq!(chart.slices.len(), 12);
        assert!(chart.slices.iter().all(|s| s.label != OTHERS_LABEL));
    }

    #[test]
    fn test_zero_total_yields_zero_percentages() {
        let rows = vec![brand_row("Brand 1", 0.0, 0.0)];
        let chart = market_share(&rows, Dimension::Brand, Metric::SalesValue);
        assert_eq!(chart.slices[0].percentage, 0.0);
    }
}
