//! Correlation heatmap view: a read-only lookup over backend-provided
//! matrix entries. No correlation is computed here.

use std::collections::HashMap;

use crate::models::charts::{CorrelationCell, CorrelationChart};
use crate::models::dataset::CorrelationEntry;
use crate::palette::heat_color;

/// Build the dense heatmap grid. KPI names keep their first-appearance
/// order; a missing (row, col) pair falls back to its mirrored entry
/// before defaulting to 0.
pub fn correlation_matrix(entries: &[CorrelationEntry]) -> CorrelationChart {
    let mut kpis: Vec<String> = Vec::new();
    for entry in entries {
        if !kpis.contains(&entry.row) {
            kpis.push(entry.row.clone());
        }
        if !kpis.contains(&entry.col) {
            kpis.push(entry.col.clone());
        }
    }

    let lookup: HashMap<String, f64> = entries
        .iter()
        .map(|e| (format!("{}|{}", e.row, e.col), e.value))
        .collect();

    let cells = kpis
        .iter()
        .flat_map(|row| {
            let lookup = &lookup;
            kpis.iter().map(move |col| {
                let value = lookup
                    .get(&format!("{row}|{col}"))
                    .or_else(|| lookup.get(&format!("{col}|{row}")))
                    .copied()
                    .unwrap_or(0.0);
                CorrelationCell {
                    row: row.clone(),
                    col: col.clone(),
                    value,
                    display: format!("{value:.2}"),
                    color: heat_color(value),
                }
            })
        })
        .collect();

    CorrelationChart { kpis, cells }
}
