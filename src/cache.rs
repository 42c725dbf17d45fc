//! Last-known-good preservation for the dashboard dataset.
//!
//! A refresh that comes back empty (or not at all) must not blank charts
//! that already rendered: each dataset section only ever moves forward to a
//! non-empty value. Refreshes carry a monotonic ticket so a slow response
//! that lands after a newer one is discarded instead of rolling state back.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use crate::models::dataset::{
    CorrelationEntry, Dataset, DimensionalRow, KpiStats, MarketShareRow, MonthlyRow,
};

/// Whether a value carries renderable content. Sequences are empty when
/// they have no elements; scalar-like values always count as content.
pub trait HasContent {
    fn has_content(&self) -> bool {
        true
    }
}

impl<T> HasContent for Vec<T> {
    fn has_content(&self) -> bool {
        !self.is_empty()
    }
}

impl HasContent for KpiStats {}

/// One preserved value: holds the latest non-empty snapshot seen while not
/// loading, and falls back to it whenever the current value is absent or
/// empty.
pub struct LastGood<T> {
    inner: RwLock<Option<T>>,
}

impl<T: Clone + HasContent> LastGood<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Feed the current value through the cell and get the effective one
    /// back: `current` when it has content, the preserved snapshot
    /// otherwise. The snapshot is only updated when not loading.
    pub fn observe(&self, current: Option<T>, is_loading: bool) -> Option<T> {
        if !is_loading {
            if let Some(cur) = current.as_ref().filter(|c| c.has_content()) {
                if let Ok(mut guard) = self.inner.write() {
                    *guard = Some(cur.clone());
                }
            }
        }
        match current {
            Some(cur) if cur.has_content() => Some(cur),
            _ => self.get(),
        }
    }

    pub fn get(&self) -> Option<T> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }
}

impl<T: Clone + HasContent> Default for LastGood<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct Sections {
    sales_by_year: LastGood<Vec<DimensionalRow>>,
    volume_by_year: LastGood<Vec<DimensionalRow>>,
    sales_by_brand_year: LastGood<Vec<DimensionalRow>>,
    volume_by_brand_year: LastGood<Vec<DimensionalRow>>,
    sales_by_pack_type_year: LastGood<Vec<DimensionalRow>>,
    volume_by_pack_type_year: LastGood<Vec<DimensionalRow>>,
    sales_by_ppg_year: LastGood<Vec<DimensionalRow>>,
    volume_by_ppg_year: LastGood<Vec<DimensionalRow>>,
    sales_by_combo_year: LastGood<Vec<DimensionalRow>>,
    volume_by_combo_year: LastGood<Vec<DimensionalRow>>,
    year_brand_sales: LastGood<Vec<DimensionalRow>>,
    year_pack_type_sales: LastGood<Vec<DimensionalRow>>,
    year_ppg_sales: LastGood<Vec<DimensionalRow>>,
    year_combo_sales: LastGood<Vec<DimensionalRow>>,
    market_share_sales: LastGood<Vec<MarketShareRow>>,
    market_share_pack_type: LastGood<Vec<MarketShareRow>>,
    market_share_ppg: LastGood<Vec<MarketShareRow>>,
    market_share_combo: LastGood<Vec<MarketShareRow>>,
    monthly_trend: LastGood<Vec<MonthlyRow>>,
    monthly_brand_sales: LastGood<Vec<MonthlyRow>>,
    monthly_channel_sales: LastGood<Vec<MonthlyRow>>,
    kpi_stats: LastGood<KpiStats>,
    kpi_correlation: LastGood<Vec<CorrelationEntry>>,
}

/// Preserved dashboard dataset, one [`LastGood`] cell per section so a
/// refresh that is missing one chart's data leaves that chart untouched.
#[derive(Default)]
pub struct DashboardCache {
    loading: AtomicBool,
    next_ticket: AtomicU64,
    applied: Mutex<u64>,
    sections: Sections,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a refresh: marks the cache loading and issues the ticket the
    /// eventual commit must present.
    pub fn begin(&self) -> u64 {
        self.loading.store(true, Ordering::SeqCst);
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit a refreshed dataset. Returns false (and changes nothing)
    /// when a newer refresh has already been applied.
    pub fn commit(&self, ticket: u64, incoming: Dataset) -> bool {
        let Ok(mut applied) = self.applied.lock() else {
            return false;
        };
        if ticket <= *applied {
            return false;
        }
        *applied = ticket;

        let s = &self.sections;
        s.sales_by_year.observe(Some(incoming.sales_by_year), false);
        s.volume_by_year.observe(Some(incoming.volume_by_year), false);
        s.sales_by_brand_year.observe(Some(incoming.sales_by_brand_year), false);
        s.volume_by_brand_year.observe(Some(incoming.volume_by_brand_year), false);
        s.sales_by_pack_type_year.observe(Some(incoming.sales_by_pack_type_year), false);
        s.volume_by_pack_type_year.observe(Some(incoming.volume_by_pack_type_year), false);
        s.sales_by_ppg_year.observe(Some(incoming.sales_by_ppg_year), false);
        s.volume_by_ppg_year.observe(Some(incoming.volume_by_ppg_year), false);
        s.sales_by_combo_year.observe(Some(incoming.sales_by_combo_year), false);
        s.volume_by_combo_year.observe(Some(incoming.volume_by_combo_year), false);
        s.year_brand_sales.observe(Some(incoming.year_brand_sales), false);
        s.year_pack_type_sales.observe(Some(incoming.year_pack_type_sales), false);
        s.year_ppg_sales.observe(Some(incoming.year_ppg_sales), false);
        s.year_combo_sales.observe(Some(incoming.year_combo_sales), false);
        s.market_share_sales.observe(Some(incoming.market_share_sales), false);
        s.market_share_pack_type.observe(Some(incoming.market_share_pack_type), false);
        s.market_share_ppg.observe(Some(incoming.market_share_ppg), false);
        s.market_share_combo.observe(Some(incoming.market_share_combo), false);
        s.monthly_trend.observe(Some(incoming.monthly_trend), false);
        s.monthly_brand_sales.observe(Some(incoming.monthly_brand_sales), false);
        s.monthly_channel_sales.observe(Some(incoming.monthly_channel_sales), false);
        s.kpi_stats.observe(incoming.kpi_stats, false);
        s.kpi_correlation.observe(Some(incoming.kpi_correlation), false);

        if ticket == self.next_ticket.load(Ordering::SeqCst) {
            self.loading.store(false, Ordering::SeqCst);
        }
        true
    }

    /// Abandon a refresh that failed: clears the loading flag if no newer
    /// refresh is underway, and keeps the preserved snapshot as-is.
    pub fn abandon(&self, ticket: u64) {
        if ticket == self.next_ticket.load(Ordering::SeqCst) {
            self.loading.store(false, Ordering::SeqCst);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The effective dataset: every section at its last known good value.
    pub fn snapshot(&self) -> Dataset {
        let s = &self.sections;
        Dataset {
            sales_by_year: s.sales_by_year.get().unwrap_or_default(),
            volume_by_year: s.volume_by_year.get().unwrap_or_default(),
            sales_by_brand_year: s.sales_by_brand_year.get().unwrap_or_default(),
            volume_by_brand_year: s.volume_by_brand_year.get().unwrap_or_default(),
            sales_by_pack_type_year: s.sales_by_pack_type_year.get().unwrap_or_default(),
            volume_by_pack_type_year: s.volume_by_pack_type_year.get().unwrap_or_default(),
            sales_by_ppg_year: s.sales_by_ppg_year.get().unwrap_or_default(),
            volume_by_ppg_year: s.volume_by_ppg_year.get().unwrap_or_default(),
            sales_by_combo_year: s.sales_by_combo_year.get().unwrap_or_default(),
            volume_by_combo_year: s.volume_by_combo_year.get().unwrap_or_default(),
            year_brand_sales: s.year_brand_sales.get().unwrap_or_default(),
            year_pack_type_sales: s.year_pack_type_sales.get().unwrap_or_default(),
            year_ppg_sales: s.year_ppg_sales.get().unwrap_or_default(),
            year_combo_sales: s.year_combo_sales.get().unwrap_or_default(),
            market_share_sales: s.market_share_sales.get().unwrap_or_default(),
            market_share_pack_type: s.market_share_pack_type.get().unwrap_or_default(),
            market_share_ppg: s.market_share_ppg.get().unwrap_or_default(),
            market_share_combo: s.market_share_combo.get().unwrap_or_default(),
            monthly_trend: s.monthly_trend.get().unwrap_or_default(),
            monthly_brand_sales: s.monthly_brand_sales.get().unwrap_or_default(),
            monthly_channel_sales: s.monthly_channel_sales.get().unwrap_or_default(),
            kpi_stats: s.kpi_stats.get(),
            kpi_correlation: s.kpi_correlation.get().unwrap_or_default(),
        }
    }
}
