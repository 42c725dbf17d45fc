//! Wire types for the upstream aggregation API.
//!
//! Every field of the filtered-dataset response is optional: a missing or
//! empty section simply means "no data for that chart". Numeric fields
//! tolerate `null` and absence by defaulting to 0 so that NaN never reaches
//! a transform.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Dimension, TrendEntity};

/// Deserialize a numeric field that may be absent, `null`, or non-finite.
fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

/// One aggregated row keyed by year and a dimension label.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DimensionalRow {
    #[serde(rename = "Year", default)]
    pub year: i32,
    #[serde(rename = "Brand", default)]
    pub brand: Option<String>,
    #[serde(rename = "PackType", default)]
    pub pack_type: Option<String>,
    #[serde(rename = "PPG", default)]
    pub ppg: Option<String>,
    #[serde(rename = "Combo", default)]
    pub combo: Option<String>,
    #[serde(rename = "SalesValue", default, deserialize_with = "zero_if_null")]
    pub sales_value: f64,
    #[serde(rename = "Volume", default, deserialize_with = "zero_if_null")]
    pub volume: f64,
}

impl DimensionalRow {
    /// Resolve the label column for the requested dimension.
    pub fn label_of(&self, dimension: Dimension) -> Option<&str> {
        let label = match dimension {
            Dimension::Brand => &self.brand,
            Dimension::PackType => &self.pack_type,
            Dimension::Ppg => &self.ppg,
            Dimension::Combo => &self.combo,
        };
        label.as_deref()
    }
}

/// One aggregated row keyed by calendar month, optionally per brand or
/// channel.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MonthlyRow {
    #[serde(rename = "date", default)]
    pub date: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<i32>,
    #[serde(rename = "Month", default)]
    pub month: Option<u32>,
    #[serde(rename = "YearMonth", default)]
    pub year_month: Option<String>,
    #[serde(rename = "Brand", default)]
    pub brand: Option<String>,
    #[serde(rename = "Channel", default)]
    pub channel: Option<String>,
    #[serde(rename = "SalesValue", default, deserialize_with = "zero_if_null")]
    pub sales_value: f64,
    #[serde(rename = "Volume", default, deserialize_with = "zero_if_null")]
    pub volume: f64,
}

impl MonthlyRow {
    /// Canonical `YYYY-MM` key for this row, from whichever of the three
    /// date encodings the upstream used.
    pub fn month_key(&self) -> Option<String> {
        if let Some(ym) = self.year_month.as_deref().and_then(|s| s.get(..7)) {
            return Some(ym.to_string());
        }
        if let Some(date) = self.date.as_deref().and_then(|s| s.get(..7)) {
            return Some(date.to_string());
        }
        match (self.year, self.month) {
            (Some(y), Some(m)) if (1..=12).contains(&m) => Some(format!("{:04}-{:02}", y, m)),
            _ => None,
        }
    }

    /// Resolve the entity label for the requested trend grouping.
    pub fn entity_of(&self, entity: TrendEntity) -> Option<&str> {
        match entity {
            TrendEntity::Total => Some("Total"),
            TrendEntity::Brand => self.brand.as_deref(),
            TrendEntity::Channel => self.channel.as_deref(),
        }
    }
}

/// One market-share row keyed by a dimension label.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MarketShareRow {
    #[serde(rename = "Brand", default)]
    pub brand: Option<String>,
    #[serde(rename = "PackType", default)]
    pub pack_type: Option<String>,
    #[serde(rename = "PPG", default)]
    pub ppg: Option<String>,
    #[serde(rename = "Combo", default)]
    pub combo: Option<String>,
    #[serde(rename = "SalesValue", default, deserialize_with = "zero_if_null")]
    pub sales_value: f64,
    #[serde(rename = "Volume", default, deserialize_with = "zero_if_null")]
    pub volume: f64,
}

impl MarketShareRow {
    pub fn label_of(&self, dimension: Dimension) -> Option<&str> {
        let label = match dimension {
            Dimension::Brand => &self.brand,
            Dimension::PackType => &self.pack_type,
            Dimension::Ppg => &self.ppg,
            Dimension::Combo => &self.combo,
        };
        label.as_deref()
    }
}

/// Summary statistics for one metric.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    #[serde(deserialize_with = "zero_if_null")]
    pub sum: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub average: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub min: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub max: f64,
}

/// Backend-provided KPI summary statistics. When present these take
/// precedence over statistics computed from the flat rows.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct KpiStats {
    pub value: StatBlock,
    pub volume: StatBlock,
}

/// One cell of the KPI correlation matrix, with `value` in [-1, 1].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CorrelationEntry {
    #[serde(default)]
    pub row: String,
    #[serde(default)]
    pub col: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub value: f64,
}

/// The filtered-dataset response produced by the upstream API for one
/// filter selection.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub sales_by_year: Vec<DimensionalRow>,
    pub volume_by_year: Vec<DimensionalRow>,

    pub sales_by_brand_year: Vec<DimensionalRow>,
    pub volume_by_brand_year: Vec<DimensionalRow>,
    pub sales_by_pack_type_year: Vec<DimensionalRow>,
    pub volume_by_pack_type_year: Vec<DimensionalRow>,
    #[serde(rename = "salesByPPGYear")]
    pub sales_by_ppg_year: Vec<DimensionalRow>,
    #[serde(rename = "volumeByPPGYear")]
    pub volume_by_ppg_year: Vec<DimensionalRow>,
    pub sales_by_combo_year: Vec<DimensionalRow>,
    pub volume_by_combo_year: Vec<DimensionalRow>,

    pub year_brand_sales: Vec<DimensionalRow>,
    pub year_pack_type_sales: Vec<DimensionalRow>,
    #[serde(rename = "yearPPGSales")]
    pub year_ppg_sales: Vec<DimensionalRow>,
    pub year_combo_sales: Vec<DimensionalRow>,

    pub market_share_sales: Vec<MarketShareRow>,
    pub market_share_pack_type: Vec<MarketShareRow>,
    #[serde(rename = "marketSharePPG")]
    pub market_share_ppg: Vec<MarketShareRow>,
    pub market_share_combo: Vec<MarketShareRow>,

    pub monthly_trend: Vec<MonthlyRow>,
    pub monthly_brand_sales: Vec<MonthlyRow>,
    pub monthly_channel_sales: Vec<MonthlyRow>,

    pub kpi_stats: Option<KpiStats>,
    pub kpi_correlation: Vec<CorrelationEntry>,
}

impl Dataset {
    /// Sales rows for the stacked year charts of a dimension.
    pub fn sales_rows(&self, dimension: Dimension) -> &[DimensionalRow] {
        match dimension {
            Dimension::Brand => &self.sales_by_brand_year,
            Dimension::PackType => &self.sales_by_pack_type_year,
            Dimension::Ppg => &self.sales_by_ppg_year,
            Dimension::Combo => &self.sales_by_combo_year,
        }
    }

    /// Volume rows for the stacked year charts of a dimension.
    pub fn volume_rows(&self, dimension: Dimension) -> &[DimensionalRow] {
        match dimension {
            Dimension::Brand => &self.volume_by_brand_year,
            Dimension::PackType => &self.volume_by_pack_type_year,
            Dimension::Ppg => &self.volume_by_ppg_year,
            Dimension::Combo => &self.volume_by_combo_year,
        }
    }

    /// Rows for the grouped category-by-year charts.
    pub fn year_rows(&self, dimension: Dimension) -> &[DimensionalRow] {
        match dimension {
            Dimension::Brand => &self.year_brand_sales,
            Dimension::PackType => &self.year_pack_type_sales,
            Dimension::Ppg => &self.year_ppg_sales,
            Dimension::Combo => &self.year_combo_sales,
        }
    }

    /// Rows for the market-share donut of a dimension.
    pub fn share_rows(&self, dimension: Dimension) -> &[MarketShareRow] {
        match dimension {
            Dimension::Brand => &self.market_share_sales,
            Dimension::PackType => &self.market_share_pack_type,
            Dimension::Ppg => &self.market_share_ppg,
            Dimension::Combo => &self.market_share_combo,
        }
    }

    /// Rows for the monthly trend charts of an entity grouping.
    pub fn trend_rows(&self, entity: TrendEntity) -> &[MonthlyRow] {
        match entity {
            TrendEntity::Total => &self.monthly_trend,
            TrendEntity::Brand => &self.monthly_brand_sales,
            TrendEntity::Channel => &self.monthly_channel_sales,
        }
    }
}
