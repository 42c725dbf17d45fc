pub mod charts;
pub mod dataset;

use serde::{Deserialize, Serialize};

/// Grouping dimension for the dimensional charts. The upstream rows carry
/// one label column per dimension; `DimensionalRow::label_of` resolves the
/// right one so callers never poke at optional fields directly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    #[default]
    Brand,
    PackType,
    Ppg,
    Combo,
}

impl Dimension {
    /// Parse a dimension from a query string parameter.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "brand" => Some(Self::Brand),
            "packType" | "pack_type" | "packtype" => Some(Self::PackType),
            "ppg" => Some(Self::Ppg),
            "combo" => Some(Self::Combo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::PackType => "packType",
            Self::Ppg => "ppg",
            Self::Combo => "combo",
        }
    }
}

/// Metric plotted by a chart. `Asp` is derived (sales value over volume)
/// and is defined as 0 when the volume is 0.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    #[default]
    SalesValue,
    Volume,
    Asp,
}

impl Metric {
    /// Parse a metric from a query string parameter.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sales" | "value" | "salesValue" | "sales_value" => Some(Self::SalesValue),
            "volume" => Some(Self::Volume),
            "asp" => Some(Self::Asp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesValue => "sales",
            Self::Volume => "volume",
            Self::Asp => "asp",
        }
    }

    /// Derive the metric value from a (sales, volume) pair.
    pub fn derive(&self, sales_value: f64, volume: f64) -> f64 {
        match self {
            Self::SalesValue => sales_value,
            Self::Volume => volume,
            Self::Asp => {
                if volume == 0.0 {
                    0.0
                } else {
                    sales_value / volume
                }
            }
        }
    }
}

/// Entity grouping for the monthly trend charts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrendEntity {
    #[default]
    Total,
    Brand,
    Channel,
}

impl TrendEntity {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "total" => Some(Self::Total),
            "brand" => Some(Self::Brand),
            "channel" => Some(Self::Channel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Brand => "brand",
            Self::Channel => "channel",
        }
    }
}

/// The user's current filter selection. An empty list means "all values"
/// for that dimension; the upstream API applies the same convention.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
    pub brands: Vec<String>,
    pub pack_types: Vec<String>,
    pub ppgs: Vec<String>,
    pub channels: Vec<String>,
    pub years: Vec<i32>,
}

/// Distinct filter values offered by the upstream API.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub pack_types: Vec<String>,
    pub ppgs: Vec<String>,
    pub channels: Vec<String>,
    pub years: Vec<i32>,
}
