//! Numeric formatting for KPI cards, axis ticks and tooltips.
//!
//! All functions are pure and never panic; non-finite input is treated as 0
//! (or the empty-string sentinel for [`format_millions`]).

/// Convert an absolute value to millions.
pub fn to_millions(value: f64) -> f64 {
    value / 1_000_000.0
}

/// Format a monetary value with a magnitude suffix: `€1.2B`, `€3.4M`,
/// `€5.6K`, or `€789` below a thousand.
pub fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if value >= 1e9 {
        format!("€{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("€{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("€{:.1}K", value / 1e3)
    } else {
        format!("€{:.0}", value)
    }
}

/// Same thresholds as [`format_currency`], without the currency symbol.
pub fn format_volume(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

/// Format a value in millions with an `M` suffix: integer when exact,
/// otherwise one decimal. Returns `""` for missing or non-finite input —
/// an explicit sentinel, not `"0M"`.
pub fn format_millions(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return String::new();
    };
    let millions = to_millions(v);
    if millions.fract() == 0.0 {
        format!("{:.0}M", millions)
    } else {
        format!("{:.1}M", millions)
    }
}

/// Like [`format_millions`] with a space before the suffix: `5.2 M`.
pub fn format_millions_with_space(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return String::new();
    };
    let millions = to_millions(v);
    if millions.fract() == 0.0 {
        format!("{:.0} M", millions)
    } else {
        format!("{:.1} M", millions)
    }
}

/// Format a percentage with one decimal and an explicit sign: `+` for
/// non-negative values, `-` preserved for negative ones. One-decimal
/// rounding uses `{:.1}` (round half to even).
pub fn format_percentage(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, value)
}
