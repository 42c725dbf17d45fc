//! Stable color assignment for chart series.
//!
//! Colors are a pure function of the label (plus a positional index for the
//! year fallback): no randomness, no insertion order, so a series keeps its
//! color across renders and restarts.

use phf::phf_map;

/// Fixed colors for the well-known brand labels.
static BRAND_COLORS: phf::Map<&'static str, &'static str> = phf_map! {
    "Brand 1" => "#fbbf24", // amber
    "Brand 2" => "#3b82f6", // blue
    "Brand 3" => "#22c55e", // green
    "Brand 4" => "#FFA500", // orange
    "Brand 5" => "#1ABC9C", // teal
    "Brand 6" => "#9B59B6", // purple
};

const FALLBACK_PALETTE: [&str; 8] = [
    "#1d4ed8", "#9333ea", "#ef4444", "#f59e0b", "#10b981", "#06b6d4", "#84cc16", "#f472b6",
];

/// Color for a brand-like label. Unknown labels hash to a fixed fallback
/// palette entry, so the assignment stays stable across process runs.
pub fn brand_color(label: &str) -> &'static str {
    if let Some(color) = BRAND_COLORS.get(label) {
        return color;
    }
    let mut hash: u32 = 0;
    for ch in label.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(ch as u32);
    }
    FALLBACK_PALETTE[hash as usize % FALLBACK_PALETTE.len()]
}

const YEAR_PALETTE: [&str; 6] = [
    "#3b82f6", "#22c55e", "#fbbf24", "#a7f3d0", "#9333ea", "#06b6d4",
];

/// Color for a year series; `index` breaks ties for years outside the
/// fixed table.
pub fn year_color(year: i32, index: usize) -> &'static str {
    match year {
        2021 => "#3b82f6",
        2022 => "#22c55e",
        2023 => "#fbbf24",
        2024 => "#a7f3d0",
        _ => YEAR_PALETTE[index % YEAR_PALETTE.len()],
    }
}

// Correlation gradient stops at -1, 0 and +1.
const HEAT_NEGATIVE: [u8; 3] = [239, 68, 68]; // red
const HEAT_NEUTRAL: [u8; 3] = [249, 250, 251]; // near-white
const HEAT_POSITIVE: [u8; 3] = [59, 130, 246]; // blue

/// Heatmap color for a correlation value in [-1, 1], linearly
/// interpolated between the three fixed stops.
pub fn heat_color(value: f64) -> String {
    let v = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
    let (from, to, t) = if v < 0.0 {
        (HEAT_NEGATIVE, HEAT_NEUTRAL, v + 1.0)
    } else {
        (HEAT_NEUTRAL, HEAT_POSITIVE, v)
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2])
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_brands_use_the_fixed_table() {
        assert_eq!(brand_color("Brand 1"), "#fbbf24");
        assert_eq!(brand_color("Brand 6"), "#9B59B6");
    }

    #[test]
    fn test_unknown_brand_is_deterministic() {
        let first = brand_color("Unknown XYZ");
        for _ in 0..10 {
            assert_eq!(brand_color("Unknown XYZ"), first);
        }
        assert!(FALLBACK_PALETTE.contains(&first));
    }

    #[test]
    fn test_unknown_brand_hash_matches_reference() {
        // h = h * 31 + code, wrapping at 2^32, indexed modulo palette size.
        let label = "Acme";
        let mut h: u32 = 0;
        for c in label.chars() {
            h = h.wrapping_mul(31).wrapping_add(c as u32);
        }
        assert_eq!(brand_color(label), FALLBACK_PALETTE[h as usize % 8]);
    }

    #[test]
    fn test_year_colors() {
        assert_eq!(year_color(2023, 0), "#fbbf24");
        assert_eq!(year_color(2019, 1), "#22c55e");
        assert_eq!(year_color(2019, 7), "#22c55e");
    }

    #[test]
    fn test_heat_color_stops() {
        assert_eq!(heat_color(-1.0), "#ef4444");
        assert_eq!(heat_color(0.0), "#f9fafb");
        assert_eq!(heat_color(1.0), "#3b82f6");
    }

    #[test]
    fn test_heat_color_clamps_and_interpolates() {
        assert_eq!(heat_color(2.0), heat_color(1.0));
        assert_eq!(heat_color(f64::NAN), heat_color(0.0));
        // Halfway between neutral and positive.
        assert_eq!(heat_color(0.5), "#9abef9");
    }
}
