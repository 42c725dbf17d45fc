//! Deterministic ordering for brand-like labels.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static BRAND_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)brand\s*(\d+)").expect("valid brand pattern"));

fn brand_number(label: &str) -> Option<u64> {
    BRAND_NUMBER
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Total order for brand-like labels: labels matching "Brand N" compare by
/// the captured integer (ties lexicographic), everything else compares
/// lexicographically and sorts after the numbered labels.
pub fn brand_order(a: &str, b: &str) -> Ordering {
    match (brand_number(a), brand_number(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort labels in place using [`brand_order`].
pub fn sort_brands(labels: &mut [String]) {
    labels.sort_by(|a, b| brand_order(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(labels: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        sort_brands(&mut v);
        v
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(
            sorted(&["Brand 10", "Brand 2", "Brand 1"]),
            vec!["Brand 1", "Brand 2", "Brand 10"]
        );
    }

    #[test]
    fn test_pattern_is_case_insensitive_and_tolerates_spacing() {
        assert_eq!(
            sorted(&["brand3", "BRAND  1", "Brand 2"]),
            vec!["BRAND  1", "Brand 2", "brand3"]
        );
    }

    #[test]
    fn test_mixed_labels_form_a_total_order() {
        assert_eq!(
            sorted(&["Zeta", "Brand 2", "Alpha", "Brand 1"]),
            vec!["Brand 1", "Brand 2", "Alpha", "Zeta"]
        );
    }

    #[test]
    fn test_comparator_is_consistent() {
        let labels = ["Brand 10", "Alpha", "Brand 2", "Zeta", "brand 2"];
        for a in &labels {
            assert_eq!(brand_order(a, a), Ordering::Equal);
            for b in &labels {
                assert_eq!(brand_order(a, b), brand_order(b, a).reverse());
            }
        }
    }
}
