use std::collections::BTreeMap;

/// Percentage of `part` in `total`. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Counts occurrences of each value, keyed in ascending order.
pub fn value_counts<K: Ord>(values: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
}

/// Most frequent value and its count, or `None` for empty input.
///
/// Ties go to the smallest value.
pub fn mode<K: Ord>(values: impl IntoIterator<Item = K>) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for (value, count) in value_counts(values) {
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((value, count));
        }
    }
    best
}
