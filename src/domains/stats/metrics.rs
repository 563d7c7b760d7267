//! Metric primitives shared by every report.
//!
//! All functions here are total: the mathematically undefined cases return
//! the documented zero defaults instead of failing, so arithmetic never
//! masks or fabricates a collaborator error.

use std::collections::HashSet;
use std::hash::Hash;

/// `numerator / denominator * 100` when the denominator is positive,
/// `0.0` otherwise. Used for progress-toward-goal and success rates.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// `sum / count` when the count is positive, `0.0` otherwise.
pub fn safe_average(sum: f64, count: i64) -> f64 {
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// Percentage change between two adjacent periods.
///
/// A previous total of zero (or less) yields `100.0` when there is new
/// activity and `0.0` when there is none. Downstream displays rely on
/// this exact convention for the "new activity from nothing" case.
pub fn evolution_percent(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Sum of a numeric field over the records matching the predicate.
pub fn sum_by<T, P, F>(records: &[T], predicate: P, amount: F) -> f64
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> f64,
{
    records.iter().filter(|r| predicate(r)).map(amount).sum()
}

/// Count of records matching the predicate.
pub fn count_by<T, P>(records: &[T], predicate: P) -> i64
where
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).count() as i64
}

/// Count of distinct derived keys. Keys must carry logical identity
/// (a stable entity id), never the structural equality of transient
/// record values.
pub fn distinct_count<T, K, F>(records: &[T], key: F) -> i64
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    records.iter().map(key).collect::<HashSet<K>>().len() as i64
}

/// Round to 2 decimal places, the platform's display precision for
/// percentages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
