//! Top-N selection for leaderboards.

use std::cmp::Ordering;

/// Order entities by a numeric metric, descending, and keep the first `n`.
///
/// The sort is stable, so entities with equal metrics keep their input
/// order — there is no secondary ranking key. A NaN metric compares as
/// equal rather than failing. Inputs shorter than `n` come back whole,
/// in order.
pub fn select_top_n<T, F>(mut items: Vec<T>, n: usize, metric: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        metric(b)
            .partial_cmp(&metric(a))
            .unwrap_or(Ordering::Equal)
    });
    items.truncate(n);
    items
}
