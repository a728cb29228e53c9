use std::collections::BTreeMap;

use itertools::Itertools;

use crate::interval::Interval;
use crate::window::{Category, Window};

/// Union of the window intervals for each known category, as sorted,
/// pairwise disjoint intervals.
///
/// ```rust
/// use clash::{coverage, ArcKind, Interval, Window};
///
/// let arcs = vec![
///     Window::new("a", Interval::closed(1, 12).unwrap(), ArcKind::Canon),
///     Window::new("b", Interval::closed(12, 24).unwrap(), ArcKind::Canon),
///     Window::new("c", Interval::closed(30, 31).unwrap(), ArcKind::Canon),
/// ];
/// let merged = coverage(&arcs);
/// assert_eq!(
///     merged[&ArcKind::Canon],
///     vec![Interval::closed(1, 24).unwrap(), Interval::closed(30, 31).unwrap()]
/// );
/// ```
pub fn coverage<T, C>(windows: &[Window<T, C>]) -> BTreeMap<C, Vec<Interval<T>>>
where
    T: Ord + Copy,
    C: Category,
{
    windows
        .iter()
        .filter(|window| window.category().is_known())
        .map(|window| (*window.category(), *window.interval()))
        .into_group_map()
        .into_iter()
        .map(|(category, intervals)| (category, merge_intervals(intervals)))
        .collect()
}

fn merge_intervals<T: Ord + Copy>(intervals: Vec<Interval<T>>) -> Vec<Interval<T>> {
    // merge overlapping intervals
    intervals
        .into_iter()
        .sorted_by_key(|interval| interval.start())
        .coalesce(|p, c| p.merge(&c).map_err(|_| (p, c)))
        .collect()
}
