//! Conflict resolution across a whole window collection.
//!
//! The resolver is stateless: every call recomputes from the snapshot it is
//! given and never mutates it, so one resolver and one snapshot can be shared
//! freely between threads.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::error::ConflictError;
use crate::predicate::{conflicts, CategoryRule, StrictCategory};
use crate::window::{Window, WindowId};

mod sweep;

/// Collection size from which `Strategy::Auto` switches to the sweep line.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 512;

/// How candidate pairs are enumerated. Every strategy yields the same pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every unordered pair goes through the predicate.
    Naive,
    /// Only pairs whose intervals overlap go through the predicate.
    SweepLine,
    /// `SweepLine` for collections of at least `threshold` windows.
    Auto { threshold: usize },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Auto {
            threshold: DEFAULT_SWEEP_THRESHOLD,
        }
    }
}

impl Strategy {
    fn for_len(self, len: usize) -> Strategy {
        match self {
            Strategy::Auto { threshold } if len >= threshold => Strategy::SweepLine,
            Strategy::Auto { .. } => Strategy::Naive,
            other => other,
        }
    }
}

/// One unordered conflicting pair, `first.id() < second.id()`.
#[derive(Debug)]
pub struct ConflictPair<'a, T, C> {
    pub first: &'a Window<T, C>,
    pub second: &'a Window<T, C>,
}

impl<T, C> Clone for ConflictPair<'_, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for ConflictPair<'_, T, C> {}

impl<'a, T, C> ConflictPair<'a, T, C> {
    fn new(a: &'a Window<T, C>, b: &'a Window<T, C>) -> Self {
        if a.id() <= b.id() {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn ids(&self) -> (&'a WindowId, &'a WindowId) {
        (self.first.id(), self.second.id())
    }
}

/// Per-window conflict summary used to render warning badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBadge {
    pub id: WindowId,
    pub conflicts_with: Vec<WindowId>,
}

impl ConflictBadge {
    pub fn count(&self) -> usize {
        self.conflicts_with.len()
    }

    pub fn is_clear(&self) -> bool {
        self.conflicts_with.is_empty()
    }
}

/// Computes conflicts over caller-supplied window snapshots.
///
/// Window ids must be unique within a snapshot; this is not checked.
///
/// ```rust
/// use clash::{ArcKind, Interval, Resolver, Window};
///
/// let arcs = vec![
///     Window::new("a", Interval::closed(1, 20).unwrap(), ArcKind::Canon),
///     Window::new("b", Interval::closed(15, 30).unwrap(), ArcKind::Canon),
///     Window::new("c", Interval::closed(21, 40).unwrap(), ArcKind::Filler),
/// ];
/// let resolver = Resolver::strict();
/// assert_eq!(resolver.conflict_count(&arcs), 1);
/// assert_eq!(resolver.conflicts_for(&arcs[0], &arcs).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver<R = StrictCategory> {
    rule: R,
    strategy: Strategy,
}

impl Resolver {
    /// Resolver with strict category equality.
    pub fn strict() -> Self {
        Self::new(StrictCategory)
    }
}

impl<R> Resolver<R> {
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Self { strategy, ..self }
    }

    /// Every window in `all`, other than `window` itself, that conflicts with
    /// `window`. Sorted by interval start, then id.
    pub fn conflicts_for<'a, T, C>(
        &self,
        window: &Window<T, C>,
        all: &'a [Window<T, C>],
    ) -> Vec<&'a Window<T, C>>
    where
        T: Ord + Copy,
        R: CategoryRule<C>,
    {
        all.iter()
            .filter(|other| other.id() != window.id())
            .filter(|other| conflicts(window, *other, &self.rule))
            .sorted_by(|a, b| {
                (a.interval().start(), a.id()).cmp(&(b.interval().start(), b.id()))
            })
            .collect()
    }

    /// Each unordered conflicting pair exactly once, sorted by id.
    pub fn all_conflict_pairs<'a, T, C>(
        &self,
        all: &'a [Window<T, C>],
    ) -> Vec<ConflictPair<'a, T, C>>
    where
        T: Ord + Copy,
        R: CategoryRule<C>,
    {
        let strategy = self.strategy.for_len(all.len());
        let candidates: Vec<(&Window<T, C>, &Window<T, C>)> = match strategy {
            Strategy::SweepLine => sweep::overlapping_pairs(all)
                .into_iter()
                .map(|(a, b)| (&all[a], &all[b]))
                .collect(),
            _ => all.iter().tuple_combinations().collect(),
        };
        let examined = candidates.len();

        let pairs: Vec<_> = candidates
            .into_iter()
            .filter(|&(a, b)| a.id() != b.id())
            .filter(|&(a, b)| conflicts(a, b, &self.rule))
            .map(|(a, b)| ConflictPair::new(a, b))
            .sorted_by(|x, y| x.ids().cmp(&y.ids()))
            .collect();

        debug!(
            windows = all.len(),
            ?strategy,
            examined,
            conflicts = pairs.len(),
            "resolved conflict pairs"
        );
        pairs
    }

    /// Number of conflicting pairs, counted once each.
    pub fn conflict_count<T, C>(&self, all: &[Window<T, C>]) -> usize
    where
        T: Ord + Copy,
        R: CategoryRule<C>,
    {
        self.all_conflict_pairs(all).len()
    }

    /// One badge per window, in input order.
    pub fn badges<T, C>(&self, all: &[Window<T, C>]) -> Vec<ConflictBadge>
    where
        T: Ord + Copy,
        R: CategoryRule<C>,
    {
        let mut partners: HashMap<&WindowId, Vec<WindowId>> = HashMap::new();
        for pair in self.all_conflict_pairs(all) {
            let (a, b) = pair.ids();
            partners.entry(a).or_default().push(b.clone());
            partners.entry(b).or_default().push(a.clone());
        }

        all.iter()
            .map(|window| {
                let mut conflicts_with = partners.remove(window.id()).unwrap_or_default();
                conflicts_with.sort();
                ConflictBadge {
                    id: window.id().clone(),
                    conflicts_with,
                }
            })
            .collect()
    }

    /// Guard for create and update: fails if `candidate` would conflict with
    /// any window in `existing`. A window in `existing` with the candidate's
    /// id is the version being replaced and is ignored.
    pub fn check_candidate<T, C>(
        &self,
        candidate: &Window<T, C>,
        existing: &[Window<T, C>],
    ) -> Result<(), ConflictError>
    where
        T: Ord + Copy,
        R: CategoryRule<C>,
    {
        let with: Vec<WindowId> = self
            .conflicts_for(candidate, existing)
            .into_iter()
            .map(|window| window.id().clone())
            .sorted()
            .collect();

        if with.is_empty() {
            Ok(())
        } else {
            Err(ConflictError::conflicts(candidate.id().clone(), with))
        }
    }
}
