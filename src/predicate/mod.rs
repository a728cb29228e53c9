//! Pairwise conflict test between two windows.

use std::collections::BTreeSet;

use crate::window::{Category, Window};

/// Decides whether two categories may conflict at all.
///
/// Implementations must be symmetric: `compatible(a, b) == compatible(b, a)`.
pub trait CategoryRule<C> {
    fn compatible(&self, a: &C, b: &C) -> bool;
}

/// Categories conflict only when they are equal and known.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StrictCategory;

impl<C: Category> CategoryRule<C> for StrictCategory {
    fn compatible(&self, a: &C, b: &C) -> bool {
        a.is_known() && a == b
    }
}

/// Strict equality extended with an explicit list of compatible category
/// pairs. An empty table behaves exactly like [`StrictCategory`].
///
/// ```rust
/// use clash::{CategoryRule, CompatibilityTable, WindowType};
///
/// let table = CompatibilityTable::new().allow(WindowType::All, WindowType::Theatrical);
/// assert!(table.compatible(&WindowType::Theatrical, &WindowType::All));
/// assert!(!table.compatible(&WindowType::Streaming, &WindowType::All));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityTable<C> {
    pairs: BTreeSet<(C, C)>,
}

impl<C: Category> CompatibilityTable<C> {
    pub fn new() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }

    /// Declares `a` and `b` compatible in both directions.
    pub fn allow(mut self, a: C, b: C) -> Self {
        self.pairs.insert((a, b));
        self.pairs.insert((b, a));
        self
    }
}

impl<C: Category> Default for CompatibilityTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> CategoryRule<C> for CompatibilityTable<C> {
    fn compatible(&self, a: &C, b: &C) -> bool {
        StrictCategory.compatible(a, b)
            || (a.is_known() && b.is_known() && self.pairs.contains(&(*a, *b)))
    }
}

/// True when either set is empty (no tag dimension) or the sets share a tag.
pub fn tags_intersect(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    a.is_empty() || b.is_empty() || !a.is_disjoint(b)
}

/// Returns whether two windows conflict: compatible categories, overlapping
/// intervals and intersecting tags.
///
/// Self-comparison is the caller's business; passing the same window twice
/// reports a conflict whenever its category is known.
pub fn conflicts<T, C, R>(a: &Window<T, C>, b: &Window<T, C>, rule: &R) -> bool
where
    T: Ord + Copy,
    R: CategoryRule<C> + ?Sized,
{
    rule.compatible(a.category(), b.category())
        && a.interval().overlaps(b.interval())
        && tags_intersect(a.tags(), b.tags())
}
