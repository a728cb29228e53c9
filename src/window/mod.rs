use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::interval::Interval;

mod category;

pub use category::{ArcKind, Category, WindowType};

/// Opaque identifier of a window, unique within one collection.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduling record: an interval plus the category and tags that must
/// also match for two windows to conflict.
///
/// Windows are values. Editing one means building a replacement with
/// [`Window::with_interval`], [`Window::with_category`] or
/// [`Window::with_tags`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window<T, C> {
    id: WindowId,
    interval: Interval<T>,
    category: C,
    tags: BTreeSet<String>,
}

/// Episode-range arc of a title. Arcs carry no tag dimension.
pub type ArcWindow = Window<u32, ArcKind>;

/// Date-range availability of a title, tagged with region codes.
pub type AvailabilityWindow = Window<NaiveDate, WindowType>;

impl<T, C> Window<T, C> {
    pub fn new(id: impl Into<WindowId>, interval: Interval<T>, category: C) -> Self {
        Self {
            id: id.into(),
            interval,
            category,
            tags: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub fn category(&self) -> &C {
        &self.category
    }

    /// Tags of the window. Empty means the window has no tag dimension.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn with_interval(self, interval: Interval<T>) -> Self {
        Self { interval, ..self }
    }

    pub fn with_category(self, category: C) -> Self {
        Self { category, ..self }
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }
}

impl<T: fmt::Display, C: fmt::Display> fmt::Display for Window<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.category, self.interval)?;
        if !self.tags.is_empty() {
            write!(f, " {{{}}}", itertools::join(&self.tags, ","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacements_keep_identity() {
        let arc = Window::new("arc-1", Interval::closed(1, 20).unwrap(), ArcKind::Canon);
        let edited = arc
            .clone()
            .with_interval(Interval::closed(1, 24).unwrap())
            .with_category(ArcKind::Mixed);

        assert_eq!(edited.id(), arc.id());
        assert_eq!(edited.interval().end(), Some(24));
        assert_eq!(*edited.category(), ArcKind::Mixed);
        assert_eq!(arc.interval().end(), Some(20));
    }

    #[test]
    fn display() {
        let window = Window::new("w1", Interval::open(3), WindowType::Streaming)
            .with_tags(["US", "CA"]);
        assert_eq!(window.to_string(), "w1 streaming [3, ..) {CA,US}");

        let arc = Window::new("a1", Interval::closed(1, 5).unwrap(), ArcKind::Filler);
        assert_eq!(arc.to_string(), "a1 filler [1, 5]");
    }
}
