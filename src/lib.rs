//! Interval overlap and conflict detection for scheduling windows.
//!
//! Two kinds of windows are supported out of the box: episode-range story
//! arcs ([`ArcWindow`]) and region-tagged title availability windows
//! ([`AvailabilityWindow`]). Both go through the same predicate and resolver.

pub mod coverage;
pub mod error;
pub mod interval;
pub mod logging;
pub mod predicate;
pub mod report;
pub mod resolver;
pub mod snapshot;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use coverage::coverage;
pub use error::{ConflictError, Error, Result};
pub use interval::{Interval, IntervalError};
pub use predicate::{
    conflicts, tags_intersect, CategoryRule, CompatibilityTable, StrictCategory,
};
pub use report::{Report, ReportOptions};
pub use resolver::{
    ConflictBadge, ConflictPair, Resolver, Strategy, DEFAULT_SWEEP_THRESHOLD,
};
pub use window::{
    ArcKind, ArcWindow, AvailabilityWindow, Category, Window, WindowId, WindowType,
};
