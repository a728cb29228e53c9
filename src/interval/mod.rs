use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// A list specifying general categories of Interval errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// Start is not less than or equal to end
    #[error("interval end precedes its start")]
    StartEndRangeInvalid,
    /// Two intervals to be merged do not overlap
    #[error("intervals do not overlap")]
    NonOverlappingInterval,
}

/// A closed-interval [`start`, `end`] over an ordinal axis (episode numbers,
/// calendar days). A missing `end` makes the interval open-ended: it covers
/// every point from `start` onwards.
///
/// # Examples
///
/// ```rust
/// use clash::Interval;
///
/// let interval = Interval::closed(1, 10).unwrap();
/// assert_eq!(interval.start(), 1);
/// assert_eq!(interval.end(), Some(10));
///
/// let ongoing = Interval::open(10);
/// assert!(ongoing.is_open_ended());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "IntervalRecord<T>",
    bound(deserialize = "T: Deserialize<'de> + Ord + Copy")
)]
pub struct Interval<T> {
    start: T,
    end: Option<T>,
}

#[derive(Deserialize)]
struct IntervalRecord<T> {
    start: T,
    end: Option<T>,
}

impl<T: Ord + Copy> TryFrom<IntervalRecord<T>> for Interval<T> {
    type Error = IntervalError;

    fn try_from(record: IntervalRecord<T>) -> Result<Self, Self::Error> {
        Interval::new(record.start, record.end)
    }
}

impl<T: Ord + Copy> Interval<T> {
    /// Creates a new `Interval` set to `start` and `end`, where `None` means
    /// the interval never ends.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clash::{Interval, IntervalError};
    ///
    /// assert!(Interval::new(1, Some(10)).is_ok());
    /// assert!(Interval::new(1, None).is_ok());
    /// assert_eq!(
    ///     Interval::new(10, Some(1)).unwrap_err(),
    ///     IntervalError::StartEndRangeInvalid
    /// );
    /// ```
    pub fn new(start: T, end: Option<T>) -> Result<Self, IntervalError> {
        match end {
            Some(end) if end < start => Err(IntervalError::StartEndRangeInvalid),
            _ => Ok(Self { start, end }),
        }
    }

    /// Creates a bounded interval covering `start..=end`.
    pub fn closed(start: T, end: T) -> Result<Self, IntervalError> {
        Self::new(start, Some(end))
    }

    /// Creates an interval covering `start` and everything after it.
    pub fn open(start: T) -> Self {
        Self { start, end: None }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> Option<T> {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    pub fn contains(&self, point: T) -> bool {
        self.start <= point && self.end.map_or(true, |end| point <= end)
    }

    /// Checks if two intervals overlap. Overlapping intervals have at least
    /// one point in common; bounds are inclusive and an open end reaches
    /// every later point.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clash::Interval;
    ///
    /// let a = Interval::closed(1, 5).unwrap();
    /// let b = Interval::closed(5, 9).unwrap();
    /// assert!(a.overlaps(&b));
    /// assert!(b.overlaps(&a));
    ///
    /// let c = Interval::closed(6, 9).unwrap();
    /// assert!(!a.overlaps(&c));
    /// assert!(!c.overlaps(&a));
    /// ```
    pub fn overlaps(&self, other: &Interval<T>) -> bool {
        self.reaches(other.start) && other.reaches(self.start)
    }

    /// Merges two intervals returning a new `Interval`.
    ///
    /// The merged `Interval` range includes the union of ranges from each
    /// `Interval`. If either side is open-ended, so is the result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use clash::Interval;
    ///
    /// let a = Interval::closed(1, 3).unwrap();
    /// let b = Interval::closed(3, 5).unwrap();
    /// let c = a.merge(&b).unwrap();
    /// assert_eq!(c.start(), 1);
    /// assert_eq!(c.end(), Some(5));
    /// ```
    pub fn merge(&self, other: &Self) -> Result<Self, IntervalError> {
        if !self.overlaps(other) {
            return Err(IntervalError::NonOverlappingInterval);
        }

        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.max(b)),
            _ => None,
        };
        Ok(Self {
            start: self.start.min(other.start),
            end,
        })
    }

    // true when this interval extends at least as far as `point`
    fn reaches(&self, point: T) -> bool {
        self.end.map_or(true, |end| point <= end)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "[{}, {}]", self.start, end),
            None => write!(f, "[{}, ..)", self.start),
        }
    }
}

impl<T: Ord> PartialOrd for Interval<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if matches!(&self.end, Some(end) if *end < other.start) {
            Some(Ordering::Less)
        } else if matches!(&other.end, Some(end) if *end < self.start) {
            Some(Ordering::Greater)
        } else {
            None // Intervals overlap
        }
    }
}
