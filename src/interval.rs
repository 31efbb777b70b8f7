//! Closed time intervals on the scheduling axis.

use std::fmt::Display;

use chrono::NaiveDateTime;
use qtty::{Minute, Quantity, Unit};

use crate::units::{from_axis, to_axis};

/// Closed range `[start, end]`.
///
/// Both endpoints belong to the interval, so two intervals that merely touch
/// (one ending exactly when the other begins) overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<U: Unit> {
    start: Quantity<U>,
    end: Quantity<U>,
}

impl<U: Unit> Interval<U> {
    /// Creates interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub const fn new(start: Quantity<U>, end: Quantity<U>) -> Self {
        assert!(
            start.value() <= end.value(),
            "Interval start must be <= end"
        );
        Self { start, end }
    }

    /// Creates `[start, end]` only if `end` is strictly after `start`.
    ///
    /// NaN endpoints are rejected as well.
    pub fn try_new(start: Quantity<U>, end: Quantity<U>) -> Option<Self> {
        if start.value() < end.value() {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub const fn from_f64(start: f64, end: f64) -> Self {
        Self::new(Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    pub const fn start(&self) -> Quantity<U> {
        self.start
    }

    pub const fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end - self.start
    }

    /// Returns true if `position` ∈ `[start, end]`.
    pub const fn contains(&self, position: Quantity<U>) -> bool {
        self.start.value() <= position.value() && position.value() <= self.end.value()
    }

    /// Inclusive overlap: `self.start <= other.end && other.start <= self.end`.
    pub const fn overlaps(&self, other: &Interval<U>) -> bool {
        self.start.value() <= other.end.value() && other.start.value() <= self.end.value()
    }
}

impl Interval<Minute> {
    /// Builds an axis interval from two wall-clock instants.
    ///
    /// Returns `None` unless `end` is strictly after `start` once both are
    /// truncated to the minute.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        Self::try_new(to_axis(start), to_axis(end))
    }

    /// Wall-clock start instant.
    pub fn start_instant(&self) -> Option<NaiveDateTime> {
        from_axis(self.start)
    }

    /// Wall-clock end instant.
    pub fn end_instant(&self) -> Option<NaiveDateTime> {
        from_axis(self.end)
    }
}

impl<U: Unit> Display for Interval<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.start.value(), self.end.value())
    }
}

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Interval<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 18)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_interval_creation() {
        let interval = Interval::<Minute>::from_f64(0.0, 100.0);
        assert_eq!(interval.duration().value(), 100.0);
        assert_eq!(interval.start().value(), 0.0);
        assert_eq!(interval.end().value(), 100.0);
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::<Minute>::from_f64(0.0, 100.0);
        assert!(interval.contains(Quantity::new(50.0)));
        assert!(interval.contains(Quantity::new(0.0)));
        assert!(interval.contains(Quantity::new(100.0)));
        assert!(!interval.contains(Quantity::new(150.0)));
    }

    #[test]
    fn test_interval_overlaps() {
        let a = Interval::<Minute>::from_f64(0.0, 100.0);
        let b = Interval::<Minute>::from_f64(50.0, 150.0);
        let c = Interval::<Minute>::from_f64(200.0, 300.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_intervals_overlap() {
        let a = Interval::<Minute>::from_f64(600.0, 660.0);
        let b = Interval::<Minute>::from_f64(660.0, 720.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_try_new_requires_positive_length() {
        assert!(Interval::<Minute>::try_new(Quantity::new(5.0), Quantity::new(5.0)).is_none());
        assert!(Interval::<Minute>::try_new(Quantity::new(6.0), Quantity::new(5.0)).is_none());
        assert!(Interval::<Minute>::try_new(Quantity::new(f64::NAN), Quantity::new(5.0)).is_none());
        assert!(Interval::<Minute>::try_new(Quantity::new(4.0), Quantity::new(5.0)).is_some());
    }

    #[test]
    fn test_between_wall_clock() {
        let iv = Interval::between(at(9, 0), at(10, 30)).unwrap();
        assert_eq!(iv.duration().value(), 90.0);
        assert_eq!(iv.start_instant(), Some(at(9, 0)));
        assert_eq!(iv.end_instant(), Some(at(10, 30)));
        assert!(Interval::between(at(10, 0), at(10, 0)).is_none());
        assert!(Interval::between(at(11, 0), at(10, 0)).is_none());
    }
}
