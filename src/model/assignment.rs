use std::fmt;

use chrono::NaiveDateTime;
use qtty::Minute;

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::units::{to_axis, truncate_to_minute};
use crate::{generate_id, Id};

/// Wall-clock span `[start, end]` at minute granularity with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSpan {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSpan {
    /// Truncates both instants to the minute and rejects `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if end <= start {
            return Err(Error::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Position on the minute axis.
    pub fn axis(&self) -> Interval<Minute> {
        Interval::new(to_axis(self.start), to_axis(self.end))
    }

    /// Inclusive overlap, see [`Interval::overlaps`].
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Lifecycle tag of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
pub enum AssignmentStatus {
    #[default]
    Scheduled,
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentStatus::Scheduled => f.write_str("scheduled"),
        }
    }
}

/// Binding of one work order to one machine over a time span.
///
/// Assignments are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    id: Id,
    machine_id: Id,
    work_order_id: Id,
    span: TimeSpan,
    status: AssignmentStatus,
}

impl Assignment {
    pub fn new(machine_id: impl Into<Id>, work_order_id: impl Into<Id>, span: TimeSpan) -> Self {
        Self {
            id: generate_id(),
            machine_id: machine_id.into(),
            work_order_id: work_order_id.into(),
            span,
            status: AssignmentStatus::Scheduled,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    pub fn work_order_id(&self) -> &str {
        &self.work_order_id
    }

    pub fn span(&self) -> TimeSpan {
        self.span
    }

    pub fn start(&self) -> NaiveDateTime {
        self.span.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.span.end
    }

    pub fn status(&self) -> AssignmentStatus {
        self.status
    }
}

/// An assignment joined with the names the timeline and tooltips display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AssignmentView {
    pub assignment: Assignment,
    pub machine_name: String,
    pub order_number: String,
    pub customer: String,
}

impl AssignmentView {
    pub fn start(&self) -> NaiveDateTime {
        self.assignment.start()
    }

    pub fn end(&self) -> NaiveDateTime {
        self.assignment.end()
    }
}

/// Loosely shaped assignment as it arrives from storage or a seed file.
///
/// Every reference is optional here; [`AssignmentRecord::validate`] turns the
/// record into checked parts or says which reference is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentRecord {
    pub machine: Option<String>,
    pub order_number: Option<String>,
    pub customer: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Output of [`AssignmentRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub machine: String,
    pub order_number: String,
    pub customer: String,
    pub span: TimeSpan,
}

impl AssignmentRecord {
    pub fn new(
        machine: impl Into<String>,
        order_number: impl Into<String>,
        customer: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            machine: Some(machine.into()),
            order_number: Some(order_number.into()),
            customer: Some(customer.into()),
            start,
            end,
        }
    }

    pub fn validate(&self) -> Result<ValidatedRecord> {
        fn required(value: &Option<String>, field: &'static str) -> Result<String> {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(Error::InvalidRecord(field)),
            }
        }

        Ok(ValidatedRecord {
            machine: required(&self.machine, "machine")?,
            order_number: required(&self.order_number, "work order")?,
            customer: required(&self.customer, "customer")?,
            span: TimeSpan::new(self.start, self.end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn span_rejects_non_chronological() {
        let err = TimeSpan::new(at(10, 0, 0), at(10, 0, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInterval);
        assert!(TimeSpan::new(at(11, 0, 0), at(10, 0, 0)).is_err());
    }

    #[test]
    fn span_rejects_sub_minute_length() {
        // Both instants fall in the same minute once truncated.
        assert!(TimeSpan::new(at(10, 0, 5), at(10, 0, 50)).is_err());
    }

    #[test]
    fn span_truncates_to_minute() {
        let span = TimeSpan::new(at(9, 58, 30), at(10, 28, 59)).unwrap();
        assert_eq!(span.start(), at(9, 58, 0));
        assert_eq!(span.end(), at(10, 28, 0));
        assert_eq!(span.axis().duration().value(), 30.0);
    }

    #[test]
    fn span_overlap_is_inclusive() {
        let a = TimeSpan::new(at(10, 0, 0), at(11, 0, 0)).unwrap();
        let b = TimeSpan::new(at(11, 0, 0), at(12, 0, 0)).unwrap();
        let c = TimeSpan::new(at(11, 1, 0), at(12, 0, 0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(a.axis().overlaps(&b.axis()));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn new_assignment_is_scheduled() {
        let span = TimeSpan::new(at(9, 0, 0), at(10, 0, 0)).unwrap();
        let a = Assignment::new("m1", "w1", span);
        assert_eq!(a.status(), AssignmentStatus::Scheduled);
        assert_eq!(a.status().to_string(), "scheduled");
        assert_eq!(a.machine_id(), "m1");
        assert_eq!(a.work_order_id(), "w1");
    }

    #[test]
    fn record_requires_references() {
        let mut record = AssignmentRecord::new("KON3", "MFG-1", "ATLAS", at(9, 58, 0), at(10, 28, 0));
        assert!(record.validate().is_ok());

        record.machine = None;
        assert_eq!(record.validate().unwrap_err(), Error::InvalidRecord("machine"));

        record.machine = Some("KON3".into());
        record.order_number = Some("   ".into());
        assert_eq!(record.validate().unwrap_err(), Error::InvalidRecord("work order"));
    }

    #[test]
    fn record_rejects_reversed_interval() {
        let record = AssignmentRecord::new("KON3", "MFG-1", "ATLAS", at(10, 28, 0), at(9, 58, 0));
        assert_eq!(record.validate().unwrap_err().kind(), ErrorKind::InvalidInterval);
    }
}
