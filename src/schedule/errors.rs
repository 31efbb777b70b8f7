use thiserror::Error;

use crate::Id;

/// Failures raised by the per-machine interval index.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Entry id is already present in the schedule
    #[error("Entry {0} already exists in schedule")]
    DuplicateEntry(Id),

    /// A time value was NaN, which is not allowed
    #[error("Time value cannot be NaN")]
    NaNTime,

    /// New interval overlaps with an existing interval
    #[error("Entry {new_id} overlaps with existing entry {existing_id}")]
    OverlapsExisting { new_id: Id, existing_id: Id },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlaps_existing_display() {
        let e = ScheduleError::OverlapsExisting {
            new_id: "b".to_string(),
            existing_id: "a".to_string(),
        };
        assert_eq!(e.to_string(), "Entry b overlaps with existing entry a");
    }

    #[test]
    fn duplicate_entry_display() {
        let e = ScheduleError::DuplicateEntry("a".to_string());
        assert_eq!(e.to_string(), "Entry a already exists in schedule");
    }
}
