use std::fmt;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::schedule::ScheduleError;
use crate::Id;

/// Every failure the scheduler, the store and the timeline can report.
///
/// All variants are synchronous validation failures: retrying the same call
/// with the same input fails the same way. Use [`Error::kind`] to branch on
/// the failure class; the message text is for humans.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Machine not found: {0}")]
    MachineNotFound(String),

    #[error("Work order not found: {0}")]
    WorkOrderNotFound(String),

    #[error("Work order {order_number} is already assigned to machine {machine}")]
    DuplicateBinding { machine: String, order_number: String },

    #[error("Machine {machine} already has assignment {existing} between {start} and {end}")]
    TimeOverlap {
        machine: String,
        existing: Id,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Assignment {existing} of a work order numbered {order_number}* already starts at {start}")]
    ExactStartCollision {
        order_number: String,
        existing: Id,
        start: NaiveDateTime,
    },

    #[error("Interval end {end} must be after start {start}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Cannot lay out a timeline without assignments")]
    EmptyDataSet,

    #[error("Malformed order number: {0}")]
    MalformedOrderNumber(String),

    #[error("Machine name already registered: {0}")]
    DuplicateMachine(String),

    #[error("Record is missing its {0}")]
    InvalidRecord(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Index(#[from] ScheduleError),
}

/// Stable, machine-readable failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    NotFound,
    DuplicateBinding,
    TimeOverlap,
    ExactStartCollision,
    InvalidInterval,
    EmptyDataSet,
    MalformedOrderNumber,
    DuplicateMachine,
    InvalidRecord,
    InvalidConfig,
}

impl ErrorKind {
    /// Snake-case code suitable for wire formats and log fields.
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::DuplicateBinding => "duplicate_binding",
            ErrorKind::TimeOverlap => "time_overlap",
            ErrorKind::ExactStartCollision => "exact_start_collision",
            ErrorKind::InvalidInterval => "invalid_interval",
            ErrorKind::EmptyDataSet => "empty_data_set",
            ErrorKind::MalformedOrderNumber => "malformed_order_number",
            ErrorKind::DuplicateMachine => "duplicate_machine",
            ErrorKind::InvalidRecord => "invalid_record",
            ErrorKind::InvalidConfig => "invalid_config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MachineNotFound(_) | Error::WorkOrderNotFound(_) => ErrorKind::NotFound,
            Error::DuplicateBinding { .. } => ErrorKind::DuplicateBinding,
            Error::TimeOverlap { .. } => ErrorKind::TimeOverlap,
            Error::ExactStartCollision { .. } => ErrorKind::ExactStartCollision,
            Error::InvalidInterval { .. } => ErrorKind::InvalidInterval,
            Error::EmptyDataSet => ErrorKind::EmptyDataSet,
            Error::MalformedOrderNumber(_) => ErrorKind::MalformedOrderNumber,
            Error::DuplicateMachine(_) => ErrorKind::DuplicateMachine,
            Error::InvalidRecord(_) => ErrorKind::InvalidRecord,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Error::Index(ScheduleError::OverlapsExisting { .. }) => ErrorKind::TimeOverlap,
            Error::Index(ScheduleError::DuplicateEntry(_)) => ErrorKind::DuplicateBinding,
            Error::Index(ScheduleError::NaNTime) => ErrorKind::InvalidInterval,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
