//! shopgantt - work-order scheduling and Gantt timeline layout for a shop floor
//!
//! Two engines share one data model:
//!
//! - [`scheduler`] decides whether a work order may occupy a machine over a
//!   time interval, rejecting double bookings, duplicate bindings and
//!   start-time collisions, and derives sequential order numbers.
//! - [`timeline`] lays out a snapshot of assignments as a Gantt chart (one
//!   row per machine, a padded time axis, one bar per assignment) and
//!   resolves pointer positions to bars for tooltips and highlighting.

pub mod error;
pub mod interval;
pub mod model;
pub mod schedule;
pub mod scheduler;
pub mod seed;
pub mod store;
pub mod timeline;
pub mod units;

pub use error::{Error, ErrorKind, Result};
pub use scheduler::{OrderRule, Proposal, Scheduled, Scheduler, SchedulerConfig};
pub use timeline::{Layout, LayoutConfig, Timeline};
// Re-export unit conversion traits for ergonomic use
pub use units::{convert, SameDim};

/// Identifier type used for machines, work orders and assignments.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
