//! Persistence collaborator used by the scheduler.
//!
//! The scheduler only talks to storage through [`AssignmentStore`]. Creates
//! must be visible to every query issued afterwards, so a proposal can check
//! and write under one critical section and trust what it read.

mod memory;

pub use memory::MemoryStore;

use qtty::Minute;

use crate::error::Result;
use crate::interval::Interval;
use crate::model::{Assignment, AssignmentView, Machine, TimeSpan, WorkOrder};
use crate::schedule::ScheduleError;

/// Narrows [`AssignmentStore::list_assignments`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentFilter {
    pub machine_id: Option<String>,
    pub order_number: Option<String>,
}

impl AssignmentFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn machine(machine_id: impl Into<String>) -> Self {
        Self {
            machine_id: Some(machine_id.into()),
            ..Self::default()
        }
    }

    pub fn order(order_number: impl Into<String>) -> Self {
        Self {
            order_number: Some(order_number.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, view: &AssignmentView) -> bool {
        self.machine_id
            .as_deref()
            .map_or(true, |id| view.assignment.machine_id() == id)
            && self
                .order_number
                .as_deref()
                .map_or(true, |number| view.order_number == number)
    }
}

/// Result of [`AssignmentStore::book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub work_order: WorkOrder,
    pub assignment: Assignment,
}

/// Storage of machines, work orders and assignments.
pub trait AssignmentStore: Send + Sync {
    fn machine(&self, id: &str) -> Option<Machine>;

    fn machine_by_name(&self, name: &str) -> Option<Machine>;

    /// Machines in registration order.
    fn machines(&self) -> Vec<Machine>;

    /// Registers a machine; names are unique.
    fn create_machine(&self, name: &str, description: &str) -> Result<Machine>;

    fn work_orders(&self) -> Vec<WorkOrder>;

    fn work_order(&self, order_number: &str) -> Option<WorkOrder>;

    /// Returns the work order numbered `order_number`, creating it for
    /// `customer` if it does not exist yet. An existing order keeps its
    /// customer.
    fn create_work_order(&self, order_number: &str, customer: &str) -> WorkOrder;

    /// Persists a `scheduled` assignment.
    ///
    /// Fails with `NotFound` for unknown references and `TimeOverlap` if the
    /// machine is already booked over `span`.
    fn create_assignment(&self, machine_id: &str, work_order_id: &str, span: TimeSpan) -> Result<Assignment>;

    /// Books `machine_id` for the work order `order_number` over `span` in a
    /// single write. The work order is created for `customer` only if the
    /// assignment is accepted; on error nothing is stored.
    ///
    /// Fails with `NotFound` for an unknown machine and `TimeOverlap` if the
    /// machine is already booked over `span`.
    fn book(&self, machine_id: &str, order_number: &str, customer: &str, span: TimeSpan) -> Result<Booking>;

    fn find_assignments(&self, predicate: &dyn Fn(&Assignment) -> bool) -> Vec<Assignment>;

    /// Joined assignments matching `filter`, ordered by start, then machine
    /// name, then order number.
    fn list_assignments(&self, filter: &AssignmentFilter) -> Vec<AssignmentView>;

    /// Assignments of `machine_id` overlapping `interval` (inclusive).
    ///
    /// The default is a full O(n) scan; stores with a per-machine index should
    /// override it and report index failures instead of an empty result.
    fn overlapping(&self, machine_id: &str, interval: Interval<Minute>) -> Result<Vec<Assignment>> {
        if interval.start().value().is_nan() || interval.end().value().is_nan() {
            return Err(ScheduleError::NaNTime.into());
        }
        Ok(self.find_assignments(&|a| a.machine_id() == machine_id && a.span().axis().overlaps(&interval)))
    }
}
