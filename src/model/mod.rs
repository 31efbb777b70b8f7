//! Shop-floor records: machines, work orders and their time-bound assignments.
//!
//! Records are validated at construction. Anything that reaches the scheduler
//! or the timeline already satisfies `end > start` and carries non-empty
//! machine and work-order references.

mod assignment;
mod machine;
mod work_order;

pub use assignment::{
    Assignment, AssignmentRecord, AssignmentStatus, AssignmentView, TimeSpan,
    ValidatedRecord,
};
pub use machine::Machine;
pub use work_order::{OrderNumber, WorkOrder, DEFAULT_ORDER_PREFIX};
