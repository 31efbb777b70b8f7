//! Conflict-checked assignment of work orders to machines.
//!
//! [`Scheduler::propose_assignment`] is the only way new assignments enter the
//! system at run time. A proposal is accepted only if, under the order-book
//! lock:
//!
//! 1. the order number resolves (explicit counter, or `max(existing) + 1`),
//! 2. the machine does not already carry that work order,
//! 3. no assignment on the machine overlaps the proposed span (inclusive
//!    bounds: touching intervals conflict),
//! 4. no assignment of a work order whose number starts with the resolved
//!    number begins at the very same minute.
//!
//! Only then are the work order (if new) and the assignment written, in one
//! [`AssignmentStore::book`] call, so a rejected proposal leaves the store
//! untouched.
//!
//! # Concurrency
//!
//! Steps 1–4 and the write run inside one global critical section. The
//! checks read across machines (a work order's other assignments, every
//! order number), so two proposals on different machines can still race
//! for the same order number or start minute. Every proposal and every bulk
//! record therefore takes the same order-book lock.

mod config;
mod locks;


pub use config::{MalformedOrderPolicy, SchedulerConfig};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{
    Assignment, AssignmentRecord, AssignmentView, Machine, OrderNumber, TimeSpan, WorkOrder,
};
use crate::store::{AssignmentFilter, AssignmentStore, Booking, MemoryStore};
use crate::Id;
use locks::OrderBookLock;

/// How the order number of a proposal is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderRule {
    /// Use `<prefix>-<counter>`, creating or reusing that work order.
    Explicit(u64),
    /// Use one more than the highest counter among existing work orders.
    Next,
}

/// A request to book a machine for a work order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proposal {
    pub machine_id: Id,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub order: OrderRule,
    /// Customer of the work order if the proposal creates it.
    pub customer: String,
}

/// An accepted proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub work_order: WorkOrder,
    pub assignment: Assignment,
}

/// Outcome of [`Scheduler::bulk_load`].
#[derive(Debug, Default)]
pub struct BulkLoadReport {
    pub loaded: usize,
    /// Index of each rejected record in the input, with the reason.
    pub rejected: Vec<(usize, Error)>,
}

/// Decides which proposals become assignments.
#[derive(Debug)]
pub struct Scheduler<S: AssignmentStore = MemoryStore> {
    store: S,
    config: SchedulerConfig,
    order_book: OrderBookLock,
}

impl Scheduler<MemoryStore> {
    /// Scheduler over an empty [`MemoryStore`].
    pub fn in_memory(config: SchedulerConfig) -> Result<Self> {
        Self::new(MemoryStore::new(), config)
    }
}

impl<S: AssignmentStore> Scheduler<S> {
    pub fn new(store: S, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            order_book: OrderBookLock::default(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn register_machine(&self, name: &str, description: &str) -> Result<Machine> {
        if name.trim().is_empty() {
            return Err(Error::InvalidRecord("machine"));
        }
        self.store.create_machine(name, description)
    }

    /// Validates `proposal` against the existing assignments and persists it.
    ///
    /// See the module documentation for the checks and their order.
    pub fn propose_assignment(&self, proposal: Proposal) -> Result<Scheduled> {
        match self.decide(&proposal) {
            Ok(scheduled) => {
                info!(
                    machine_id = %proposal.machine_id,
                    order = %scheduled.work_order.order_number(),
                    start = %scheduled.assignment.start(),
                    end = %scheduled.assignment.end(),
                    "assignment scheduled"
                );
                Ok(scheduled)
            }
            Err(err) => {
                warn!(
                    machine_id = %proposal.machine_id,
                    kind = %err.kind(),
                    error = %err,
                    "proposal rejected"
                );
                Err(err)
            }
        }
    }

    fn decide(&self, proposal: &Proposal) -> Result<Scheduled> {
        if proposal.machine_id.trim().is_empty() {
            return Err(Error::InvalidRecord("machine"));
        }
        if proposal.customer.trim().is_empty() {
            return Err(Error::InvalidRecord("customer"));
        }
        let span = TimeSpan::new(proposal.start, proposal.end)?;
        let machine = self
            .store
            .machine(&proposal.machine_id)
            .ok_or_else(|| Error::MachineNotFound(proposal.machine_id.clone()))?;

        let _order_book = self.order_book.acquire();

        let order_number = match proposal.order {
            OrderRule::Explicit(counter) => OrderNumber::new(self.config.order_prefix.as_str(), counter),
            OrderRule::Next => self.derive_next_order_number()?,
        }
        .to_string();

        self.check_binding(&machine, &order_number)?;
        self.check_overlap(&machine, span)?;
        self.check_start_collision(&order_number, span)?;

        let Booking {
            work_order,
            assignment,
        } = self
            .store
            .book(machine.id(), &order_number, proposal.customer.trim(), span)?;

        Ok(Scheduled {
            work_order,
            assignment,
        })
    }

    /// The number a [`OrderRule::Next`] proposal would receive right now.
    pub fn next_order_number(&self) -> Result<OrderNumber> {
        let _order_book = self.order_book.acquire();
        self.derive_next_order_number()
    }

    fn derive_next_order_number(&self) -> Result<OrderNumber> {
        let prefix = self.config.order_prefix.as_str();
        let mut highest: Option<OrderNumber> = None;

        for work_order in self.store.work_orders() {
            match OrderNumber::parse(prefix, work_order.order_number()) {
                Ok(number) => {
                    if highest.as_ref().map_or(true, |h| number.counter() > h.counter()) {
                        highest = Some(number);
                    }
                }
                Err(err) => match self.config.malformed_orders {
                    MalformedOrderPolicy::Abort => return Err(err),
                    MalformedOrderPolicy::Skip => {
                        warn!(order = %work_order.order_number(), "skipping malformed order number");
                    }
                },
            }
        }

        let next = highest.map_or_else(|| OrderNumber::new(prefix, 1), |h| h.next());
        debug!(order = %next, "derived next order number");
        Ok(next)
    }

    fn check_binding(&self, machine: &Machine, order_number: &str) -> Result<()> {
        let Some(work_order) = self.store.work_order(order_number) else {
            return Ok(());
        };
        let bound = self.store.find_assignments(&|a| {
            a.machine_id() == machine.id() && a.work_order_id() == work_order.id()
        });
        if bound.is_empty() {
            Ok(())
        } else {
            Err(Error::DuplicateBinding {
                machine: machine.name().to_string(),
                order_number: order_number.to_string(),
            })
        }
    }

    fn check_overlap(&self, machine: &Machine, span: TimeSpan) -> Result<()> {
        match self.store.overlapping(machine.id(), span.axis())?.first() {
            None => Ok(()),
            Some(existing) => Err(Error::TimeOverlap {
                machine: machine.name().to_string(),
                existing: existing.id().to_string(),
                start: existing.start(),
                end: existing.end(),
            }),
        }
    }

    /// O(work orders + assignments) scan.
    fn check_start_collision(&self, order_number: &str, span: TimeSpan) -> Result<()> {
        let related: Vec<Id> = self
            .store
            .work_orders()
            .into_iter()
            .filter(|wo| wo.order_number().starts_with(order_number))
            .map(|wo| wo.id().to_string())
            .collect();
        if related.is_empty() {
            return Ok(());
        }

        let colliding = self.store.find_assignments(&|a| {
            a.start() == span.start() && related.iter().any(|id| id == a.work_order_id())
        });
        match colliding.first() {
            None => Ok(()),
            Some(existing) => Err(Error::ExactStartCollision {
                order_number: order_number.to_string(),
                existing: existing.id().to_string(),
                start: existing.start(),
            }),
        }
    }

    /// Every assignment with its machine and work order, ordered by start.
    pub fn timeline(&self) -> Vec<AssignmentView> {
        self.store.list_assignments(&AssignmentFilter::all())
    }

    /// All assignments of one work order, ordered by start.
    ///
    /// `NotFound` if the order has no assignments.
    pub fn find_order(&self, order_number: &str) -> Result<Vec<AssignmentView>> {
        let order_number = order_number.trim();
        let views = self
            .store
            .list_assignments(&AssignmentFilter::order(order_number));
        if views.is_empty() {
            return Err(Error::WorkOrderNotFound(order_number.to_string()));
        }
        Ok(views)
    }

    /// Loads pre-planned assignments, e.g. a seed data set.
    ///
    /// Each record is validated and must name a registered machine. The
    /// binding and overlap invariants still hold; the start-collision guard,
    /// which only protects number generation, is not applied. Rejected
    /// records are reported and skipped, the rest are loaded.
    pub fn bulk_load<I>(&self, records: I) -> BulkLoadReport
    where
        I: IntoIterator<Item = AssignmentRecord>,
    {
        let mut report = BulkLoadReport::default();
        for (index, record) in records.into_iter().enumerate() {
            match self.load_record(&record) {
                Ok(_) => report.loaded += 1,
                Err(err) => {
                    warn!(
                        index,
                        machine = ?record.machine,
                        order = ?record.order_number,
                        kind = %err.kind(),
                        error = %err,
                        "record rejected"
                    );
                    report.rejected.push((index, err));
                }
            }
        }
        info!(
            loaded = report.loaded,
            rejected = report.rejected.len(),
            "bulk load finished"
        );
        report
    }

    fn load_record(&self, record: &AssignmentRecord) -> Result<Assignment> {
        let record = record.validate()?;
        let machine = self
            .store
            .machine_by_name(&record.machine)
            .ok_or_else(|| Error::MachineNotFound(record.machine.clone()))?;

        let _order_book = self.order_book.acquire();

        self.check_binding(&machine, &record.order_number)?;
        self.check_overlap(&machine, record.span)?;
        let booking = self
            .store
            .book(machine.id(), &record.order_number, &record.customer, record.span)?;
        Ok(booking.assignment)
    }
}
