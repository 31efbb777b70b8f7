use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use qtty::Minute;
use tracing::debug;

use super::{AssignmentFilter, AssignmentStore, Booking};
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::model::{Assignment, AssignmentView, Machine, TimeSpan, WorkOrder};
use crate::schedule::Schedule;
use crate::Id;

#[derive(Debug, Default)]
struct Tables {
    machines: Vec<Machine>,
    machine_by_id: HashMap<Id, usize>,
    machine_by_name: HashMap<String, usize>,
    /// Keyed by order number; ids are resolved through `order_by_id`.
    work_orders: BTreeMap<String, WorkOrder>,
    order_by_id: HashMap<Id, String>,
    assignments: Vec<Assignment>,
    assignment_by_id: HashMap<Id, usize>,
    /// Per-machine interval index over `assignments`.
    schedules: HashMap<Id, Schedule<Minute>>,
}

impl Tables {
    fn view(&self, assignment: &Assignment) -> Option<AssignmentView> {
        let machine = &self.machines[*self.machine_by_id.get(assignment.machine_id())?];
        let order_number = self.order_by_id.get(assignment.work_order_id())?;
        let work_order = self.work_orders.get(order_number)?;
        Some(AssignmentView {
            assignment: assignment.clone(),
            machine_name: machine.name().to_string(),
            order_number: work_order.order_number().to_string(),
            customer: work_order.customer().to_string(),
        })
    }

    fn machine_name(&self, machine_id: &str) -> Result<String> {
        match self.machine_by_id.get(machine_id) {
            Some(&i) => Ok(self.machines[i].name().to_string()),
            None => Err(Error::MachineNotFound(machine_id.to_string())),
        }
    }

    /// `TimeOverlap` if the machine is booked anywhere over `span`.
    fn check_free(&self, machine_id: &str, machine_name: &str, span: TimeSpan) -> Result<()> {
        let Some(schedule) = self.schedules.get(machine_id) else {
            return Ok(());
        };
        match schedule.first_conflict(span.axis())? {
            None => Ok(()),
            Some(existing) => {
                let booked = self.assignments[self.assignment_by_id[existing.id()]].span();
                Err(Error::TimeOverlap {
                    machine: machine_name.to_string(),
                    existing: existing.id().to_string(),
                    start: booked.start(),
                    end: booked.end(),
                })
            }
        }
    }

    fn commit_work_order(&mut self, work_order: WorkOrder) {
        let order_number = work_order.order_number().to_string();
        debug!(order = %order_number, customer = %work_order.customer(), "work order created");
        self.order_by_id
            .insert(work_order.id().to_string(), order_number.clone());
        self.work_orders.insert(order_number, work_order);
    }

    /// Indexes first, so a rejected insert leaves the tables as they were.
    fn commit_assignment(&mut self, assignment: Assignment) -> Result<()> {
        self.schedules
            .entry(assignment.machine_id().to_string())
            .or_default()
            .insert(assignment.id(), assignment.span().axis())?;
        self.assignment_by_id
            .insert(assignment.id().to_string(), self.assignments.len());
        self.assignments.push(assignment);
        Ok(())
    }
}

/// In-memory [`AssignmentStore`].
///
/// All tables sit behind one `RwLock`, so every create is observed by the
/// next query. A lock poisoned by a panicking writer is recovered: the
/// tables are only mutated after all checks pass, so they are never left
/// half-written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn assignment_count(&self) -> usize {
        self.read().assignments.len()
    }
}

impl AssignmentStore for MemoryStore {
    fn machine(&self, id: &str) -> Option<Machine> {
        let tables = self.read();
        tables.machine_by_id.get(id).map(|&i| tables.machines[i].clone())
    }

    fn machine_by_name(&self, name: &str) -> Option<Machine> {
        let tables = self.read();
        tables.machine_by_name.get(name).map(|&i| tables.machines[i].clone())
    }

    fn machines(&self) -> Vec<Machine> {
        self.read().machines.clone()
    }

    fn create_machine(&self, name: &str, description: &str) -> Result<Machine> {
        let mut tables = self.write();
        if tables.machine_by_name.contains_key(name) {
            return Err(Error::DuplicateMachine(name.to_string()));
        }
        let machine = Machine::new(name, description);
        let index = tables.machines.len();
        tables.machine_by_id.insert(machine.id().to_string(), index);
        tables.machine_by_name.insert(name.to_string(), index);
        tables.machines.push(machine.clone());
        debug!(machine = %name, id = %machine.id(), "machine registered");
        Ok(machine)
    }

    fn work_orders(&self) -> Vec<WorkOrder> {
        self.read().work_orders.values().cloned().collect()
    }

    fn work_order(&self, order_number: &str) -> Option<WorkOrder> {
        self.read().work_orders.get(order_number).cloned()
    }

    fn create_work_order(&self, order_number: &str, customer: &str) -> WorkOrder {
        let mut tables = self.write();
        if let Some(existing) = tables.work_orders.get(order_number) {
            return existing.clone();
        }
        let work_order = WorkOrder::new(order_number, customer);
        tables.commit_work_order(work_order.clone());
        work_order
    }

    fn create_assignment(&self, machine_id: &str, work_order_id: &str, span: TimeSpan) -> Result<Assignment> {
        let mut tables = self.write();
        let machine_name = tables.machine_name(machine_id)?;
        if !tables.order_by_id.contains_key(work_order_id) {
            return Err(Error::WorkOrderNotFound(work_order_id.to_string()));
        }
        tables.check_free(machine_id, &machine_name, span)?;

        let assignment = Assignment::new(machine_id, work_order_id, span);
        tables.commit_assignment(assignment.clone())?;
        Ok(assignment)
    }

    fn book(&self, machine_id: &str, order_number: &str, customer: &str, span: TimeSpan) -> Result<Booking> {
        let mut tables = self.write();
        let machine_name = tables.machine_name(machine_id)?;
        tables.check_free(machine_id, &machine_name, span)?;

        let existing = tables.work_orders.get(order_number).cloned();
        let is_new = existing.is_none();
        let work_order = existing.unwrap_or_else(|| WorkOrder::new(order_number, customer));
        let assignment = Assignment::new(machine_id, work_order.id(), span);
        tables.commit_assignment(assignment.clone())?;
        if is_new {
            tables.commit_work_order(work_order.clone());
        }
        Ok(Booking {
            work_order,
            assignment,
        })
    }

    fn find_assignments(&self, predicate: &dyn Fn(&Assignment) -> bool) -> Vec<Assignment> {
        self.read()
            .assignments
            .iter()
            .filter(|a| predicate(a))
            .cloned()
            .collect()
    }

    fn list_assignments(&self, filter: &AssignmentFilter) -> Vec<AssignmentView> {
        let tables = self.read();
        let mut views: Vec<AssignmentView> = tables
            .assignments
            .iter()
            .filter_map(|a| tables.view(a))
            .filter(|v| filter.matches(v))
            .collect();
        views.sort_by(|a, b| {
            a.start()
                .cmp(&b.start())
                .then_with(|| a.machine_name.cmp(&b.machine_name))
                .then_with(|| a.order_number.cmp(&b.order_number))
        });
        views
    }

    fn overlapping(&self, machine_id: &str, interval: Interval<Minute>) -> Result<Vec<Assignment>> {
        let tables = self.read();
        let Some(schedule) = tables.schedules.get(machine_id) else {
            return Ok(Vec::new());
        };
        let found = schedule
            .conflicts(interval)?
            .filter_map(|e| tables.assignment_by_id.get(e.id()))
            .map(|&i| tables.assignments[i].clone())
            .collect();
        Ok(found)
    }
}
