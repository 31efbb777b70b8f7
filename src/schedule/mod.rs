use crate::interval::Interval;
use crate::Id;
use qtty::Quantity;
use std::collections::{BTreeMap, HashMap};
pub mod entry_key;
pub mod errors;
use entry_key::*;
pub use errors::ScheduleError;


/// Non-overlapping intervals of one machine, sorted by start time.
///
/// Every machine owns one `Schedule`. It is the index behind the
/// "no double booking" rule: an interval is only admitted if it does not
/// overlap (inclusively) any interval already present.
///
/// # Internal Structure
/// - `by_start`: `BTreeMap` from start time to entry
/// - `start_by_id`: `HashMap` from entry id to start time
///
/// Starts are unique because admitted intervals never overlap.
///
/// # Complexity
/// - `insert`: O(log n) with O(1) neighbour overlap checks
/// - `first_conflict`: O(log n)
/// - `conflicts`: O(log n + k) where k is the number of conflicts
///
/// # Examples
///
/// ```
/// use shopgantt::schedule::Schedule;
/// use shopgantt::interval::Interval;
/// use qtty::Minute;
///
/// let mut schedule = Schedule::<Minute>::new();
/// schedule.insert("a", Interval::from_f64(0.0, 60.0)).unwrap();
/// schedule.insert("b", Interval::from_f64(90.0, 120.0)).unwrap();
///
/// // Touching the end of "a" is a conflict.
/// assert!(!schedule.is_free(Interval::from_f64(60.0, 80.0)).unwrap());
/// assert!(schedule.is_free(Interval::from_f64(61.0, 89.0)).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Schedule<U: qtty::Unit> {
    by_start: BTreeMap<F64Key, Entry<U>>,
    start_by_id: HashMap<Id, F64Key>,
}

impl<U: qtty::Unit> Default for Schedule<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: qtty::Unit> Schedule<U> {
    pub fn new() -> Self {
        Self {
            by_start: BTreeMap::new(),
            start_by_id: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    fn key(q: Quantity<U>) -> Result<F64Key, ScheduleError> {
        let v = q.value();
        if v.is_nan() {
            Err(ScheduleError::NaNTime)
        } else {
            Ok(F64Key(v))
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.start_by_id.contains_key(id)
    }

    pub fn get_interval(&self, id: &str) -> Option<Interval<U>> {
        let start = self.start_by_id.get(id)?;
        self.by_start.get(start).map(|e| e.interval)
    }

    /// Returns the first indexed entry overlapping `query`, if any.
    ///
    /// Only the predecessor (latest start <= query.start) and the successor
    /// (earliest start >= query.start) can overlap first, since the indexed
    /// intervals are disjoint and sorted.
    pub fn first_conflict(&self, query: Interval<U>) -> Result<Option<&Entry<U>>, ScheduleError> {
        let start_k = Self::key(query.start())?;
        Self::key(query.end())?;

        if let Some((_k, prev)) = self.by_start.range(..=start_k).next_back() {
            if prev.interval.overlaps(&query) {
                return Ok(Some(prev));
            }
        }

        if let Some((_k, next)) = self.by_start.range(start_k..).next() {
            if next.interval.overlaps(&query) {
                return Ok(Some(next));
            }
        }

        Ok(None)
    }

    /// Admits `id` over `interval`.
    ///
    /// Requires:
    /// - `id` not already present
    /// - interval times not NaN
    /// - interval does not overlap any existing interval
    pub fn insert(&mut self, id: impl Into<Id>, interval: Interval<U>) -> Result<(), ScheduleError> {
        let id: Id = id.into();
        if self.contains(&id) {
            return Err(ScheduleError::DuplicateEntry(id));
        }

        if let Some(existing) = self.first_conflict(interval)? {
            return Err(ScheduleError::OverlapsExisting {
                new_id: id,
                existing_id: existing.id.clone(),
            });
        }

        let start_k = Self::key(interval.start())?;
        self.by_start.insert(
            start_k,
            Entry {
                id: id.clone(),
                interval,
            },
        );
        self.start_by_id.insert(id, start_k);
        Ok(())
    }

    /// Iterates over every entry overlapping `query`, in start order.
    pub fn conflicts<'a>(
        &'a self,
        query: Interval<U>,
    ) -> Result<impl Iterator<Item = &'a Entry<U>> + 'a, ScheduleError> {
        let q_start_k = Self::key(query.start())?;
        let q_end = Self::key(query.end())?.value();

        // The predecessor may start before the query and still reach into it.
        let range_start = match self.by_start.range(..=q_start_k).next_back() {
            Some((k, prev)) if prev.interval.overlaps(&query) => *k,
            _ => q_start_k,
        };

        Ok(self
            .by_start
            .range(range_start..)
            .take_while(move |(k, _e)| k.0 <= q_end)
            .map(|(_k, e)| e)
            .filter(move |e| e.interval.overlaps(&query)))
    }

    /// Checks if an interval can be inserted without conflicts.
    pub fn is_free(&self, query: Interval<U>) -> Result<bool, ScheduleError> {
        Ok(self.first_conflict(query)?.is_none())
    }

    /// Entries in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<U>> + '_ {
        self.by_start.values()
    }

    pub fn earliest_start(&self) -> Option<Quantity<U>> {
        self.by_start.values().next().map(|e| e.interval.start())
    }

    pub fn latest_end(&self) -> Option<Quantity<U>> {
        self.by_start.values().next_back().map(|e| e.interval.end())
    }
}
