use crate::interval::Interval;
use crate::Id;

/// A total-order key for `f64` using IEEE-754 total order (`total_cmp`).
/// This lets axis positions be used as `BTreeMap` keys.
///
/// NaN is rejected before a key is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct F64Key(pub(crate) f64);

impl F64Key {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for F64Key {}

impl Ord for F64Key {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for F64Key {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// An indexed interval together with the id of the record that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<U: qtty::Unit> {
    pub(crate) id: Id,
    pub(crate) interval: Interval<U>,
}

impl<U: qtty::Unit> Entry<U> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn interval(&self) -> Interval<U> {
        self.interval
    }
}
