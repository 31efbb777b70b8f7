use std::fmt;

use crate::error::{Error, Result};
use crate::{generate_id, Id};

/// Prefix of generated order numbers (`MFG-1`, `MFG-2`, ...).
pub const DEFAULT_ORDER_PREFIX: &str = "MFG";

/// Sequential order number `<prefix>-<counter>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber {
    prefix: String,
    counter: u64,
}

impl OrderNumber {
    pub fn new(prefix: impl Into<String>, counter: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter,
        }
    }

    /// Parses `text` as `<prefix>-<counter>`.
    ///
    /// Anything else (another prefix, a missing dash, a non-numeric or signed
    /// suffix) is `MalformedOrderNumber`.
    ///
    /// ```
    /// use shopgantt::model::OrderNumber;
    ///
    /// assert_eq!(OrderNumber::parse("MFG", "MFG-12").unwrap().counter(), 12);
    /// assert!(OrderNumber::parse("MFG", "MFG-x").is_err());
    /// ```
    pub fn parse(prefix: &str, text: &str) -> Result<Self> {
        text.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(|counter| Self::new(prefix, counter))
            .ok_or_else(|| Error::MalformedOrderNumber(text.to_string()))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The number that follows this one under the same prefix.
    pub fn next(&self) -> Self {
        Self::new(self.prefix.clone(), self.counter.saturating_add(1))
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.counter)
    }
}

/// A production job: an order number and the customer it is made for.
///
/// The order number is kept as text because stored data is not guaranteed to
/// follow the current prefix scheme; [`OrderNumber::parse`] decides whether
/// it does.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkOrder {
    id: Id,
    order_number: String,
    customer: String,
}

impl WorkOrder {
    pub fn new(order_number: impl Into<String>, customer: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            order_number: order_number.into(),
            customer: customer.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn formats_with_prefix() {
        assert_eq!(OrderNumber::new("MFG", 7).to_string(), "MFG-7");
        assert_eq!(OrderNumber::new("MFG", 7).next().to_string(), "MFG-8");
    }

    #[test]
    fn parses_numeric_suffix() {
        let n = OrderNumber::parse("MFG", "MFG-20").unwrap();
        assert_eq!(n.counter(), 20);
        assert_eq!(n.prefix(), "MFG");
    }

    #[test]
    fn rejects_malformed_numbers() {
        for bad in ["MFG-", "MFG-1a", "MFG--1", "MFG-+1", "MFG7", "PRT-7", "", "MFG-1-2"] {
            let err = OrderNumber::parse("MFG", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedOrderNumber, "{bad}");
        }
    }

    #[test]
    fn rejects_overflowing_counter() {
        assert!(OrderNumber::parse("MFG", "MFG-99999999999999999999999").is_err());
    }

    #[test]
    fn work_order_accessors() {
        let wo = WorkOrder::new("MFG-1", "ATLAS");
        assert_eq!(wo.order_number(), "MFG-1");
        assert_eq!(wo.customer(), "ATLAS");
        assert!(!wo.id().is_empty());
    }
}
