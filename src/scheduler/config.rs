//! Configuration of the scheduler.

use crate::error::{Error, Result};
use crate::model::DEFAULT_ORDER_PREFIX;

/// What to do with a stored order number that does not parse while the next
/// counter is being derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MalformedOrderPolicy {
    /// Fail the proposal with `MalformedOrderNumber`.
    #[default]
    Abort,
    /// Ignore the record and log a warning.
    Skip,
}

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Prefix of generated order numbers, `MFG` gives `MFG-1`, `MFG-2`, ...
    pub order_prefix: String,
    pub malformed_orders: MalformedOrderPolicy,
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.order_prefix.trim().is_empty() {
            return Err(Error::InvalidConfig("order_prefix must not be empty".into()));
        }
        if self.order_prefix.ends_with('-') {
            return Err(Error::InvalidConfig("order_prefix must not end with '-'".into()));
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            order_prefix: DEFAULT_ORDER_PREFIX.to_string(),
            malformed_orders: MalformedOrderPolicy::Abort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.order_prefix, "MFG");
        assert_eq!(cfg.malformed_orders, MalformedOrderPolicy::Abort);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let cfg = SchedulerConfig {
            order_prefix: " ".into(),
            ..SchedulerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_json() {
        let cfg: SchedulerConfig = serde_json::from_str(r#"{"malformed_orders":"skip"}"#).unwrap();
        assert_eq!(cfg.order_prefix, "MFG");
        assert_eq!(cfg.malformed_orders, MalformedOrderPolicy::Skip);
    }
}
