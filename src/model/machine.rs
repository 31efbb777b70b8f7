use crate::{generate_id, Id};

/// A named production resource that runs one job interval at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Machine {
    id: Id,
    name: String,
    description: String,
}

impl Machine {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Unique display name, used as the timeline row label.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machines_get_distinct_ids() {
        let a = Machine::new("KON3", "Kon3 Machine");
        let b = Machine::new("KON3", "Kon3 Machine");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), "KON3");
        assert_eq!(a.description(), "Kon3 Machine");
    }
}
