//! Resource model.
//!
//! Resources are what modes consume while they run. The set of resource
//! kinds is closed:
//!
//! - **Machine**: disjunctive, processes at most one mode at a time and may
//!   carry sequence-dependent setup times.
//! - **Renewable**: capacity bounds the demand of concurrently running modes.
//! - **NonRenewable**: capacity bounds the total demand over the whole
//!   schedule (e.g. raw material, energy budget).
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

use serde::{Deserialize, Serialize};

/// A resource that modes can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    /// Disjunctive resource (capacity 1).
    Machine(Machine),
    /// Time-indexed capacity.
    Renewable(Renewable),
    /// Instance-wide cumulative capacity.
    NonRenewable(NonRenewable),
}

/// Resource kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Machine,
    Renewable,
    NonRenewable,
}

/// A machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
}

/// A renewable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renewable {
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Units available at any time instant.
    pub capacity: i64,
}

/// A non-renewable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonRenewable {
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Units available over the whole schedule.
    pub capacity: i64,
}

impl Resource {
    /// Creates a machine.
    pub fn machine(name: impl Into<String>) -> Self {
        Self::Machine(Machine { name: name.into() })
    }

    /// Creates a renewable resource.
    pub fn renewable(name: impl Into<String>, capacity: i64) -> Self {
        Self::Renewable(Renewable {
            name: name.into(),
            capacity,
        })
    }

    /// Creates a non-renewable resource.
    pub fn non_renewable(name: impl Into<String>, capacity: i64) -> Self {
        Self::NonRenewable(NonRenewable {
            name: name.into(),
            capacity,
        })
    }

    /// The resource kind.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Machine(_) => ResourceKind::Machine,
            Self::Renewable(_) => ResourceKind::Renewable,
            Self::NonRenewable(_) => ResourceKind::NonRenewable,
        }
    }

    /// Capacity of the resource. Machines have capacity 1.
    pub fn capacity(&self) -> i64 {
        match self {
            Self::Machine(_) => 1,
            Self::Renewable(r) => r.capacity,
            Self::NonRenewable(r) => r.capacity,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        match self {
            Self::Machine(r) => &r.name,
            Self::Renewable(r) => &r.name,
            Self::NonRenewable(r) => &r.name,
        }
    }

    /// Whether this is a machine.
    pub fn is_machine(&self) -> bool {
        matches!(self, Self::Machine(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kinds() {
        let m = Resource::machine("M1");
        assert_eq!(m.kind(), ResourceKind::Machine);
        assert_eq!(m.capacity(), 1);
        assert!(m.is_machine());

        let r = Resource::renewable("crew", 4);
        assert_eq!(r.kind(), ResourceKind::Renewable);
        assert_eq!(r.capacity(), 4);
        assert_eq!(r.name(), "crew");

        let n = Resource::non_renewable("steel", 5);
        assert_eq!(n.kind(), ResourceKind::NonRenewable);
        assert_eq!(n.capacity(), 5);
        assert!(!n.is_machine());
    }

    #[test]
    fn test_resource_serde_tag() {
        let json = serde_json::to_string(&Resource::renewable("crew", 3)).unwrap();
        assert!(json.contains("\"type\":\"renewable\""));

        let back: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Resource::renewable("crew", 3));

        let machine: Resource = serde_json::from_str(r#"{"type":"machine"}"#).unwrap();
        assert_eq!(machine, Resource::machine(""));
    }
}
