//! Mode model.
//!
//! A mode is one concrete way of executing a task: a fixed duration and
//! a demand on each resource it uses. Exactly one mode of every present
//! task is selected.
//!
//! # Reference
//! Hartmann & Briskorn (2010), "A survey of variants and extensions of the
//! resource-constrained project scheduling problem", Sec. 3 (multi-mode)

use serde::{Deserialize, Serialize};

/// An execution mode of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    /// Index of the task this mode executes.
    pub task: usize,
    /// Processing duration.
    pub duration: i64,
    /// Indices of the resources used.
    #[serde(default)]
    pub resources: Vec<usize>,
    /// Demand on each resource (parallel to `resources`).
    #[serde(default)]
    pub demands: Vec<i64>,
}

impl Mode {
    /// Creates a mode that uses no resources.
    pub fn new(task: usize, duration: i64) -> Self {
        Self {
            task,
            duration,
            resources: Vec::new(),
            demands: Vec::new(),
        }
    }

    /// Adds a resource with the given demand.
    pub fn with_resource(mut self, resource: usize, demand: i64) -> Self {
        self.resources.push(resource);
        self.demands.push(demand);
        self
    }

    /// Whether this mode uses `resource`.
    pub fn uses(&self, resource: usize) -> bool {
        self.resources.contains(&resource)
    }

    /// Demand on `resource`, if used.
    pub fn demand_for(&self, resource: usize) -> Option<i64> {
        self.resources
            .iter()
            .position(|&r| r == resource)
            .and_then(|idx| self.demands.get(idx).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_builder() {
        let mode = Mode::new(4, 12).with_resource(0, 1).with_resource(3, 5);

        assert_eq!(mode.task, 4);
        assert_eq!(mode.duration, 12);
        assert!(mode.uses(3));
        assert!(!mode.uses(1));
        assert_eq!(mode.demand_for(3), Some(5));
        assert_eq!(mode.demand_for(1), None);
    }
}
