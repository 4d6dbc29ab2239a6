//! Derived lookups over problem data.
//!
//! Pure functions that index modes by task and by resource, and
//! enumerate the mode combinations that resource-coupling constraints
//! range over. Nothing here touches decision variables.

use std::collections::BTreeSet;

use crate::models::ProblemData;

/// Modes that use one resource, with their demands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceModes {
    /// Mode indices.
    pub modes: Vec<usize>,
    /// Demand of each mode on the resource (parallel to `modes`).
    pub demands: Vec<i64>,
}

impl ResourceModes {
    /// Whether no mode uses the resource.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

/// A mode pair of two tasks that share at least one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedModes {
    /// Mode of the first task.
    pub mode1: usize,
    /// Mode of the second task.
    pub mode2: usize,
    /// Resources used by both modes, ascending.
    pub resources: Vec<usize>,
}

/// Mode indices per task, in mode order.
pub fn task_modes(data: &ProblemData) -> Vec<Vec<usize>> {
    let mut result = vec![Vec::new(); data.num_tasks()];
    for (idx, mode) in data.modes.iter().enumerate() {
        if let Some(modes) = result.get_mut(mode.task) {
            modes.push(idx);
        }
    }
    result
}

/// Modes and demands per resource, in mode order.
pub fn resource_modes(data: &ProblemData) -> Vec<ResourceModes> {
    let mut result = vec![ResourceModes::default(); data.num_resources()];
    for (idx, mode) in data.modes.iter().enumerate() {
        for (&resource, &demand) in mode.resources.iter().zip(&mode.demands) {
            if let Some(entry) = result.get_mut(resource) {
                entry.modes.push(idx);
                entry.demands.push(demand);
            }
        }
    }
    result
}

/// For every mode of `task1`, the modes of `task2` that use exactly the
/// same set of resources.
pub fn identical_modes(data: &ProblemData, task1: usize, task2: usize) -> Vec<(usize, Vec<usize>)> {
    compatible_modes(data, task1, task2, |a, b| a == b)
}

/// For every mode of `task1`, the modes of `task2` whose resources are
/// disjoint from it.
pub fn different_modes(data: &ProblemData, task1: usize, task2: usize) -> Vec<(usize, Vec<usize>)> {
    compatible_modes(data, task1, task2, |a, b| a.is_disjoint(b))
}

/// All mode pairs of `task1` × `task2` that share at least one resource.
pub fn intersecting_modes(data: &ProblemData, task1: usize, task2: usize) -> Vec<SharedModes> {
    let modes1 = modes_of(data, task1);
    let modes2 = modes_of(data, task2);
    let mut result = Vec::new();

    for &mode1 in &modes1 {
        let resources1 = resource_set(data, mode1);
        for &mode2 in &modes2 {
            let shared: Vec<usize> = resources1
                .intersection(&resource_set(data, mode2))
                .copied()
                .collect();
            if !shared.is_empty() {
                result.push(SharedModes {
                    mode1,
                    mode2,
                    resources: shared,
                });
            }
        }
    }

    result
}

fn compatible_modes(
    data: &ProblemData,
    task1: usize,
    task2: usize,
    compatible: impl Fn(&BTreeSet<usize>, &BTreeSet<usize>) -> bool,
) -> Vec<(usize, Vec<usize>)> {
    let modes2 = modes_of(data, task2);

    modes_of(data, task1)
        .into_iter()
        .map(|mode1| {
            let resources1 = resource_set(data, mode1);
            let matching = modes2
                .iter()
                .copied()
                .filter(|&mode2| compatible(&resources1, &resource_set(data, mode2)))
                .collect();
            (mode1, matching)
        })
        .collect()
}

fn modes_of(data: &ProblemData, task: usize) -> Vec<usize> {
    data.modes
        .iter()
        .enumerate()
        .filter(|(_, mode)| mode.task == task)
        .map(|(idx, _)| idx)
        .collect()
}

fn resource_set(data: &ProblemData, mode: usize) -> BTreeSet<usize> {
    data.modes[mode].resources.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Mode, Resource, Task};

    /// Two tasks, each with a mode on M0, on M1 and on {M0, M1}.
    fn instance() -> ProblemData {
        let mut data = ProblemData::new();
        let m0 = data.add_resource(Resource::machine("M0"));
        let m1 = data.add_resource(Resource::machine("M1"));
        let job = data.add_job(Job::new());
        for _ in 0..2 {
            let task = data.add_task(Task::new(job));
            data.add_mode(Mode::new(task, 2).with_resource(m0, 1));
            data.add_mode(Mode::new(task, 3).with_resource(m1, 1));
            data.add_mode(Mode::new(task, 4).with_resource(m0, 1).with_resource(m1, 2));
        }
        data
    }

    #[test]
    fn test_task_modes() {
        let data = instance();
        assert_eq!(task_modes(&data), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_resource_modes() {
        let data = instance();
        let index = resource_modes(&data);
        assert_eq!(index[0].modes, vec![0, 2, 3, 5]);
        assert_eq!(index[1].modes, vec![1, 2, 4, 5]);
        assert_eq!(index[1].demands, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_identical_modes() {
        let data = instance();
        assert_eq!(
            identical_modes(&data, 0, 1),
            vec![(0, vec![3]), (1, vec![4]), (2, vec![5])]
        );
    }

    #[test]
    fn test_different_modes() {
        let data = instance();
        assert_eq!(
            different_modes(&data, 0, 1),
            vec![(0, vec![4]), (1, vec![3]), (2, vec![])]
        );
    }

    #[test]
    fn test_intersecting_modes() {
        let data = instance();
        let shared = intersecting_modes(&data, 0, 1);

        // M0-only mode of task 0 meets the M0 and {M0, M1} modes of task 1.
        let from_first: Vec<_> = shared.iter().filter(|s| s.mode1 == 0).collect();
        assert_eq!(from_first.len(), 2);
        assert!(shared.contains(&SharedModes {
            mode1: 2,
            mode2: 5,
            resources: vec![0, 1],
        }));
        assert!(!shared.iter().any(|s| s.mode1 == 0 && s.mode2 == 4));
        assert_eq!(shared.len(), 7);
    }

    #[test]
    fn test_modes_without_resources() {
        let mut data = ProblemData::new();
        let job = data.add_job(Job::new());
        let a = data.add_task(Task::new(job));
        let b = data.add_task(Task::new(job));
        data.add_mode(Mode::new(a, 1));
        data.add_mode(Mode::new(b, 1));

        assert!(intersecting_modes(&data, a, b).is_empty());
        // Empty resource sets are identical and disjoint at once.
        assert_eq!(identical_modes(&data, a, b), vec![(0, vec![1])]);
        assert_eq!(different_modes(&data, a, b), vec![(0, vec![1])]);
    }
}
