//! Input validation for scheduling problems.
//!
//! Checks structural integrity of a [`ProblemData`] instance before it is
//! encoded. Detects:
//! - Out-of-range task, mode, resource and job references
//! - Tasks not owned by the job that lists them
//! - Jobs and tasks without any task or mode
//! - Resource and demand lists of different lengths
//! - Modes listing the same resource twice
//! - Negative durations, demands and capacities
//! - Setup times defined on non-machine resources
//! - Duplicate precedence ids
//!
//! All problems are collected; validation never stops at the first one.

use crate::models::{ProblemData, Resource};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An index points past the end of its collection.
    InvalidReference,
    /// A job lists a task that belongs to another job, or vice versa.
    OwnershipMismatch,
    /// A job has no tasks.
    EmptyJob,
    /// A task has no modes.
    EmptyTask,
    /// A mode's resource and demand lists differ in length.
    LengthMismatch,
    /// A mode lists the same resource more than once.
    DuplicateResource,
    /// A duration, demand or capacity is negative.
    NegativeValue,
    /// Setup times are attached to a resource that is not a machine.
    InvalidSetupResource,
    /// Two timing constraints share a precedence id.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a problem instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(data: &ProblemData) -> ValidationResult {
    let mut errors = Vec::new();

    check_jobs(data, &mut errors);
    check_resources(data, &mut errors);
    check_modes(data, &mut errors);
    check_constraints(data, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_jobs(data: &ProblemData, errors: &mut Vec<ValidationError>) {
    let num_tasks = data.num_tasks();

    for (j, job) in data.jobs.iter().enumerate() {
        if job.tasks.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job {j} has no tasks"),
            ));
        }
        for &t in &job.tasks {
            match data.tasks.get(t) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Job {j} references unknown task {t} (only {num_tasks} tasks)"),
                )),
                Some(task) if task.job != j => errors.push(ValidationError::new(
                    ValidationErrorKind::OwnershipMismatch,
                    format!("Job {j} lists task {t}, which belongs to job {}", task.job),
                )),
                Some(_) => {}
            }
        }
    }

    for (t, task) in data.tasks.iter().enumerate() {
        match data.jobs.get(task.job) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Task {t} references unknown job {}", task.job),
            )),
            Some(job) if !job.contains(t) => errors.push(ValidationError::new(
                ValidationErrorKind::OwnershipMismatch,
                format!("Task {t} is not listed by its job {}", task.job),
            )),
            Some(_) => {}
        }
    }
}

fn check_resources(data: &ProblemData, errors: &mut Vec<ValidationError>) {
    for (r, resource) in data.resources.iter().enumerate() {
        if resource.capacity() < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("Resource {r} has negative capacity {}", resource.capacity()),
            ));
        }
    }

    let num_tasks = data.num_tasks();
    for (r, matrix) in data.constraints.setup_times.iter() {
        match data.resources.get(r) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Setup times reference unknown resource {r}"),
            )),
            Some(Resource::Machine(_)) => {}
            Some(_) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSetupResource,
                format!("Setup times defined on resource {r}, which is not a machine"),
            )),
        }

        for (from, to, time) in matrix.entries() {
            if time == 0 {
                continue;
            }
            if from >= num_tasks || to >= num_tasks {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!(
                        "Setup time on resource {r} references unknown task pair ({from}, {to})"
                    ),
                ));
            }
            if time < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Setup time on resource {r} from {from} to {to} is negative"),
                ));
            }
        }
    }
}

fn check_modes(data: &ProblemData, errors: &mut Vec<ValidationError>) {
    let mut has_mode = vec![false; data.num_tasks()];

    for (m, mode) in data.modes.iter().enumerate() {
        match has_mode.get_mut(mode.task) {
            Some(flag) => *flag = true,
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Mode {m} references unknown task {}", mode.task),
            )),
        }

        if mode.duration < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("Mode {m} has negative duration {}", mode.duration),
            ));
        }

        if mode.resources.len() != mode.demands.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::LengthMismatch,
                format!(
                    "Mode {m} lists {} resources but {} demands",
                    mode.resources.len(),
                    mode.demands.len()
                ),
            ));
        }

        let mut seen = HashSet::with_capacity(mode.resources.len());
        for &r in &mode.resources {
            if !seen.insert(r) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateResource,
                    format!("Mode {m} lists resource {r} more than once"),
                ));
            }
            if r >= data.num_resources() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Mode {m} references unknown resource {r}"),
                ));
            }
        }

        for &d in &mode.demands {
            if d < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Mode {m} has negative demand {d}"),
                ));
            }
        }
    }

    for (t, _) in has_mode.iter().enumerate().filter(|&(_, &found)| !found) {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTask,
            format!("Task {t} has no modes"),
        ));
    }
}

fn check_constraints(data: &ProblemData, errors: &mut Vec<ValidationError>) {
    let num_tasks = data.num_tasks();
    let mut unknown_task = |what: &str, t1: usize, t2: usize| {
        if t1 >= num_tasks || t2 >= num_tasks {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("{what} ({t1}, {t2}) references an unknown task"),
            ));
        }
    };

    for (kind, c) in data.constraints.all_timing() {
        unknown_task(&format!("{kind:?} constraint"), c.task1, c.task2);
    }
    for &(t1, t2) in &data.constraints.identical_resources {
        unknown_task("Identical resources pair", t1, t2);
    }
    for &(t1, t2) in &data.constraints.different_resources {
        unknown_task("Different resources pair", t1, t2);
    }
    for &(t1, t2) in &data.constraints.consecutive {
        unknown_task("Consecutive pair", t1, t2);
    }

    let mut ids = HashSet::new();
    for (_, c) in data.constraints.all_timing() {
        if !ids.insert(c.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate precedence id: {}", c.id.0),
            ));
        }
    }

    for &t in data.flows.keys() {
        if t >= num_tasks {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Flow role assigned to unknown task {t}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        FlowRole, Job, Mode, PrecedenceId, ProblemData, Resource, Task, TimingConstraint,
    };

    fn sample_problem() -> ProblemData {
        let mut data = ProblemData::new();
        let m1 = data.add_resource(Resource::machine("M1"));
        let crew = data.add_resource(Resource::renewable("crew", 2));
        let job = data.add_job(Job::new());
        let a = data.add_task(Task::new(job));
        let b = data.add_task(Task::new(job).optional());
        data.add_mode(Mode::new(a, 3).with_resource(m1, 1));
        data.add_mode(Mode::new(b, 4).with_resource(m1, 1).with_resource(crew, 2));
        data.add_end_before_start(a, b, 0);
        data.set_setup_time(m1, a, b, 2);
        data.set_flow_role(a, FlowRole::Source);
        data
    }

    fn has_kind(data: &ProblemData, kind: ValidationErrorKind) -> bool {
        validate_problem(data)
            .unwrap_err()
            .iter()
            .any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_problem() {
        assert!(validate_problem(&sample_problem()).is_ok());
    }

    #[test]
    fn test_empty_problem_is_valid() {
        assert!(validate_problem(&ProblemData::new()).is_ok());
    }

    #[test]
    fn test_task_without_modes() {
        let mut data = sample_problem();
        data.add_task(Task::new(0));
        assert!(has_kind(&data, ValidationErrorKind::EmptyTask));
    }

    #[test]
    fn test_empty_job() {
        let mut data = sample_problem();
        data.add_job(Job::new());
        assert!(has_kind(&data, ValidationErrorKind::EmptyJob));
    }

    #[test]
    fn test_ownership_mismatch() {
        let mut data = sample_problem();
        data.add_job(Job::new().with_tasks(vec![0]));
        assert!(has_kind(&data, ValidationErrorKind::OwnershipMismatch));
    }

    #[test]
    fn test_unknown_resource_reference() {
        let mut data = sample_problem();
        data.add_mode(Mode::new(0, 1).with_resource(7, 1));
        assert!(has_kind(&data, ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_length_mismatch() {
        let mut data = sample_problem();
        data.modes[0].demands.push(1);
        assert!(has_kind(&data, ValidationErrorKind::LengthMismatch));
    }

    #[test]
    fn test_duplicate_resource_in_mode() {
        let mut data = sample_problem();
        let t = data.add_task(Task::new(0));
        data.add_mode(Mode::new(t, 3).with_resource(0, 1).with_resource(0, 1));

        let errors = validate_problem(&data).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateResource);
        assert!(errors[0].message.contains("resource 0"));
    }

    #[test]
    fn test_negative_values() {
        let mut data = sample_problem();
        data.modes[0].duration = -1;
        data.add_resource(Resource::non_renewable("budget", -5));
        let errors = validate_problem(&data).unwrap_err();
        let negatives = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::NegativeValue)
            .count();
        assert_eq!(negatives, 2);
    }

    #[test]
    fn test_setup_on_renewable() {
        let mut data = sample_problem();
        data.set_setup_time(1, 0, 1, 3);
        assert!(has_kind(&data, ValidationErrorKind::InvalidSetupResource));
    }

    #[test]
    fn test_setup_unknown_task() {
        let mut data = sample_problem();
        data.set_setup_time(0, 0, 9, 3);
        assert!(has_kind(&data, ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_duplicate_precedence_id() {
        let mut data = sample_problem();
        data.constraints.start_before_start.push(TimingConstraint {
            id: PrecedenceId(0),
            task1: 0,
            task2: 1,
            delay: 0,
        });
        assert!(has_kind(&data, ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_unknown_task_in_pairs_and_flows() {
        let mut data = sample_problem();
        data.add_consecutive(0, 5);
        data.set_flow_role(9, FlowRole::Sink);
        let errors = validate_problem(&data).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("Consecutive"));
        assert!(errors[1].to_string().contains("unknown task 9"));
    }
}
