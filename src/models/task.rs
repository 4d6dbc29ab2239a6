//! Task model.
//!
//! A task is a unit of work belonging to exactly one job. It is executed
//! in exactly one of its modes, and may be optional, in which case its
//! presence in the schedule is itself a decision.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

/// A task to be scheduled.
///
/// # Time Representation
/// All times are integer time units relative to a scheduling epoch (t=0).
/// The optional window bounds restrict the task's start and end variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Index of the owning job.
    pub job: usize,
    /// Whether the task may be left out of the schedule.
    #[serde(default)]
    pub optional: bool,
    /// Earliest start time. `None` = time 0.
    #[serde(default)]
    pub earliest_start: Option<i64>,
    /// Latest start time. `None` = horizon.
    #[serde(default)]
    pub latest_start: Option<i64>,
    /// Earliest end time. `None` = time 0.
    #[serde(default)]
    pub earliest_end: Option<i64>,
    /// Latest end time. `None` = horizon.
    #[serde(default)]
    pub latest_end: Option<i64>,
}

impl Task {
    /// Creates a required task owned by `job`.
    pub fn new(job: usize) -> Self {
        Self {
            name: String::new(),
            job,
            optional: false,
            earliest_start: None,
            latest_start: None,
            earliest_end: None,
            latest_end: None,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks the task as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the earliest start time.
    pub fn with_earliest_start(mut self, time: i64) -> Self {
        self.earliest_start = Some(time);
        self
    }

    /// Sets the latest start time.
    pub fn with_latest_start(mut self, time: i64) -> Self {
        self.latest_start = Some(time);
        self
    }

    /// Sets the earliest end time.
    pub fn with_earliest_end(mut self, time: i64) -> Self {
        self.earliest_end = Some(time);
        self
    }

    /// Sets the latest end time (deadline).
    pub fn with_latest_end(mut self, time: i64) -> Self {
        self.latest_end = Some(time);
        self
    }

    /// Start domain `[lb, ub]` clipped to `[0, horizon]`.
    pub fn start_bounds(&self, horizon: i64) -> (i64, i64) {
        clip(self.earliest_start, self.latest_start, horizon)
    }

    /// End domain `[lb, ub]` clipped to `[0, horizon]`.
    pub fn end_bounds(&self, horizon: i64) -> (i64, i64) {
        clip(self.earliest_end, self.latest_end, horizon)
    }
}

fn clip(lb: Option<i64>, ub: Option<i64>, horizon: i64) -> (i64, i64) {
    (
        lb.unwrap_or(0).clamp(0, horizon),
        ub.unwrap_or(horizon).clamp(0, horizon),
    )
}
