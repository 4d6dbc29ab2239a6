//! Job model.

use serde::{Deserialize, Serialize};

/// A job: an ordered set of tasks.
///
/// The job's span is not a free decision; it is the hull of the spans of
/// its present tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Indices of the tasks in this job.
    #[serde(default)]
    pub tasks: Vec<usize>,
}

impl Job {
    /// Creates an empty job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the task list.
    pub fn with_tasks(mut self, tasks: Vec<usize>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Whether `task` belongs to this job.
    pub fn contains(&self, task: usize) -> bool {
        self.tasks.contains(&task)
    }
}
