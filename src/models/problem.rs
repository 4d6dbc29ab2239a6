//! Problem instance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Constraints, FlowRole, Job, Mode, PrecedenceId, Resource, Task, TimingKind};

/// A complete flexible job-shop instance.
///
/// All cross references are plain indices into the vectors of this
/// struct. Run [`validate_problem`](crate::validation::validate_problem)
/// before handing an instance to the encoder.
///
/// # Examples
///
/// ```
/// use u_schedule_cp::models::{Job, Mode, ProblemData, Resource, Task};
///
/// let mut data = ProblemData::new();
/// let machine = data.add_resource(Resource::machine("M1"));
/// let job = data.add_job(Job::new());
/// let cut = data.add_task(Task::new(job));
/// let weld = data.add_task(Task::new(job));
/// data.add_mode(Mode::new(cut, 3).with_resource(machine, 1));
/// data.add_mode(Mode::new(weld, 4).with_resource(machine, 1));
/// data.add_end_before_start(cut, weld, 0);
///
/// assert_eq!(data.jobs[job].tasks, vec![cut, weld]);
/// assert_eq!(data.num_modes(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemData {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub constraints: Constraints,
    /// Flow role per task index; tasks without an entry have no role.
    #[serde(default)]
    pub flows: BTreeMap<usize, FlowRole>,
}

impl ProblemData {
    /// Creates an empty instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job and returns its index.
    pub fn add_job(&mut self, job: Job) -> usize {
        self.jobs.push(job);
        self.jobs.len() - 1
    }

    /// Adds a resource and returns its index.
    pub fn add_resource(&mut self, resource: Resource) -> usize {
        self.resources.push(resource);
        self.resources.len() - 1
    }

    /// Adds a task and returns its index.
    ///
    /// The task is appended to its job's task list if that job exists.
    pub fn add_task(&mut self, task: Task) -> usize {
        let idx = self.tasks.len();
        if let Some(job) = self.jobs.get_mut(task.job) {
            job.tasks.push(idx);
        }
        self.tasks.push(task);
        idx
    }

    /// Adds a mode and returns its index.
    pub fn add_mode(&mut self, mode: Mode) -> usize {
        self.modes.push(mode);
        self.modes.len() - 1
    }

    /// Adds `start(task1) + delay <= start(task2)`.
    pub fn add_start_before_start(
        &mut self,
        task1: usize,
        task2: usize,
        delay: i64,
    ) -> PrecedenceId {
        self.constraints
            .add_timing(TimingKind::StartBeforeStart, task1, task2, delay)
    }

    /// Adds `start(task1) + delay <= end(task2)`.
    pub fn add_start_before_end(&mut self, task1: usize, task2: usize, delay: i64) -> PrecedenceId {
        self.constraints
            .add_timing(TimingKind::StartBeforeEnd, task1, task2, delay)
    }

    /// Adds `end(task1) + delay <= start(task2)`.
    pub fn add_end_before_start(&mut self, task1: usize, task2: usize, delay: i64) -> PrecedenceId {
        self.constraints
            .add_timing(TimingKind::EndBeforeStart, task1, task2, delay)
    }

    /// Adds `end(task1) + delay <= end(task2)`.
    pub fn add_end_before_end(&mut self, task1: usize, task2: usize, delay: i64) -> PrecedenceId {
        self.constraints
            .add_timing(TimingKind::EndBeforeEnd, task1, task2, delay)
    }

    /// Requires both tasks to use identical resources.
    pub fn add_identical_resources(&mut self, task1: usize, task2: usize) {
        self.constraints.identical_resources.push((task1, task2));
    }

    /// Requires the tasks to use disjoint resources.
    pub fn add_different_resources(&mut self, task1: usize, task2: usize) {
        self.constraints.different_resources.push((task1, task2));
    }

    /// Requires `task2` to directly follow `task1` on any shared machine.
    pub fn add_consecutive(&mut self, task1: usize, task2: usize) {
        self.constraints.consecutive.push((task1, task2));
    }

    /// Sets the setup time on `machine` when `to` directly follows `from`.
    pub fn set_setup_time(&mut self, machine: usize, from: usize, to: usize, time: i64) {
        self.constraints.setup_times.set(machine, from, to, time);
    }

    /// Tags `task` with a flow role.
    pub fn set_flow_role(&mut self, task: usize, role: FlowRole) {
        self.flows.insert(task, role);
    }

    /// Setup time on `resource` between two tasks (0 if undefined).
    pub fn setup_time(&self, resource: usize, from: usize, to: usize) -> i64 {
        self.constraints.setup_times.get(resource, from, to)
    }

    /// Number of tasks.
    pub fn num_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Number of modes.
    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }

    /// Number of resources.
    pub fn num_resources(&self) -> usize {
        self.resources.len()
    }
}
