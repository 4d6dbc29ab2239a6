//! Decision variables of the scheduling model.
//!
//! [`VariableSet::build`] creates every variable the encoder consumes:
//! span variables per job, start/end/duration/presence per task, an
//! optional interval per mode, one sequence record per machine and one
//! flow literal per end-before-start constraint.
//!
//! Sequence records start inactive. Their arc literals are created on
//! the first call to [`SequenceVar::activate`], so machines that never
//! need sequencing cost nothing.

use std::collections::BTreeMap;
use std::ops::Index;

use tracing::trace;

use crate::config::EncoderConfig;
use crate::cp::{BoolVar, Constraint, IntVar, IntervalVar, ModelSink};
use crate::lookup;
use crate::models::{PrecedenceId, ProblemData};

/// Span variables of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobVar {
    pub start: IntVar,
    pub end: IntVar,
}

/// Variables of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskVar {
    pub start: IntVar,
    pub end: IntVar,
    pub duration: IntVar,
    /// Fixed to true for non-optional tasks.
    pub present: BoolVar,
    pub interval: IntervalVar,
}

/// Variables of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeVar {
    /// Optional interval, present iff the mode is selected.
    pub interval: IntervalVar,
    pub start: IntVar,
    pub end: IntVar,
    /// Fixed to the mode's duration.
    pub duration: IntVar,
    pub present: BoolVar,
    /// Index of the task this mode executes.
    pub task: usize,
}

/// Sequencing record of one machine.
///
/// Nodes `0..n` are the machine's assignable modes in [`modes`](Self::modes)
/// order; node `n` is the dummy node that opens and closes the circuit.
/// `arc(i, j)` is true iff node `j` directly follows node `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceVar {
    /// Machine index.
    pub resource: usize,
    /// Mode indices assignable to the machine.
    pub modes: Vec<usize>,
    arcs: Option<Vec<Vec<BoolVar>>>,
}

impl SequenceVar {
    /// Creates an inactive record.
    pub fn new(resource: usize, modes: Vec<usize>) -> Self {
        Self {
            resource,
            modes,
            arcs: None,
        }
    }

    /// Index of the dummy node.
    pub fn dummy(&self) -> usize {
        self.modes.len()
    }

    /// Node of `mode` in this sequence.
    pub fn position(&self, mode: usize) -> Option<usize> {
        self.modes.iter().position(|&m| m == mode)
    }

    /// Whether arc literals exist.
    pub fn is_active(&self) -> bool {
        self.arcs.is_some()
    }

    /// Creates the `(n+1)²` arc literals. Idempotent.
    pub fn activate<S: ModelSink>(&mut self, sink: &mut S) {
        if self.arcs.is_some() {
            return;
        }

        let size = self.modes.len() + 1;
        let resource = self.resource;
        let arcs = (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| sink.new_bool_var(format!("seq{resource}_arc_{i}_{j}")))
                    .collect()
            })
            .collect();
        self.arcs = Some(arcs);

        trace!(event = "sequence_activated", resource, nodes = size);
    }

    /// Arc literal `i -> j`, if active.
    pub fn arc(&self, i: usize, j: usize) -> Option<BoolVar> {
        self.arcs.as_ref()?.get(i)?.get(j).copied()
    }

    /// Iterates `(i, j, arc)` over the whole table, if active.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, BoolVar)> + '_ {
        self.arcs.iter().flat_map(|rows| {
            rows.iter().enumerate().flat_map(|(i, row)| {
                row.iter().enumerate().map(move |(j, &arc)| (i, j, arc))
            })
        })
    }
}

/// Flow literals keyed by the precedence they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowVars {
    vars: BTreeMap<PrecedenceId, BoolVar>,
}

impl FlowVars {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the literal of `id`.
    pub fn insert(&mut self, id: PrecedenceId, var: BoolVar) {
        self.vars.insert(id, var);
    }

    /// Literal of `id`, if any.
    pub fn get(&self, id: PrecedenceId) -> Option<BoolVar> {
        self.vars.get(&id).copied()
    }

    /// Iterates `(id, literal)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PrecedenceId, BoolVar)> + '_ {
        self.vars.iter().map(|(&id, &var)| (id, var))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Index<PrecedenceId> for FlowVars {
    type Output = BoolVar;

    /// # Panics
    ///
    /// Panics if no literal was registered for `id`.
    fn index(&self, id: PrecedenceId) -> &BoolVar {
        match self.vars.get(&id) {
            Some(var) => var,
            None => panic!("no flow literal for precedence {}", id.0),
        }
    }
}

/// All decision variables of a scheduling model.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    pub jobs: Vec<JobVar>,
    pub tasks: Vec<TaskVar>,
    pub modes: Vec<ModeVar>,
    /// One record per resource; `None` for non-machines.
    pub sequences: Vec<Option<SequenceVar>>,
    pub flows: FlowVars,
}

impl VariableSet {
    /// Creates the variables of `data` in `sink`.
    ///
    /// Time variables range over `[0, config.horizon]`, narrowed by task
    /// windows. Presence of non-optional tasks is fixed to true.
    pub fn build<S: ModelSink>(sink: &mut S, data: &ProblemData, config: &EncoderConfig) -> Self {
        let horizon = config.horizon;

        let jobs = (0..data.jobs.len())
            .map(|j| JobVar {
                start: sink.new_int_var(0, horizon, format!("job{j}_start")),
                end: sink.new_int_var(0, horizon, format!("job{j}_end")),
            })
            .collect();

        let task_modes = lookup::task_modes(data);
        let mut tasks = Vec::with_capacity(data.num_tasks());
        for (t, task) in data.tasks.iter().enumerate() {
            let durations = task_modes[t].iter().map(|&m| data.modes[m].duration);
            let min_duration = durations.clone().min().unwrap_or(0);
            let max_duration = durations.max().unwrap_or(0);

            let (start_lb, start_ub) = task.start_bounds(horizon);
            let (end_lb, end_ub) = task.end_bounds(horizon);
            let start = sink.new_int_var(start_lb, start_ub, format!("task{t}_start"));
            let end = sink.new_int_var(end_lb, end_ub, format!("task{t}_end"));
            let duration =
                sink.new_int_var(min_duration, max_duration, format!("task{t}_duration"));
            let present = sink.new_bool_var(format!("task{t}_present"));
            if !task.optional {
                sink.add(Constraint::eq(present, 1_i64));
            }
            let interval = sink.new_optional_interval(
                start,
                duration,
                end,
                present.literal(),
                format!("task{t}_interval"),
            );

            tasks.push(TaskVar {
                start,
                end,
                duration,
                present,
                interval,
            });
        }

        let modes = data
            .modes
            .iter()
            .enumerate()
            .map(|(m, mode)| {
                let task = &data.tasks[mode.task];
                let (start_lb, start_ub) = task.start_bounds(horizon);
                let (end_lb, end_ub) = task.end_bounds(horizon);
                let start = sink.new_int_var(start_lb, start_ub, format!("mode{m}_start"));
                let end = sink.new_int_var(end_lb, end_ub, format!("mode{m}_end"));
                let duration =
                    sink.new_int_var(mode.duration, mode.duration, format!("mode{m}_duration"));
                let present = sink.new_bool_var(format!("mode{m}_present"));
                let interval = sink.new_optional_interval(
                    start,
                    duration,
                    end,
                    present.literal(),
                    format!("mode{m}_interval"),
                );

                ModeVar {
                    interval,
                    start,
                    end,
                    duration,
                    present,
                    task: mode.task,
                }
            })
            .collect();

        let sequences = data
            .resources
            .iter()
            .zip(lookup::resource_modes(data))
            .enumerate()
            .map(|(r, (resource, users))| {
                resource
                    .is_machine()
                    .then(|| SequenceVar::new(r, users.modes))
            })
            .collect();

        let mut flows = FlowVars::new();
        for c in &data.constraints.end_before_start {
            flows.insert(c.id, sink.new_bool_var(format!("flow{}", c.id.0)));
        }

        Self {
            jobs,
            tasks,
            modes,
            sequences,
            flows,
        }
    }

    /// Sequence record of `resource`, if it is a machine.
    pub fn sequence(&self, resource: usize) -> Option<&SequenceVar> {
        self.sequences.get(resource)?.as_ref()
    }

    /// Mutable sequence record of `resource`, if it is a machine.
    pub fn sequence_mut(&mut self, resource: usize) -> Option<&mut SequenceVar> {
        self.sequences.get_mut(resource)?.as_mut()
    }
}
