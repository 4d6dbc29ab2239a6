//! Constraint encoder.
//!
//! Turns a validated [`ProblemData`] and its [`VariableSet`] into the
//! constraints of a CP model. The encoder creates no decision variables
//! of its own except the auxiliary span pair of optional tasks and the
//! arc literals of sequences it activates.
//!
//! # Algorithm
//!
//! The passes of [`Pass::PIPELINE`] run in order, each adding one family
//! of constraints to the sink. Every pass is a pure function of the data
//! and the variables, except that setup activation and consecutive
//! constraints may activate machine sequences; the circuit pass then
//! covers every sequence that ended up active.
//!
//! # Reference
//! Laborie et al. (2018), "IBM ILOG CP optimizer for scheduling",
//! Constraints 23(2)

mod flow;
mod pipeline;
mod resources;
mod sequencing;
mod tasks;
mod timing;

pub use pipeline::Pass;

use tracing::{debug, info};

use crate::config::MAX_VALUE;
use crate::cp::ModelSink;
use crate::models::ProblemData;
use crate::variables::VariableSet;

/// Names of the auxiliary span variables of an optional task.
pub fn span_var_names(job: usize, task: usize) -> (String, String) {
    (
        format!("job{job}_task{task}_span_start"),
        format!("job{job}_task{task}_span_end"),
    )
}

/// Adds the constraints of a scheduling problem to a model sink.
///
/// # Example
///
/// ```
/// use u_schedule_cp::config::EncoderConfig;
/// use u_schedule_cp::cp::{ConstraintKind, CpModel};
/// use u_schedule_cp::encoder::ConstraintEncoder;
/// use u_schedule_cp::models::{Job, Mode, ProblemData, Resource, Task};
/// use u_schedule_cp::variables::VariableSet;
///
/// let mut data = ProblemData::new();
/// let machine = data.add_resource(Resource::machine("M1"));
/// let job = data.add_job(Job::new());
/// for _ in 0..2 {
///     let task = data.add_task(Task::new(job));
///     data.add_mode(Mode::new(task, 3).with_resource(machine, 1));
/// }
///
/// let mut model = CpModel::new("example");
/// let mut vars = VariableSet::build(&mut model, &data, &EncoderConfig::new());
/// ConstraintEncoder::new(&data, &mut vars, &mut model).encode();
///
/// assert_eq!(model.count_kind(ConstraintKind::NoOverlap), 1);
/// ```
pub struct ConstraintEncoder<'a, S: ModelSink> {
    data: &'a ProblemData,
    vars: &'a mut VariableSet,
    sink: &'a mut S,
    horizon: i64,
}

impl<'a, S: ModelSink> ConstraintEncoder<'a, S> {
    /// Creates an encoder over `data` and its variables.
    pub fn new(data: &'a ProblemData, vars: &'a mut VariableSet, sink: &'a mut S) -> Self {
        Self {
            data,
            vars,
            sink,
            horizon: MAX_VALUE,
        }
    }

    /// Sets the upper bound of auxiliary span variables.
    pub fn with_horizon(mut self, horizon: i64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Runs the whole pipeline.
    pub fn encode(&mut self) {
        let initial = self.sink.constraint_count();
        info!(
            event = "encode_start",
            jobs = self.data.jobs.len(),
            tasks = self.data.num_tasks(),
            modes = self.data.num_modes(),
            resources = self.data.num_resources(),
        );

        for pass in Pass::PIPELINE {
            self.run(pass);
        }

        let active = self
            .vars
            .sequences
            .iter()
            .flatten()
            .filter(|seq| seq.is_active())
            .count();
        info!(
            event = "encode_end",
            constraints = self.sink.constraint_count() - initial,
            active_sequences = active,
        );
    }

    /// Runs a single pass.
    ///
    /// Running [`Pass::Circuit`] before its dependencies leaves later
    /// activated sequences without circuit constraints.
    pub fn run(&mut self, pass: Pass) {
        let before = self.sink.constraint_count();

        match pass {
            Pass::JobSpans => self.job_spans(),
            Pass::ModeSelection => self.mode_selection(),
            Pass::MachineNoOverlap => self.machine_no_overlap(),
            Pass::RenewableCapacity => self.renewable_capacity(),
            Pass::NonRenewableCapacity => self.non_renewable_capacity(),
            Pass::Timing => self.timing(),
            Pass::ResourceCoupling => self.resource_coupling(),
            Pass::SetupActivation => self.setup_activation(),
            Pass::Consecutive => self.consecutive(),
            Pass::FlowConservation => self.flow_conservation(),
            Pass::Circuit => self.circuit(),
        }

        debug!(
            event = "pass_end",
            pass = pass.name(),
            added = self.sink.constraint_count() - before,
        );
    }
}
