//! One-call model construction.
//!
//! [`ScheduleCpBuilder`] validates a problem, creates its decision
//! variables and runs the encoder, either into a fresh [`CpModel`] or
//! into any other [`ModelSink`].

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, EncoderConfig};
use crate::cp::{CpModel, ModelSink};
use crate::encoder::ConstraintEncoder;
use crate::models::ProblemData;
use crate::validation::{validate_problem, ValidationError};
use crate::variables::VariableSet;

/// Model construction error.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid problem data: {} error(s), first: {}", .0.len(), first_message(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("")
}

/// A built model together with the variables it was built over.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    pub model: CpModel,
    pub variables: VariableSet,
}

/// Builds the CP model of a scheduling problem.
///
/// # Example
///
/// ```
/// use u_schedule_cp::builder::ScheduleCpBuilder;
/// use u_schedule_cp::config::EncoderConfig;
/// use u_schedule_cp::models::{Job, Mode, ProblemData, Resource, Task};
///
/// let mut data = ProblemData::new();
/// let machine = data.add_resource(Resource::machine("M1"));
/// let job = data.add_job(Job::new());
/// let task = data.add_task(Task::new(job));
/// data.add_mode(Mode::new(task, 5).with_resource(machine, 1));
///
/// let built = ScheduleCpBuilder::new(&data)
///     .with_config(EncoderConfig::new().with_horizon(100))
///     .build()
///     .unwrap();
/// assert_eq!(built.variables.tasks.len(), 1);
/// assert!(built.model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleCpBuilder<'a> {
    data: &'a ProblemData,
    config: EncoderConfig,
}

impl<'a> ScheduleCpBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(data: &'a ProblemData) -> Self {
        Self {
            data,
            config: EncoderConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EncoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a fresh [`CpModel`].
    pub fn build(&self) -> Result<ScheduleModel, BuildError> {
        let mut model = CpModel::new(self.config.model_name.clone());
        let variables = self.build_into(&mut model)?;
        Ok(ScheduleModel { model, variables })
    }

    /// Adds variables and constraints to an existing sink.
    pub fn build_into<S: ModelSink>(&self, sink: &mut S) -> Result<VariableSet, BuildError> {
        self.config.validate()?;
        validate_problem(self.data).map_err(BuildError::Invalid)?;

        let mut variables = VariableSet::build(sink, self.data, &self.config);
        ConstraintEncoder::new(self.data, &mut variables, sink)
            .with_horizon(self.config.horizon)
            .encode();

        info!(
            event = "model_built",
            constraints = sink.constraint_count(),
        );
        Ok(variables)
    }
}
