//! CP model definition.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::expr::LinearExpr;
use super::sink::ModelSink;
use super::variables::{BoolVar, IntDomain, IntVar, Interval, IntervalVar, Literal};

/// Comparison of a linear constraint `expr (relation) 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `expr == 0`
    Eq,
    /// `expr <= 0`
    Le,
}

/// An arc `tail -> head` of a circuit constraint, selected iff `literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitArc {
    /// Source node.
    pub tail: usize,
    /// Target node.
    pub head: usize,
    /// Arc selection literal.
    pub literal: Literal,
}

/// A constraint in the CP model.
///
/// The global variants are black-box primitives of the solver engine;
/// only their inputs are assembled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Linear (in)equality `expr (relation) 0`.
    Linear {
        /// Left-hand side, already moved to `lhs - rhs` form.
        expr: LinearExpr,
        /// Comparison against zero.
        relation: Relation,
    },

    /// `target == min(vars)`.
    MinEquality {
        /// Variable receiving the minimum.
        target: IntVar,
        /// Non-empty operand list.
        vars: Vec<IntVar>,
    },

    /// `target == max(vars)`.
    MaxEquality {
        /// Variable receiving the maximum.
        target: IntVar,
        /// Non-empty operand list.
        vars: Vec<IntVar>,
    },

    /// No two present intervals overlap in time.
    NoOverlap {
        /// Intervals sharing the resource.
        intervals: Vec<IntervalVar>,
    },

    /// Cumulative resource constraint.
    ///
    /// At any point in time, the sum of demands of present intervals
    /// covering that point must not exceed the capacity.
    Cumulative {
        /// Intervals using the resource.
        intervals: Vec<IntervalVar>,
        /// Demand of each interval (parallel to `intervals`).
        demands: Vec<i64>,
        /// Maximum capacity.
        capacity: i64,
    },

    /// Selected arcs form exactly one circuit over the nodes whose
    /// self-loop is not selected.
    Circuit {
        /// All candidate arcs, self-loops included.
        arcs: Vec<CircuitArc>,
    },
}

impl Constraint {
    /// `lhs == rhs`.
    pub fn eq(lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        let lhs: LinearExpr = lhs.into();
        let rhs: LinearExpr = rhs.into();
        Self::Linear {
            expr: lhs - rhs,
            relation: Relation::Eq,
        }
    }

    /// `lhs <= rhs`.
    pub fn le(lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) -> Self {
        let lhs: LinearExpr = lhs.into();
        let rhs: LinearExpr = rhs.into();
        Self::Linear {
            expr: lhs - rhs,
            relation: Relation::Le,
        }
    }

    /// The constraint family.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Linear { .. } => ConstraintKind::Linear,
            Self::MinEquality { .. } => ConstraintKind::MinEquality,
            Self::MaxEquality { .. } => ConstraintKind::MaxEquality,
            Self::NoOverlap { .. } => ConstraintKind::NoOverlap,
            Self::Cumulative { .. } => ConstraintKind::Cumulative,
            Self::Circuit { .. } => ConstraintKind::Circuit,
        }
    }
}

/// Constraint family, for reporting and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Linear,
    MinEquality,
    MaxEquality,
    NoOverlap,
    Cumulative,
    Circuit,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::MinEquality => "min_equality",
            Self::MaxEquality => "max_equality",
            Self::NoOverlap => "no_overlap",
            Self::Cumulative => "cumulative",
            Self::Circuit => "circuit",
        };
        f.write_str(name)
    }
}

/// A constraint together with its enforcement literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedConstraint {
    /// The constraint.
    pub constraint: Constraint,
    /// Conjunction that activates the constraint (empty = always).
    pub enforcement: Vec<Literal>,
}

impl PostedConstraint {
    /// Whether the constraint is guarded by enforcement literals.
    pub fn is_reified(&self) -> bool {
        !self.enforcement.is_empty()
    }
}

/// Errors reported by [`CpModel::validate`] and [`CpModel::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown variable #{0}")]
    UnknownVariable(usize),

    #[error("unknown interval #{0}")]
    UnknownInterval(usize),

    #[error("constraint #{index} ({kind}) is malformed: {reason}")]
    Malformed {
        index: usize,
        kind: ConstraintKind,
        reason: String,
    },

    #[error("variable '{name}' (#{index}) has no value")]
    Unassigned { index: usize, name: String },

    #[error("variable '{name}' = {value} lies outside [{lb}, {ub}]")]
    OutOfDomain {
        name: String,
        value: i64,
        lb: i64,
        ub: i64,
    },

    #[error("interval '{name}' is present but start + duration != end")]
    InconsistentInterval { name: String },

    #[error("constraint #{index} ({kind}) is violated")]
    Violated { index: usize, kind: ConstraintKind },
}

/// A recorded constraint programming model.
///
/// Implements [`ModelSink`] by storing variables, intervals and posted
/// constraints. It performs no search; [`CpModel::check`] verifies a
/// complete assignment against everything that was posted.
///
/// # Examples
///
/// ```
/// use u_schedule_cp::cp::{Constraint, CpModel, ModelSink};
///
/// let mut model = CpModel::new("example");
/// let x = model.new_int_var(0, 10, "x");
/// let y = model.new_int_var(0, 10, "y");
/// let b = model.new_bool_var("b");
/// model.add_if(Constraint::le(x + 3_i64, y), [b]);
/// assert_eq!(model.constraints().len(), 1);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    vars: Vec<IntDomain>,
    intervals: Vec<Interval>,
    constraints: Vec<PostedConstraint>,
    names: HashMap<String, IntVar>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of integer variables (booleans included).
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of interval variables.
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Domain of a variable.
    pub fn domain(&self, var: IntVar) -> Option<&IntDomain> {
        self.vars.get(var.index())
    }

    /// Components of an interval.
    pub fn interval(&self, var: IntervalVar) -> Option<&Interval> {
        self.intervals.get(var.index())
    }

    /// All posted constraints, in posting order.
    pub fn constraints(&self) -> &[PostedConstraint] {
        &self.constraints
    }

    /// Number of posted constraints of the given kind.
    pub fn count_kind(&self, kind: ConstraintKind) -> usize {
        self.constraints
            .iter()
            .filter(|c| c.constraint.kind() == kind)
            .count()
    }

    /// Looks up a variable by name. Unnamed variables are not indexed.
    pub fn find_var(&self, name: &str) -> Option<IntVar> {
        self.names.get(name).copied()
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable and interval exists and
    /// that global constraints have well-formed arguments.
    pub fn validate(&self) -> Result<(), ModelError> {
        for interval in &self.intervals {
            for var in [
                interval.start,
                interval.duration,
                interval.end,
                interval.present.var().as_int(),
            ] {
                self.ensure_var(var)?;
            }
        }

        for (index, posted) in self.constraints.iter().enumerate() {
            for lit in &posted.enforcement {
                self.ensure_var(lit.var().as_int())?;
            }

            let kind = posted.constraint.kind();
            let malformed = |reason: &str| ModelError::Malformed {
                index,
                kind,
                reason: reason.to_string(),
            };

            match &posted.constraint {
                Constraint::Linear { expr, .. } => {
                    for var in expr.vars() {
                        self.ensure_var(var)?;
                    }
                }
                Constraint::MinEquality { target, vars }
                | Constraint::MaxEquality { target, vars } => {
                    if vars.is_empty() {
                        return Err(malformed("empty operand list"));
                    }
                    self.ensure_var(*target)?;
                    for &var in vars {
                        self.ensure_var(var)?;
                    }
                }
                Constraint::NoOverlap { intervals } => {
                    for &interval in intervals {
                        self.ensure_interval(interval)?;
                    }
                }
                Constraint::Cumulative {
                    intervals,
                    demands,
                    ..
                } => {
                    if intervals.len() != demands.len() {
                        return Err(malformed("intervals and demands length mismatch"));
                    }
                    for &interval in intervals {
                        self.ensure_interval(interval)?;
                    }
                }
                Constraint::Circuit { arcs } => {
                    for arc in arcs {
                        self.ensure_var(arc.literal.var().as_int())?;
                    }
                }
            }
        }

        Ok(())
    }

    fn ensure_var(&self, var: IntVar) -> Result<(), ModelError> {
        if var.index() < self.vars.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownVariable(var.index()))
        }
    }

    fn ensure_interval(&self, var: IntervalVar) -> Result<(), ModelError> {
        if var.index() < self.intervals.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownInterval(var.index()))
        }
    }

    pub(super) fn domains(&self) -> &[IntDomain] {
        &self.vars
    }

    pub(super) fn intervals(&self) -> &[Interval] {
        &self.intervals
    }
}

impl ModelSink for CpModel {
    fn new_int_var(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> IntVar {
        let var = IntVar::new(self.vars.len());
        let name = name.into();
        if !name.is_empty() {
            self.names.insert(name.clone(), var);
        }
        self.vars.push(IntDomain::new(name, lb, ub));
        var
    }

    fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        BoolVar::new(self.new_int_var(0, 1, name))
    }

    fn new_optional_interval(
        &mut self,
        start: IntVar,
        duration: IntVar,
        end: IntVar,
        present: Literal,
        name: impl Into<String>,
    ) -> IntervalVar {
        let var = IntervalVar::new(self.intervals.len());
        self.intervals.push(Interval {
            name: name.into(),
            start,
            duration,
            end,
            present,
        });
        var
    }

    fn post(&mut self, constraint: Constraint, enforcement: Vec<Literal>) {
        self.constraints.push(PostedConstraint {
            constraint,
            enforcement,
        });
    }

    fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
