//! Constraint Programming (CP) modelling layer.
//!
//! A solver-agnostic vocabulary of variables and constraints, plus the
//! [`ModelSink`] seam that the scheduling encoder writes into.
//!
//! # Key Components
//!
//! - **Variables**: [`IntVar`], [`BoolVar`], [`Literal`], [`IntervalVar`]: handles
//! - **Expressions**: [`LinearExpr`]: weighted sums with a constant
//! - **Constraints**: [`Constraint`]: Linear, Min/MaxEquality, NoOverlap,
//!   Cumulative, Circuit; each posted with optional enforcement literals
//! - **Sink**: [`ModelSink`] trait: implemented by solver adapters
//! - **Model**: [`CpModel`]: in-crate sink that records everything and can
//!   [`check`](CpModel::check) a complete [`Solution`]
//!
//! # Design
//!
//! This module defines the modelling layer only. It does NOT include a
//! propagation or search engine; global constraints are treated as
//! primitives of whatever engine sits behind the sink.
//!
//! # References
//!
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"
//! - Laborie et al. (2018), "IBM ILOG CP Optimizer for Scheduling"

mod check;
mod expr;
mod model;
mod sink;
mod variables;

pub use check::Solution;
pub use expr::LinearExpr;
pub use model::{
    CircuitArc, Constraint, ConstraintKind, CpModel, ModelError, PostedConstraint, Relation,
};
pub use sink::ModelSink;
pub use variables::{BoolVar, IntDomain, IntVar, Interval, IntervalVar, Literal};
