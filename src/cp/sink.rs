//! The model sink interface.

use super::model::Constraint;
use super::variables::{BoolVar, IntVar, IntervalVar, Literal};

/// A mutable CP model that variables and constraints are added to.
///
/// This is the seam to the solver engine: an adapter for an external
/// engine (e.g. OR-Tools CP-SAT) implements this trait and translates
/// each [`Constraint`] into its native form, including the enforcement
/// literals of reified constraints. [`CpModel`](super::CpModel) is the
/// in-crate implementation that simply records everything.
pub trait ModelSink {
    /// Creates an integer variable with domain `[lb, ub]`.
    fn new_int_var(&mut self, lb: i64, ub: i64, name: impl Into<String>) -> IntVar;

    /// Creates a boolean variable.
    fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar;

    /// Creates an optional interval `start + duration == end`, enforced
    /// only while `present` holds.
    fn new_optional_interval(
        &mut self,
        start: IntVar,
        duration: IntVar,
        end: IntVar,
        present: Literal,
        name: impl Into<String>,
    ) -> IntervalVar;

    /// Posts a constraint that holds whenever all `enforcement` literals
    /// are true. An empty enforcement list posts it unconditionally.
    fn post(&mut self, constraint: Constraint, enforcement: Vec<Literal>);

    /// Number of constraints posted so far.
    fn constraint_count(&self) -> usize;

    /// Posts an unconditional constraint.
    fn add(&mut self, constraint: Constraint) {
        self.post(constraint, Vec::new());
    }

    /// Posts a constraint enforced by the conjunction of `enforcement`.
    fn add_if<L>(&mut self, constraint: Constraint, enforcement: impl IntoIterator<Item = L>)
    where
        L: Into<Literal>,
    {
        let literals = enforcement.into_iter().map(Into::into).collect();
        self.post(constraint, literals);
    }
}
