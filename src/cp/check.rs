//! Assignment checking.
//!
//! Verifies a complete variable assignment against a recorded
//! [`CpModel`]. Global constraints are checked against their
//! mathematical definition, not against any propagation algorithm.
//!
//! # Reference
//! Baptiste, Le Pape & Nuijten (2001), "Constraint-Based Scheduling", Ch. 1

use super::model::{CircuitArc, Constraint, CpModel, ModelError, Relation};
use super::variables::{BoolVar, IntVar, IntervalVar, Literal};

/// A (possibly partial) assignment of values to model variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    values: Vec<Option<i64>>,
}

impl Solution {
    /// Creates an empty assignment sized for `model`.
    pub fn new(model: &CpModel) -> Self {
        Self {
            values: vec![None; model.var_count()],
        }
    }

    /// Assigns a value to a variable.
    pub fn set(&mut self, var: IntVar, value: i64) {
        let index = var.index();
        if index >= self.values.len() {
            self.values.resize(index + 1, None);
        }
        self.values[index] = Some(value);
    }

    /// Assigns a boolean variable.
    pub fn set_bool(&mut self, var: BoolVar, value: bool) {
        self.set(var.as_int(), i64::from(value));
    }

    /// Value of a variable, if assigned.
    pub fn value(&self, var: IntVar) -> Option<i64> {
        self.values.get(var.index()).copied().flatten()
    }

    /// Value of a boolean variable, if assigned.
    pub fn bool_value(&self, var: BoolVar) -> Option<bool> {
        self.value(var.as_int()).map(|v| v != 0)
    }

    /// Truth value of a literal, if its variable is assigned.
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.var().as_int()).map(|v| lit.holds(v))
    }

    /// Number of assigned variables.
    pub fn assigned_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

impl CpModel {
    /// Checks a complete assignment against the model.
    ///
    /// Checks, in order: model validity, that every variable is assigned
    /// within its domain, that present intervals satisfy
    /// `start + duration == end`, and that every constraint whose
    /// enforcement literals all hold is satisfied. Returns the first
    /// failure found.
    pub fn check(&self, solution: &Solution) -> Result<(), ModelError> {
        self.validate()?;

        for (index, domain) in self.domains().iter().enumerate() {
            let value = solution
                .value(IntVar::new(index))
                .ok_or_else(|| ModelError::Unassigned {
                    index,
                    name: domain.name.clone(),
                })?;
            if !domain.contains(value) {
                return Err(ModelError::OutOfDomain {
                    name: domain.name.clone(),
                    value,
                    lb: domain.lb,
                    ub: domain.ub,
                });
            }
        }

        let value = |var: IntVar| solution.value(var).unwrap_or_default();

        for interval in self.intervals() {
            let present = interval.present.holds(value(interval.present.var().as_int()));
            if present && value(interval.start) + value(interval.duration) != value(interval.end)
            {
                return Err(ModelError::InconsistentInterval {
                    name: interval.name.clone(),
                });
            }
        }

        for (index, posted) in self.constraints().iter().enumerate() {
            let enforced = posted
                .enforcement
                .iter()
                .all(|lit| lit.holds(value(lit.var().as_int())));
            if enforced && !self.is_satisfied(&posted.constraint, &value) {
                return Err(ModelError::Violated {
                    index,
                    kind: posted.constraint.kind(),
                });
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, constraint: &Constraint, value: &impl Fn(IntVar) -> i64) -> bool {
        match constraint {
            Constraint::Linear { expr, relation } => {
                let lhs = expr.evaluate(value);
                match relation {
                    Relation::Eq => lhs == 0,
                    Relation::Le => lhs <= 0,
                }
            }
            Constraint::MinEquality { target, vars } => {
                vars.iter().map(|&v| value(v)).min() == Some(value(*target))
            }
            Constraint::MaxEquality { target, vars } => {
                vars.iter().map(|&v| value(v)).max() == Some(value(*target))
            }
            Constraint::NoOverlap { intervals } => {
                let mut spans: Vec<(i64, i64)> = intervals
                    .iter()
                    .filter_map(|&iv| self.present_span(iv, value))
                    .filter(|&(start, end)| end > start)
                    .collect();
                spans.sort_unstable();
                spans.windows(2).all(|pair| pair[0].1 <= pair[1].0)
            }
            Constraint::Cumulative {
                intervals,
                demands,
                capacity,
            } => {
                let spans: Vec<(i64, i64, i64)> = intervals
                    .iter()
                    .zip(demands)
                    .filter_map(|(&iv, &demand)| {
                        self.present_span(iv, value)
                            .map(|(start, end)| (start, end, demand))
                    })
                    .collect();

                // Load only increases at interval starts.
                spans.iter().all(|&(t, _, _)| {
                    let load: i64 = spans
                        .iter()
                        .filter(|&&(start, end, _)| start <= t && t < end)
                        .map(|&(_, _, demand)| demand)
                        .sum();
                    load <= *capacity
                })
            }
            Constraint::Circuit { arcs } => is_single_circuit(arcs, value),
        }
    }

    fn present_span(
        &self,
        interval: IntervalVar,
        value: &impl Fn(IntVar) -> i64,
    ) -> Option<(i64, i64)> {
        let interval = self.interval(interval)?;
        let present = interval.present.holds(value(interval.present.var().as_int()));
        present.then(|| (value(interval.start), value(interval.end)))
    }
}

/// Every node has exactly one selected outgoing and one selected incoming
/// arc, and the nodes without a selected self-loop form a single cycle.
fn is_single_circuit(arcs: &[CircuitArc], value: &impl Fn(IntVar) -> i64) -> bool {
    let num_nodes = arcs
        .iter()
        .map(|arc| arc.tail.max(arc.head) + 1)
        .max()
        .unwrap_or(0);

    let mut seen = vec![false; num_nodes];
    let mut out_degree = vec![0usize; num_nodes];
    let mut in_degree = vec![0usize; num_nodes];
    let mut next: Vec<Option<usize>> = vec![None; num_nodes];

    for arc in arcs {
        seen[arc.tail] = true;
        seen[arc.head] = true;
        if arc.literal.holds(value(arc.literal.var().as_int())) {
            out_degree[arc.tail] += 1;
            in_degree[arc.head] += 1;
            if arc.tail != arc.head {
                next[arc.tail] = Some(arc.head);
            }
        }
    }

    let degrees_ok = (0..num_nodes)
        .filter(|&node| seen[node])
        .all(|node| out_degree[node] == 1 && in_degree[node] == 1);
    if !degrees_ok {
        return false;
    }

    let visited: Vec<usize> = (0..num_nodes).filter(|&n| next[n].is_some()).collect();
    let Some(&first) = visited.first() else {
        return true;
    };

    let mut node = first;
    let mut length = 0;
    loop {
        match next[node] {
            Some(successor) => node = successor,
            None => return false,
        }
        length += 1;
        if node == first {
            return length == visited.len();
        }
        if length > visited.len() {
            return false;
        }
    }
}
