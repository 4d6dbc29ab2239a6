//! Scheduling constraints and setup-time matrices.
//!
//! Defines the side constraints a schedule must satisfy on top of the
//! resource model: timing (precedence) relations between tasks, resource
//! coupling between task pairs, immediate adjacency on machines,
//! sequence-dependent setup times and flow roles.
//!
//! # Reference
//! Brucker (2007), "Scheduling Algorithms", Ch. 2

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identity of a timing constraint instance.
///
/// Decision variables attached to individual precedence instances (flow
/// literals) are keyed by this id, never by list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrecedenceId(pub usize);

/// The four timing relations between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingKind {
    /// `start(task1) + delay <= start(task2)`
    StartBeforeStart,
    /// `start(task1) + delay <= end(task2)`
    StartBeforeEnd,
    /// `end(task1) + delay <= start(task2)`
    EndBeforeStart,
    /// `end(task1) + delay <= end(task2)`
    EndBeforeEnd,
}

/// Which time point of a task a relation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePoint {
    Start,
    End,
}

impl TimingKind {
    /// All kinds, in encoding order.
    pub const ALL: [TimingKind; 4] = [
        TimingKind::StartBeforeStart,
        TimingKind::StartBeforeEnd,
        TimingKind::EndBeforeStart,
        TimingKind::EndBeforeEnd,
    ];

    /// Time points compared for `(task1, task2)`.
    pub fn points(self) -> (TimePoint, TimePoint) {
        match self {
            Self::StartBeforeStart => (TimePoint::Start, TimePoint::Start),
            Self::StartBeforeEnd => (TimePoint::Start, TimePoint::End),
            Self::EndBeforeStart => (TimePoint::End, TimePoint::Start),
            Self::EndBeforeEnd => (TimePoint::End, TimePoint::End),
        }
    }
}

/// A timing relation instance `time(task1) + delay <= time(task2)`.
///
/// Only binding when both tasks are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConstraint {
    /// Instance identity.
    pub id: PrecedenceId,
    /// First task.
    pub task1: usize,
    /// Second task.
    pub task2: usize,
    /// Minimum delay (may be negative).
    #[serde(default)]
    pub delay: i64,
}

/// Flow role of a task in its job's precedence flow network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRole {
    /// Exactly one outgoing flow arc.
    Source,
    /// Exactly one incoming flow arc.
    Sink,
    /// In-flow and out-flow both equal the task's presence.
    Intermediate,
}

/// Sequence-dependent setup times of one machine.
///
/// Maps (from task, to task) → setup time. Stored densely; entries that
/// were never set are 0.
///
/// # Reference
/// Allahverdi et al. (2008), "A survey of scheduling problems with
/// setup times or costs"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupMatrix {
    /// `times[from][to]`; rows may be ragged.
    times: Vec<Vec<i64>>,
}

impl SetupMatrix {
    /// Creates an all-zero matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a matrix from dense rows.
    pub fn from_rows(times: Vec<Vec<i64>>) -> Self {
        Self { times }
    }

    /// Defines the setup time between two tasks.
    pub fn set(&mut self, from: usize, to: usize, time: i64) {
        if self.times.len() <= from {
            self.times.resize_with(from + 1, Vec::new);
        }
        let row = &mut self.times[from];
        if row.len() <= to {
            row.resize(to + 1, 0);
        }
        row[to] = time;
    }

    /// Setup time when `to` directly follows `from`.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.times
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Whether any setup time is non-zero.
    pub fn has_nonzero(&self) -> bool {
        self.times.iter().flatten().any(|&t| t != 0)
    }

    /// Explicitly stored `(from, to, time)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.times.iter().enumerate().flat_map(|(from, row)| {
            row.iter().enumerate().map(move |(to, &time)| (from, to, time))
        })
    }
}

/// Setup matrices indexed by machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupTimes {
    matrices: BTreeMap<usize, SetupMatrix>,
}

impl SetupTimes {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the setup time on `resource` between two tasks.
    pub fn set(&mut self, resource: usize, from: usize, to: usize, time: i64) {
        self.matrices.entry(resource).or_default().set(from, to, time);
    }

    /// Installs a whole matrix for `resource`.
    pub fn insert(&mut self, resource: usize, matrix: SetupMatrix) {
        self.matrices.insert(resource, matrix);
    }

    /// Setup time on `resource` between two tasks (0 if undefined).
    pub fn get(&self, resource: usize, from: usize, to: usize) -> i64 {
        self.matrices
            .get(&resource)
            .map(|m| m.get(from, to))
            .unwrap_or(0)
    }

    /// Matrix of `resource`, if any.
    pub fn matrix(&self, resource: usize) -> Option<&SetupMatrix> {
        self.matrices.get(&resource)
    }

    /// Whether `resource` has any non-zero setup time.
    pub fn has_nonzero(&self, resource: usize) -> bool {
        self.matrix(resource).is_some_and(SetupMatrix::has_nonzero)
    }

    /// Iterates `(resource, matrix)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SetupMatrix)> {
        self.matrices.iter().map(|(&r, m)| (r, m))
    }

    /// Number of matrices.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether no matrix is defined.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// All side constraints of a problem instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub start_before_start: Vec<TimingConstraint>,
    pub start_before_end: Vec<TimingConstraint>,
    pub end_before_start: Vec<TimingConstraint>,
    pub end_before_end: Vec<TimingConstraint>,
    /// Task pairs that must use identical resources.
    pub identical_resources: Vec<(usize, usize)>,
    /// Task pairs that must use disjoint resources.
    pub different_resources: Vec<(usize, usize)>,
    /// Task pairs that must be adjacent on any shared machine.
    pub consecutive: Vec<(usize, usize)>,
    /// Sequence-dependent setup times per machine.
    pub setup_times: SetupTimes,
}

impl Constraints {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Timing constraints of the given kind.
    pub fn timing(&self, kind: TimingKind) -> &[TimingConstraint] {
        match kind {
            TimingKind::StartBeforeStart => &self.start_before_start,
            TimingKind::StartBeforeEnd => &self.start_before_end,
            TimingKind::EndBeforeStart => &self.end_before_start,
            TimingKind::EndBeforeEnd => &self.end_before_end,
        }
    }

    fn timing_mut(&mut self, kind: TimingKind) -> &mut Vec<TimingConstraint> {
        match kind {
            TimingKind::StartBeforeStart => &mut self.start_before_start,
            TimingKind::StartBeforeEnd => &mut self.start_before_end,
            TimingKind::EndBeforeStart => &mut self.end_before_start,
            TimingKind::EndBeforeEnd => &mut self.end_before_end,
        }
    }

    /// Adds a timing constraint and returns its id.
    ///
    /// Ids are unique across all four kinds.
    pub fn add_timing(
        &mut self,
        kind: TimingKind,
        task1: usize,
        task2: usize,
        delay: i64,
    ) -> PrecedenceId {
        let id = PrecedenceId(self.next_precedence_id());
        self.timing_mut(kind).push(TimingConstraint {
            id,
            task1,
            task2,
            delay,
        });
        id
    }

    /// Iterates all timing constraints with their kind.
    pub fn all_timing(&self) -> impl Iterator<Item = (TimingKind, &TimingConstraint)> {
        TimingKind::ALL
            .into_iter()
            .flat_map(move |kind| self.timing(kind).iter().map(move |c| (kind, c)))
    }

    fn next_precedence_id(&self) -> usize {
        self.all_timing()
            .map(|(_, c)| c.id.0 + 1)
            .max()
            .unwrap_or(0)
    }
}
