//! CP variable handles.
//!
//! Variables are owned by the model sink; the encoder only ever holds
//! copyable handles into it. A boolean variable is an integer variable
//! with domain [0, 1], so it can appear directly in linear expressions.

use std::ops::Not;

/// Handle to an integer variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(usize);

impl IntVar {
    /// Creates a handle from a sink-specific index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Sink-specific index of this variable.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a boolean variable.
///
/// Backed by an [`IntVar`] whose domain is [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(IntVar);

impl BoolVar {
    /// Wraps an integer variable that the sink created with domain [0, 1].
    pub fn new(var: IntVar) -> Self {
        Self(var)
    }

    /// The underlying 0/1 integer variable.
    pub fn as_int(self) -> IntVar {
        self.0
    }

    /// The positive literal of this variable.
    pub fn literal(self) -> Literal {
        Literal {
            var: self,
            negated: false,
        }
    }
}

impl Not for BoolVar {
    type Output = Literal;

    fn not(self) -> Literal {
        !self.literal()
    }
}

/// A boolean variable or its negation.
///
/// Used as enforcement condition of reified constraints and as arc
/// selector in circuit constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    var: BoolVar,
    negated: bool,
}

impl Literal {
    /// The variable this literal refers to.
    pub fn var(self) -> BoolVar {
        self.var
    }

    /// Whether this is the negative literal.
    pub fn is_negated(self) -> bool {
        self.negated
    }

    /// Truth value of the literal given the value of its variable.
    pub fn holds(self, value: i64) -> bool {
        (value != 0) != self.negated
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        var.literal()
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            negated: !self.negated,
        }
    }
}

/// Handle to an optional interval variable.
///
/// The interval ties `start + duration == end` together whenever its
/// presence literal is true; absent intervals are ignored by global
/// constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalVar(usize);

impl IntervalVar {
    /// Creates a handle from a sink-specific index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Sink-specific index of this interval.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Named integer domain `[lb, ub]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntDomain {
    /// Variable name (may be empty).
    pub name: String,
    /// Lower bound (inclusive).
    pub lb: i64,
    /// Upper bound (inclusive).
    pub ub: i64,
}

impl IntDomain {
    /// Creates a new domain.
    pub fn new(name: impl Into<String>, lb: i64, ub: i64) -> Self {
        Self {
            name: name.into(),
            lb,
            ub,
        }
    }

    /// Whether `value` lies within the domain.
    pub fn contains(&self, value: i64) -> bool {
        self.lb <= value && value <= self.ub
    }

    /// Whether the domain is a single value.
    pub fn is_fixed(&self) -> bool {
        self.lb == self.ub
    }
}

/// The components of an optional interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Interval name.
    pub name: String,
    /// Start time variable.
    pub start: IntVar,
    /// Duration variable.
    pub duration: IntVar,
    /// End time variable.
    pub end: IntVar,
    /// Presence literal.
    pub present: Literal,
}
