//! Linear expressions over integer variables.

use std::ops::{Add, Mul, Neg, Sub};

use super::variables::{BoolVar, IntVar, Literal};

/// A linear expression `sum(coeff * var) + constant`.
///
/// Literals convert to `var` or `1 - var`, so presence flags and their
/// negations can be summed directly.
///
/// # Examples
///
/// ```
/// use u_schedule_cp::cp::{IntVar, LinearExpr};
///
/// let x = IntVar::new(0);
/// let y = IntVar::new(1);
/// let expr = LinearExpr::from(x) + y * 2 - 3_i64;
/// assert_eq!(expr.evaluate(|v| [4, 5][v.index()]), 11);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(IntVar, i64)>,
    constant: i64,
}

impl LinearExpr {
    /// The empty expression (evaluates to 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// A constant expression.
    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// A single weighted term.
    pub fn term(var: IntVar, coeff: i64) -> Self {
        Self {
            terms: vec![(var, coeff)],
            constant: 0,
        }
    }

    /// Sum of the given expressions.
    pub fn sum<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LinearExpr>,
    {
        items
            .into_iter()
            .fold(Self::new(), |acc, item| acc + Into::<LinearExpr>::into(item))
    }

    /// Weighted sum `sum(coeff * var)`.
    pub fn weighted_sum(terms: impl IntoIterator<Item = (IntVar, i64)>) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    /// The variable terms.
    pub fn terms(&self) -> &[(IntVar, i64)] {
        &self.terms
    }

    /// The constant offset.
    pub fn offset(&self) -> i64 {
        self.constant
    }

    /// Evaluates the expression with the given variable values.
    pub fn evaluate(&self, value: impl Fn(IntVar) -> i64) -> i64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(var, coeff)| acc + coeff * value(var))
    }

    /// Variables referenced by this expression.
    pub fn vars(&self) -> impl Iterator<Item = IntVar> + '_ {
        self.terms.iter().map(|&(var, _)| var)
    }
}

impl From<IntVar> for LinearExpr {
    fn from(var: IntVar) -> Self {
        Self::term(var, 1)
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(var: BoolVar) -> Self {
        Self::term(var.as_int(), 1)
    }
}

impl From<Literal> for LinearExpr {
    fn from(lit: Literal) -> Self {
        let var = lit.var().as_int();
        if lit.is_negated() {
            Self {
                terms: vec![(var, -1)],
                constant: 1,
            }
        } else {
            Self::term(var, 1)
        }
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl<T: Into<LinearExpr>> Add<T> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: T) -> LinearExpr {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl<T: Into<LinearExpr>> Sub<T> for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: T) -> LinearExpr {
        let rhs: LinearExpr = rhs.into();
        self + (-rhs)
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, rhs: i64) -> LinearExpr {
        for (_, coeff) in &mut self.terms {
            *coeff *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl<T: Into<LinearExpr>> Add<T> for IntVar {
    type Output = LinearExpr;

    fn add(self, rhs: T) -> LinearExpr {
        LinearExpr::from(self) + rhs
    }
}

impl<T: Into<LinearExpr>> Sub<T> for IntVar {
    type Output = LinearExpr;

    fn sub(self, rhs: T) -> LinearExpr {
        LinearExpr::from(self) - rhs
    }
}

impl Mul<i64> for IntVar {
    type Output = LinearExpr;

    fn mul(self, rhs: i64) -> LinearExpr {
        LinearExpr::term(self, rhs)
    }
}
