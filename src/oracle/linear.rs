//! Linear rows over the binary decision variables.
//!
//! Every clue is lowered to a small set of equalities/inequalities of the
//! form `Σ coef·x {==,<=,>=} rhs`, where each `x` is a 0/1 decision variable
//! identifying "person p holds value v in dimension d".

/// Identifies a single 0/1 decision variable. Packing/unpacking of
/// (person, dimension, value) triples is owned by the model.
pub type VarId = u32;

/// A signed integer combination of decision variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearExpr {
    pub terms: Vec<(i64, VarId)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Appends `coef · var` to the expression.
    pub fn plus(mut self, coef: i64, var: VarId) -> Self {
        self.terms.push((coef, var));
        self
    }

    /// The smallest/largest value the expression can take over free 0/1
    /// assignments of its variables.
    pub fn bounds(&self) -> (i64, i64) {
        let lo = self.terms.iter().map(|&(c, _)| c.min(0)).sum();
        let hi = self.terms.iter().map(|&(c, _)| c.max(0)).sum();
        (lo, hi)
    }
}

impl Default for LinearExpr {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

/// One row handed to the oracle: `expr relation rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn eq(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            relation: Relation::Eq,
            rhs,
        }
    }

    pub fn le(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            relation: Relation::Le,
            rhs,
        }
    }

    pub fn ge(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            relation: Relation::Ge,
            rhs,
        }
    }

    /// Evaluates the row against a complete assignment, where `value_of`
    /// reports whether a variable is set.
    pub fn satisfied_by(&self, value_of: impl Fn(VarId) -> bool) -> bool {
        let lhs: i64 = self
            .expr
            .terms
            .iter()
            .filter(|(_, var)| value_of(*var))
            .map(|(coef, _)| *coef)
            .sum();
        match self.relation {
            Relation::Eq => lhs == self.rhs,
            Relation::Le => lhs <= self.rhs,
            Relation::Ge => lhs >= self.rhs,
        }
    }
}
