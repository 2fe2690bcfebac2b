//! Expressions et contraintes linéaires sur les variables booléennes du
//! modèle, indépendantes du moteur de résolution.

use crate::scheduler::{ConstraintKind, VarId};
use std::collections::BTreeMap;
use std::fmt;

/// Somme pondérée de variables plus une constante.
///
/// Les termes sont rangés par `VarId` : deux constructions identiques
/// produisent toujours la même expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: BTreeMap<VarId, i64>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vars<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_term(var, 1);
        }
        expr
    }

    /// Ajoute `coef · var` ; les coefficients d'une même variable s'additionnent.
    pub fn add_term(&mut self, var: VarId, coef: i64) {
        let entry = self.terms.entry(var).or_insert(0);
        *entry += coef;
        if *entry == 0 {
            self.terms.remove(&var);
        }
    }

    pub fn add_constant(&mut self, value: i64) {
        self.constant += value;
    }

    pub fn plus(mut self, other: &LinearExpr) -> Self {
        for (&var, &coef) in &other.terms {
            self.add_term(var, coef);
        }
        self.constant += other.constant;
        self
    }

    pub fn minus(mut self, other: &LinearExpr) -> Self {
        for (&var, &coef) in &other.terms {
            self.add_term(var, -coef);
        }
        self.constant -= other.constant;
        self
    }

    pub fn terms(&self) -> impl Iterator<Item = (VarId, i64)> + '_ {
        self.terms.iter().map(|(&v, &c)| (v, c))
    }

    pub fn coefficient(&self, var: VarId) -> i64 {
        self.terms.get(&var).copied().unwrap_or(0)
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Évalue l'expression pour une affectation 0/1 indexée par `VarId`.
    pub fn eval(&self, values: &[bool]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .filter(|(var, _)| values.get(var.index()).copied().unwrap_or(false))
                .map(|(_, coef)| *coef)
                .sum::<i64>()
    }

    pub fn equal(self, rhs: i64) -> LinearConstraint {
        LinearConstraint::new(self, Relation::Eq, rhs)
    }

    pub fn at_most(self, rhs: i64) -> LinearConstraint {
        LinearConstraint::new(self, Relation::Le, rhs)
    }

    pub fn at_least(self, rhs: i64) -> LinearConstraint {
        LinearConstraint::new(self, Relation::Ge, rhs)
    }

    /// `lo ≤ expr ≤ hi`, émis sous forme de deux inégalités.
    pub fn between(self, lo: i64, hi: i64) -> [LinearConstraint; 2] {
        [self.clone().at_least(lo), self.at_most(hi)]
    }
}

impl fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (var, coef) in self.terms() {
            let sign = if coef < 0 { "-" } else if first { "" } else { "+" };
            let abs = coef.abs();
            if !first {
                f.write_str(" ")?;
            }
            if abs == 1 {
                write!(f, "{sign}{var}")?;
            } else {
                write!(f, "{sign}{abs}*{var}")?;
            }
            first = false;
        }
        if self.constant != 0 || first {
            if first {
                write!(f, "{}", self.constant)?;
            } else {
                write!(f, " {:+}", self.constant)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Eq => "==",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        })
    }
}

/// Contrainte `expr (==|<=|>=) rhs`, étiquetée par la règle qui l'a émise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
    pub kind: ConstraintKind,
}

impl LinearConstraint {
    pub fn new(expr: LinearExpr, relation: Relation, rhs: i64) -> Self {
        Self {
            expr,
            relation,
            rhs,
            kind: ConstraintKind::Unlabeled,
        }
    }

    pub fn tagged(mut self, kind: ConstraintKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let lhs = self.expr.eval(values);
        match self.relation {
            Relation::Eq => lhs == self.rhs,
            Relation::Le => lhs <= self.rhs,
            Relation::Ge => lhs >= self.rhs,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {} {}", self.kind, self.expr, self.relation, self.rhs)
    }
}
