//! Adaptateur vers le moteur de résolution externe.
//!
//! Le modèle est traduit en programme linéaire en nombres entiers `good_lp`
//! (variables binaires) et résolu par `microlp`, sur un fil dédié pour
//! pouvoir abandonner à l'expiration du délai.

use crate::linear::{LinearExpr, Relation};
use crate::scheduler::{RosterError, ScheduleModel, VarId};
use good_lp::solvers::microlp::microlp;
use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Statut rapporté par le moteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    /// Délai ou ressources épuisés sans preuve d'infaisabilité.
    Unknown,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    pub time_limit: Option<Duration>,
}

impl SolveOptions {
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
        }
    }
}

/// Valeur 0/1 de chaque variable, indexée par `VarId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    pub fn new(values: Vec<bool>) -> Self {
        Self { values }
    }
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }
    pub fn values(&self) -> &[bool] {
        &self.values
    }
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Présente pour `Optimal` et `Feasible`.
    pub assignment: Option<Assignment>,
    pub objective: Option<i64>,
    pub wall_time: Duration,
}

impl SolveOutcome {
    fn without_solution(status: SolveStatus, wall_time: Duration) -> Self {
        Self {
            status,
            assignment: None,
            objective: None,
            wall_time,
        }
    }
}

/// Moteur de résolution : variables booléennes, contraintes linéaires,
/// objectif linéaire à minimiser.
///
/// Un délai épuisé rend `Unknown` ; selon le moteur, le calcul peut
/// continuer en arrière-plan après le retour.
pub trait SolverBackend {
    fn name(&self) -> &'static str;
    fn solve(&self, model: &ScheduleModel, opts: &SolveOptions) -> Result<SolveOutcome, RosterError>;
}

/// Résolution MILP via `good_lp` + `microlp` (pur Rust).
///
/// `microlp` ne s'interrompt pas : à l'expiration du délai, le fil
/// `garde-solver` reste occupé jusqu'à la fin de sa résolution. Des appels
/// répétés avec un délai court accumulent donc des fils actifs.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpBackend;

impl SolverBackend for MicroLpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &ScheduleModel, opts: &SolveOptions) -> Result<SolveOutcome, RosterError> {
        let start = Instant::now();
        let job = model.clone();
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("garde-solver".into())
            .spawn(move || {
                let _ = tx.send(run_microlp(&job));
            })
            .map_err(|e| RosterError::Solver(format!("spawning solver thread: {e}")))?;

        let raw = match opts.time_limit {
            Some(limit) => match rx.recv_timeout(limit) {
                Ok(raw) => raw,
                Err(RecvTimeoutError::Timeout) => {
                    warn!(?limit, "solver time limit reached");
                    return Ok(SolveOutcome::without_solution(SolveStatus::Unknown, start.elapsed()));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(RosterError::Solver("solver thread terminated unexpectedly".into()))
                }
            },
            None => rx
                .recv()
                .map_err(|_| RosterError::Solver("solver thread terminated unexpectedly".into()))?,
        };
        let wall_time = start.elapsed();

        match raw {
            Ok(values) => {
                let assignment = Assignment::new(values);
                let broken = model.violations(assignment.values());
                if let Some(first) = broken.first() {
                    return Err(RosterError::Solver(format!(
                        "returned assignment violates {} constraint(s), first: {first}",
                        broken.len()
                    )));
                }
                let objective = model.objective_value(assignment.values());
                info!(backend = self.name(), objective, ?wall_time, "optimal roster found");
                Ok(SolveOutcome {
                    status: SolveStatus::Optimal,
                    assignment: Some(assignment),
                    objective: Some(objective),
                    wall_time,
                })
            }
            Err(ResolutionError::Infeasible) => {
                info!(backend = self.name(), ?wall_time, "model proven infeasible");
                Ok(SolveOutcome::without_solution(SolveStatus::Infeasible, wall_time))
            }
            Err(err) => Err(RosterError::Solver(err.to_string())),
        }
    }
}

fn run_microlp(model: &ScheduleModel) -> Result<Vec<bool>, ResolutionError> {
    let vars = model.vars();
    let mut problem = ProblemVariables::new();
    let xs: Vec<Variable> = vars
        .iter()
        .map(|v| problem.add(variable().binary().name(vars.name(v))))
        .collect();

    let mut lp = problem
        .minimise(to_expression(model.objective(), &xs))
        .using(microlp);
    for c in model.constraints() {
        let lhs = to_expression(&c.expr, &xs);
        let rhs = Expression::from(c.rhs as f64);
        lp.add_constraint(match c.relation {
            Relation::Eq => constraint::eq(lhs, rhs),
            Relation::Le => constraint::leq(lhs, rhs),
            Relation::Ge => constraint::geq(lhs, rhs),
        });
    }

    let solution = lp.solve()?;
    Ok(xs.iter().map(|&x| solution.value(x) > 0.5).collect())
}

fn to_expression(expr: &LinearExpr, xs: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant() as f64);
    for (var, coef) in expr.terms() {
        out += coef as f64 * xs[var.index()];
    }
    out
}
