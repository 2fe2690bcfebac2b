mod coverage;
mod objective;
mod rest;
mod types;
mod variables;
mod weekend;
mod workload;

pub use objective::RequestWeights;
pub use rest::continuity_window;
pub use types::{ConstraintKind, RosterBounds, RosterError, WindowFamily};
pub use variables::{VarId, VariableModel};

use crate::linear::{LinearConstraint, LinearExpr};
use crate::model::RosterConfig;
use tracing::debug;

/// Modèle complet (variables, contraintes, objectif) remis au moteur.
///
/// Construit une fois par `ScheduleModelBuilder`, jamais modifié ensuite.
#[derive(Debug, Clone)]
pub struct ScheduleModel {
    config: RosterConfig,
    vars: VariableModel,
    bounds: RosterBounds,
    constraints: Vec<LinearConstraint>,
    weights: RequestWeights,
    objective: LinearExpr,
}

impl ScheduleModel {
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }
    pub fn vars(&self) -> &VariableModel {
        &self.vars
    }
    pub fn bounds(&self) -> &RosterBounds {
        &self.bounds
    }
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }
    pub fn weights(&self) -> &RequestWeights {
        &self.weights
    }
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn constraints_of(&self, kind: ConstraintKind) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    /// Nombre de contraintes par règle, dans l'ordre d'émission.
    pub fn count_by_kind(&self) -> Vec<(ConstraintKind, usize)> {
        let mut out: Vec<(ConstraintKind, usize)> = Vec::new();
        for c in &self.constraints {
            match out.iter_mut().find(|(k, _)| *k == c.kind) {
                Some((_, count)) => *count += 1,
                None => out.push((c.kind, 1)),
            }
        }
        out
    }

    /// Contraintes non satisfaites par une affectation 0/1.
    pub fn violations<'a>(&'a self, values: &[bool]) -> Vec<&'a LinearConstraint> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied(values))
            .collect()
    }

    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective.eval(values)
    }
}

/// Assemble les cinq familles de règles et l'objectif.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleModelBuilder<'a> {
    config: &'a RosterConfig,
}

impl<'a> ScheduleModelBuilder<'a> {
    pub fn new(config: &'a RosterConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Result<ScheduleModel, RosterError> {
        let config = self.config;
        config.validate()?;

        let vars = VariableModel::for_config(config);
        let bounds = config.bounds();
        debug!(
            variables = vars.len(),
            min_shifts = bounds.min_shifts,
            max_shifts = bounds.max_shifts,
            min_weekends = bounds.min_weekends,
            max_weekends = bounds.max_weekends,
            "building roster model"
        );

        let families = [
            ("coverage", coverage::coverage_constraints(&vars)),
            ("workload", workload::workload_constraints(&vars, config, &bounds)),
            ("rest", rest::rest_constraints(&vars, config)),
            ("weekend", weekend::weekend_constraints(&vars, &bounds)),
        ];
        let mut constraints = Vec::new();
        for (family, emitted) in families {
            debug!(family, count = emitted.len(), "constraints emitted");
            constraints.extend(emitted);
        }

        let weights = RequestWeights::from_requests(&vars, &config.requests)?;
        let objective = weights.objective();
        debug!(weighted_slots = objective.len(), "objective built");

        Ok(ScheduleModel {
            config: config.clone(),
            vars,
            bounds,
            constraints,
            weights,
            objective,
        })
    }
}

pub fn build_model(config: &RosterConfig) -> Result<ScheduleModel, RosterError> {
    ScheduleModelBuilder::new(config).build()
}
