use super::{RosterError, VarId, VariableModel};
use crate::linear::LinearExpr;
use crate::model::ShiftRequest;
use tracing::debug;

/// Poids des demandes de repos, un par variable (0 par défaut).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestWeights {
    weights: Vec<u32>,
}

impl RequestWeights {
    pub fn zeros(vars: &VariableModel) -> Self {
        Self {
            weights: vec![0; vars.len()],
        }
    }

    /// Une demande répétée sur le même créneau remplace la précédente.
    pub fn from_requests(vars: &VariableModel, requests: &[ShiftRequest]) -> Result<Self, RosterError> {
        let mut out = Self::zeros(vars);
        for req in requests {
            let var = vars.lookup(req.pharmacist, req.period())?;
            let slot = &mut out.weights[var.index()];
            if *slot != 0 {
                debug!(pharmacist = %req.pharmacist, period = %req.period(), "duplicate request, keeping last weight");
            }
            *slot = req.weight;
        }
        Ok(out)
    }

    pub fn get(&self, var: VarId) -> u32 {
        self.weights.get(var.index()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }

    /// `Σ poids · x` : seul critère à minimiser.
    pub fn objective(&self) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for (idx, &w) in self.weights.iter().enumerate() {
            if w != 0 {
                expr.add_term(VarId::from_index(idx), i64::from(w));
            }
        }
        expr
    }
}
