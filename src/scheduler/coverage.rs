use super::{ConstraintKind, VariableModel};
use crate::linear::{LinearConstraint, LinearExpr};
use crate::model::{Day, ShiftKind};

/// Chaque créneau est tenu par exactement un pharmacien.
pub(super) fn coverage_constraints(vars: &VariableModel) -> Vec<LinearConstraint> {
    let mut out = Vec::new();
    for w in 0..vars.num_weeks() {
        for day in Day::ALL {
            for shift in ShiftKind::ALL {
                let expr = LinearExpr::from_vars(
                    (0..vars.num_pharmacists()).map(|n| vars.at(n, w, day, shift)),
                );
                out.push(expr.equal(1).tagged(ConstraintKind::Coverage));
            }
        }
    }
    out
}
