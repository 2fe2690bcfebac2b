use super::workload::morning_evening_gap;
use super::{ConstraintKind, RosterBounds, VariableModel};
use crate::linear::{LinearConstraint, LinearExpr};
use crate::model::{Day, ShiftKind};

/// Week-ends : samedi et dimanche appariés, quota de week-ends libres et
/// équilibre matin/soir sur les week-ends.
pub(super) fn weekend_constraints(vars: &VariableModel, bounds: &RosterBounds) -> Vec<LinearConstraint> {
    let mut out = Vec::new();
    let weeks = vars.num_weeks() as i64;

    // avec 3 pharmaciens, le troisième a tout le week-end
    for n in 0..vars.num_pharmacists() {
        for w in 0..vars.num_weeks() {
            for shift in ShiftKind::ALL {
                let mut expr = LinearExpr::new();
                expr.add_term(vars.at(n, w, Day::Saturday, shift), 1);
                expr.add_term(vars.at(n, w, Day::Sunday, shift), -1);
                out.push(expr.equal(0).tagged(ConstraintKind::WeekendSymmetry));
            }
        }
    }

    for n in 0..vars.num_pharmacists() {
        let worked = LinearExpr::from_vars(
            ShiftKind::ALL
                .into_iter()
                .flat_map(|s| vars.shift_kind_vars(n, s, true)),
        );
        let mut off = LinearExpr::new();
        off.add_constant(2 * weeks);
        let off = off.minus(&worked);
        out.extend(
            off.between(2 * bounds.min_weekends, 2 * bounds.max_weekends)
                .map(|c| c.tagged(ConstraintKind::WeekendQuota)),
        );
    }

    for n in 0..vars.num_pharmacists() {
        out.extend(
            morning_evening_gap(vars, n, true)
                .between(-2, 2)
                .map(|c| c.tagged(ConstraintKind::WeekendBalance)),
        );
    }

    out
}
