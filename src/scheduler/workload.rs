use super::{ConstraintKind, RosterBounds, VariableModel};
use crate::linear::{LinearConstraint, LinearExpr};
use crate::model::{
    Day, Role, RosterConfig, ShiftKind, MANAGER_WEEKLY_SHIFTS, STAFF_WEEKLY_MAX, STAFF_WEEKLY_MIN,
};

pub(super) fn workload_constraints(
    vars: &VariableModel,
    config: &RosterConfig,
    bounds: &RosterBounds,
) -> Vec<LinearConstraint> {
    let mut out = Vec::new();

    // une seule garde par jour
    for n in 0..vars.num_pharmacists() {
        for w in 0..vars.num_weeks() {
            for day in Day::ALL {
                let expr = LinearExpr::from_vars(vars.day_vars(n, w, day));
                out.push(expr.at_most(1).tagged(ConstraintKind::DailyLimit));
            }
        }
    }

    for p in config.pharmacists() {
        for w in 0..vars.num_weeks() {
            let expr = LinearExpr::from_vars(vars.week_vars(p.index(), w));
            match p.role() {
                Role::Manager => {
                    out.push(expr.equal(MANAGER_WEEKLY_SHIFTS).tagged(ConstraintKind::WeeklyLoad));
                }
                Role::Staff => out.extend(
                    expr.between(STAFF_WEEKLY_MIN, STAFF_WEEKLY_MAX)
                        .map(|c| c.tagged(ConstraintKind::WeeklyLoad)),
                ),
            }
        }
    }

    // le titulaire fait toujours 5 gardes, l'équilibre ne porte que sur les adjoints
    for p in config.staff() {
        let expr = LinearExpr::from_vars(vars.horizon_vars(p.index()));
        out.extend(
            expr.between(bounds.min_shifts, bounds.max_shifts)
                .map(|c| c.tagged(ConstraintKind::HorizonBalance)),
        );
    }

    for n in 0..vars.num_pharmacists() {
        out.extend(
            morning_evening_gap(vars, n, false)
                .between(-1, 1)
                .map(|c| c.tagged(ConstraintKind::ShiftBalance)),
        );
    }

    out
}

/// `soirs − matins`, sur tout l'horizon ou sur les seuls week-ends.
pub(super) fn morning_evening_gap(vars: &VariableModel, pharmacist: usize, weekend_only: bool) -> LinearExpr {
    let evenings = LinearExpr::from_vars(vars.shift_kind_vars(pharmacist, ShiftKind::Evening, weekend_only));
    let mornings = LinearExpr::from_vars(vars.shift_kind_vars(pharmacist, ShiftKind::Morning, weekend_only));
    evenings.minus(&mornings)
}
