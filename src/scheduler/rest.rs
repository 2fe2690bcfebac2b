use super::{ConstraintKind, VariableModel, WindowFamily};
use crate::linear::{LinearConstraint, LinearExpr};
use crate::model::{Day, RosterConfig, ShiftKind, DAYS_PER_WEEK};

/// Repos (pas de matin après un soir) et plafonds de jours consécutifs.
pub(super) fn rest_constraints(vars: &VariableModel, config: &RosterConfig) -> Vec<LinearConstraint> {
    let mut out = Vec::new();
    let weeks = vars.num_weeks();

    for n in 0..vars.num_pharmacists() {
        for w in 0..weeks {
            for pair in Day::ALL.windows(2) {
                out.push(evening_then_morning(vars, n, (w, pair[0]), (w, pair[1])));
            }
            if w + 1 < weeks {
                out.push(evening_then_morning(vars, n, (w, Day::Friday), (w + 1, Day::Saturday)));
            }
        }
    }

    for p in config.pharmacists() {
        let cap = config.max_cont(p.role());
        for w in 0..weeks {
            for start in Day::ALL {
                let (family, window) = continuity_window(vars, p.index(), cap, w, start);
                out.push(
                    window
                        .at_most(cap as i64)
                        .tagged(ConstraintKind::Continuity(family)),
                );
            }
        }
    }

    out
}

fn evening_then_morning(
    vars: &VariableModel,
    pharmacist: usize,
    (w1, d1): (usize, Day),
    (w2, d2): (usize, Day),
) -> LinearConstraint {
    // x_soir + x_matin != 2 sur des booléens
    LinearExpr::from_vars([
        vars.at(pharmacist, w1, d1, ShiftKind::Evening),
        vars.at(pharmacist, w2, d2, ShiftKind::Morning),
    ])
    .at_most(1)
    .tagged(ConstraintKind::Rest)
}

/// Somme des gardes de `pharmacist` sur `cap + 1` jours consécutifs à partir
/// de `(week, start)`.
///
/// La fenêtre déborde sur la semaine suivante et, depuis la dernière
/// semaine, revient sur la semaine 0 (roulement répété). Quand la fenêtre
/// est plus longue que l'horizon, les jours revisités voient leur
/// coefficient s'additionner.
pub fn continuity_window(
    vars: &VariableModel,
    pharmacist: usize,
    cap: usize,
    week: usize,
    start: Day,
) -> (WindowFamily, LinearExpr) {
    let len = cap + 1;
    let horizon_days = vars.num_weeks() * DAYS_PER_WEEK;
    let first = week * DAYS_PER_WEEK + start.index();

    let mut expr = LinearExpr::new();
    for offset in 0..len {
        let abs = (first + offset) % horizon_days;
        let day = Day::ALL[abs % DAYS_PER_WEEK];
        for var in vars.day_vars(pharmacist, abs / DAYS_PER_WEEK, day) {
            expr.add_term(var, 1);
        }
    }

    let family = if start.index() + len <= DAYS_PER_WEEK {
        WindowFamily::InWeek
    } else if week + 1 < vars.num_weeks() {
        WindowFamily::CrossWeek
    } else {
        WindowFamily::Wraparound
    };
    (family, expr)
}
