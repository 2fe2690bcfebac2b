#![forbid(unsafe_code)]
mod common;

use common::valid_roster;
use garde::{
    audit, generate_roster, Assignment, Day, MicroLpBackend, Period, PharmacistId, RosterConfig,
    RosterError, ScheduleModel, ShiftKind, ShiftRequest, SolveOptions, SolveOutcome, SolveStatus,
    SolverBackend,
};
use std::time::Duration;

/// Moteur factice qui renvoie un statut fixé, pour tester la remontée d'erreurs.
struct Scripted(SolveStatus);

impl SolverBackend for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, model: &ScheduleModel, _opts: &SolveOptions) -> Result<SolveOutcome, RosterError> {
        let assignment = match self.0 {
            SolveStatus::Optimal | SolveStatus::Feasible => Some(valid_roster().to_assignment(model.vars())?),
            _ => None,
        };
        Ok(SolveOutcome {
            status: self.0,
            objective: assignment.as_ref().map(|a: &Assignment| model.objective_value(a.values())),
            assignment,
            wall_time: Duration::from_millis(5),
        })
    }
}

#[test]
fn three_pharmacists_three_weeks_without_requests() {
    let config = RosterConfig::new(3, 3);
    let solved = generate_roster(&config, &MicroLpBackend).unwrap();

    assert_eq!(solved.status, SolveStatus::Optimal);
    assert_eq!(solved.objective, 0);
    assert_eq!(solved.bounds.min_shifts, 13);
    assert_eq!(solved.bounds.max_shifts, 14);
    assert_eq!(solved.bounds.min_weekends, 1);
    assert_eq!(solved.bounds.max_weekends, 2);

    let violations = audit(&solved.roster, &config);
    assert!(violations.is_empty(), "{violations:#?}");
    for st in solved.roster.stats().iter().skip(1) {
        assert!((13..=14).contains(&st.shifts), "{st:?}");
    }
}

#[test]
fn manager_day_off_request_is_honoured() {
    let config = RosterConfig::new(3, 3)
        .with_request(ShiftRequest::new(0, 0, Day::Saturday, ShiftKind::Morning))
        .with_request(ShiftRequest::new(0, 0, Day::Saturday, ShiftKind::Evening));
    let solved = generate_roster(&config, &MicroLpBackend).unwrap();

    assert_eq!(solved.objective, 0);
    for shift in ShiftKind::ALL {
        let on_duty = solved.roster.get(Period::new(0, Day::Saturday, shift)).unwrap();
        assert_ne!(on_duty, PharmacistId::MANAGER, "{shift}");
    }
    assert!(audit(&solved.roster, &config).is_empty());
}

#[test]
fn single_week_is_solvable() {
    let config = RosterConfig::new(3, 1);
    let solved = generate_roster(&config, &MicroLpBackend).unwrap();
    assert_eq!(solved.roster.num_weeks(), 1);
    assert!(audit(&solved.roster, &config).is_empty());
}

#[test]
fn solving_twice_passes_the_same_checks() {
    let config = RosterConfig::new(3, 3)
        .with_request(ShiftRequest::new(1, 2, Day::Wednesday, ShiftKind::Evening));
    let first = generate_roster(&config, &MicroLpBackend).unwrap();
    let second = generate_roster(&config, &MicroLpBackend).unwrap();
    assert_eq!(first.objective, second.objective);
    assert!(audit(&first.roster, &config).is_empty());
    assert!(audit(&second.roster, &config).is_empty());
}

#[test]
fn two_pharmacists_cannot_cover_the_horizon() {
    // un seul adjoint devrait faire 9 gardes par semaine, plafonnées à 5
    let config = RosterConfig::new(2, 2);
    let err = generate_roster(&config, &MicroLpBackend).unwrap_err();
    assert!(matches!(err, RosterError::Infeasible), "{err:?}");
}

#[test]
fn infeasible_status_is_surfaced() {
    let err = generate_roster(&RosterConfig::default(), &Scripted(SolveStatus::Infeasible)).unwrap_err();
    assert!(matches!(err, RosterError::Infeasible));
}

#[test]
fn unknown_status_is_inconclusive_not_infeasible() {
    let err = generate_roster(&RosterConfig::default(), &Scripted(SolveStatus::Unknown)).unwrap_err();
    match err {
        RosterError::Inconclusive { elapsed } => assert_eq!(elapsed, Duration::from_millis(5)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn feasible_status_is_read_back_into_a_roster() {
    let config = RosterConfig::default()
        .with_request(ShiftRequest::new(2, 0, Day::Saturday, ShiftKind::Evening).with_weight(2));
    let solved = generate_roster(&config, &Scripted(SolveStatus::Feasible)).unwrap();
    assert_eq!(solved.status, SolveStatus::Feasible);
    assert_eq!(solved.roster, valid_roster());
    assert_eq!(solved.objective, 2);
}

#[test]
fn invalid_configuration_never_reaches_the_solver() {
    let err = generate_roster(&RosterConfig::new(1, 3), &Scripted(SolveStatus::Optimal)).unwrap_err();
    assert!(matches!(err, RosterError::InvalidConfiguration(_)));
}
