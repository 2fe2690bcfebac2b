#![forbid(unsafe_code)]
mod common;

use common::{default_config, valid_roster, valid_single_week};
use garde::{
    audit, build_model, ConstraintKind, Day, Period, PharmacistId, Roster, RosterConfig,
    ShiftKind, ShiftRequest, ViolationKind,
};

fn kinds(roster: &Roster, config: &RosterConfig) -> Vec<ViolationKind> {
    audit(roster, config).into_iter().map(|v| v.kind).collect()
}

#[test]
fn reference_roster_satisfies_every_rule() {
    let config = default_config();
    let roster = valid_roster();
    assert!(audit(&roster, &config).is_empty());

    let model = build_model(&config).unwrap();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    let broken: Vec<String> = model
        .violations(assignment.values())
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert!(broken.is_empty(), "{broken:#?}");
    assert_eq!(model.objective_value(assignment.values()), 0);
}

#[test]
fn assignment_round_trips_through_the_grid() {
    let config = default_config();
    let model = build_model(&config).unwrap();
    let roster = valid_roster();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    let back = Roster::from_assignment(model.vars(), &assignment).unwrap();
    assert_eq!(back, roster);
}

#[test]
fn single_week_roster_satisfies_wraparound_rules() {
    let config = RosterConfig::new(3, 1);
    let roster = valid_single_week();
    assert!(audit(&roster, &config).is_empty());

    let model = build_model(&config).unwrap();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    assert!(model.violations(assignment.values()).is_empty());
}

#[test]
fn stats_of_reference_roster() {
    let stats = valid_roster().stats();
    let totals: Vec<i64> = stats.iter().map(|s| s.shifts).collect();
    assert_eq!(totals, vec![15, 14, 13]);
    assert_eq!((stats[0].mornings, stats[0].evenings), (8, 7));
    assert_eq!((stats[2].mornings, stats[2].evenings), (6, 7));
    for st in &stats {
        assert_eq!(st.weekend_shifts(), 4);
        assert_eq!(st.weekends_off, 1);
    }
}

#[test]
fn double_shift_breaks_daily_and_weekly_rules() {
    let config = default_config();
    let mut roster = valid_roster();
    // le titulaire fait déjà le matin du lundi
    roster.set(Period::new(0, Day::Monday, ShiftKind::Evening), PharmacistId::MANAGER);

    let found = kinds(&roster, &config);
    assert!(found.contains(&ViolationKind::DoubleShift));
    assert!(found.contains(&ViolationKind::WeeklyLoad));

    let model = build_model(&config).unwrap();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    let broken = model.violations(assignment.values());
    assert!(broken.iter().any(|c| c.kind == ConstraintKind::DailyLimit));
    assert!(broken.iter().any(|c| c.kind == ConstraintKind::WeeklyLoad));
}

#[test]
fn evening_then_morning_is_a_rest_violation() {
    let config = default_config();
    let mut roster = valid_roster();
    // P2 est du soir mardi semaine 0
    roster.set(Period::new(0, Day::Wednesday, ShiftKind::Morning), PharmacistId::new(2));

    assert!(kinds(&roster, &config).contains(&ViolationKind::RestViolation));

    let model = build_model(&config).unwrap();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    assert!(model
        .violations(assignment.values())
        .iter()
        .any(|c| c.kind == ConstraintKind::Rest));
}

#[test]
fn unpaired_weekend_breaks_symmetry() {
    let config = default_config();
    let mut roster = valid_roster();
    roster.set(Period::new(0, Day::Sunday, ShiftKind::Morning), PharmacistId::new(2));

    let found = kinds(&roster, &config);
    assert!(found.contains(&ViolationKind::WeekendSymmetry));
    assert!(found.contains(&ViolationKind::DoubleShift));
}

#[test]
fn tighter_continuity_cap_is_detected_by_audit_and_model() {
    let config = RosterConfig {
        max_cont_staff: 1,
        ..RosterConfig::default()
    };
    let roster = valid_roster();
    let violations = audit(&roster, &config);
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::Continuity && v.pharmacist == Some(PharmacistId::new(1))));

    let model = build_model(&config).unwrap();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    assert!(model
        .violations(assignment.values())
        .iter()
        .any(|c| matches!(c.kind, ConstraintKind::Continuity(_))));
}

#[test]
fn shape_mismatch_is_reported_once() {
    let config = RosterConfig::new(3, 2);
    let found = kinds(&valid_roster(), &config);
    assert_eq!(found, vec![ViolationKind::Horizon]);
}

#[test]
fn unmet_requests_count_in_the_objective() {
    let config = default_config()
        .with_request(ShiftRequest::new(0, 0, Day::Monday, ShiftKind::Morning))
        .with_request(ShiftRequest::new(1, 0, Day::Saturday, ShiftKind::Morning).with_weight(3))
        .with_request(ShiftRequest::new(1, 0, Day::Saturday, ShiftKind::Evening));
    let model = build_model(&config).unwrap();
    let assignment = valid_roster().to_assignment(model.vars()).unwrap();
    // P0 travaille le lundi matin, P1 le samedi matin, pas le samedi soir
    assert_eq!(model.objective_value(assignment.values()), 4);
}

fn model_kinds(roster: &Roster, config: &RosterConfig) -> Vec<ConstraintKind> {
    let model = build_model(config).unwrap();
    let assignment = roster.to_assignment(model.vars()).unwrap();
    model.violations(assignment.values()).iter().map(|c| c.kind).collect()
}

/// Échange le matin et le soir d'un jour.
fn swap_shifts(roster: &mut Roster, week: usize, day: Day) {
    let morning = Period::new(week, day, ShiftKind::Morning);
    let evening = Period::new(week, day, ShiftKind::Evening);
    let (m, e) = (roster.get(morning).unwrap(), roster.get(evening).unwrap());
    roster.set(morning, e);
    roster.set(evening, m);
}

#[test]
fn uneven_staff_totals_break_horizon_balance() {
    let config = default_config();
    let mut roster = valid_roster();
    // P2 cède son jeudi matin : 15 gardes pour P1, 12 pour P2
    roster.set(Period::new(1, Day::Thursday, ShiftKind::Morning), PharmacistId::new(1));

    let totals: Vec<i64> = roster.stats().iter().map(|s| s.shifts).collect();
    assert_eq!(totals, vec![15, 15, 12]);

    let violations = audit(&roster, &config);
    for p in [1, 2] {
        assert!(
            violations
                .iter()
                .any(|v| v.kind == ViolationKind::HorizonBalance && v.pharmacist == Some(PharmacistId::new(p))),
            "P{p}: {violations:#?}"
        );
    }
    assert!(!violations
        .iter()
        .any(|v| v.kind == ViolationKind::HorizonBalance && v.pharmacist == Some(PharmacistId::MANAGER)));
    assert!(model_kinds(&roster, &config).contains(&ConstraintKind::HorizonBalance));
}

#[test]
fn too_many_evenings_break_shift_balance() {
    let config = default_config();
    let mut roster = valid_roster();
    // le titulaire passe du matin au soir lundi et mercredi : 6 matins, 9 soirs
    swap_shifts(&mut roster, 0, Day::Monday);
    swap_shifts(&mut roster, 0, Day::Wednesday);

    let stats = roster.stats();
    assert_eq!((stats[0].mornings, stats[0].evenings), (6, 9));

    let violations = audit(&roster, &config);
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::ShiftBalance && v.pharmacist == Some(PharmacistId::MANAGER)));
    assert!(model_kinds(&roster, &config).contains(&ConstraintKind::ShiftBalance));
}

#[test]
fn extra_weekend_breaks_weekend_quota() {
    let config = default_config();
    let mut roster = valid_roster();
    // le titulaire reprend les matins du premier week-end : 6 gardes de week-end
    for day in Day::WEEKEND {
        roster.set(Period::new(0, day, ShiftKind::Morning), PharmacistId::MANAGER);
    }
    assert_eq!(roster.stats()[0].weekend_shifts(), 6);

    let found = kinds(&roster, &config);
    assert!(found.contains(&ViolationKind::WeekendQuota));
    assert!(!found.contains(&ViolationKind::WeekendSymmetry));
    assert!(!found.contains(&ViolationKind::WeekendBalance));
    assert!(model_kinds(&roster, &config).contains(&ConstraintKind::WeekendQuota));
}

#[test]
fn weekend_evenings_only_break_weekend_balance() {
    let config = default_config();
    let mut roster = valid_roster();
    // semaine 1 : P2 passe au soir, P0 au matin, samedi et dimanche
    for day in Day::WEEKEND {
        swap_shifts(&mut roster, 1, day);
    }
    let stats = roster.stats();
    assert_eq!((stats[2].weekend_mornings, stats[2].weekend_evenings), (0, 4));

    let violations = audit(&roster, &config);
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::WeekendBalance && v.pharmacist == Some(PharmacistId::new(2))));
    assert!(!violations.iter().any(|v| v.kind == ViolationKind::WeekendQuota));
    assert!(!violations.iter().any(|v| v.kind == ViolationKind::WeekendSymmetry));
    assert!(model_kinds(&roster, &config).contains(&ConstraintKind::WeekendBalance));
}
