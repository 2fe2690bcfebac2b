#![forbid(unsafe_code)]
mod common;

use assert_cmd::Command;
use common::valid_roster;
use garde::{io, Day, Period, PharmacistId, ShiftKind};
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("garde-cli").unwrap()
}

#[test]
fn model_reports_sizes_per_rule_family() {
    cli()
        .args(["model", "--pharmacists", "3", "--weeks", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("variables   : 126"))
        .stdout(predicate::str::contains("constraints : 283"))
        .stdout(predicate::str::contains("shifts per staff: 13..=14, weekends off: 1..=2"));
}

#[test]
fn check_accepts_a_valid_roster() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    io::export_roster_json(&path, &valid_roster()).unwrap();

    cli()
        .args(["check", "--roster"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations (objective value 0)"));
}

#[test]
fn check_reports_unmet_requests_in_objective() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    io::export_roster_json(&path, &valid_roster()).unwrap();

    cli()
        .args(["check", "--request", "P1,0,Sat,morning,3", "--roster"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("objective value 3"));
}

#[test]
fn check_flags_a_broken_roster() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let mut roster = valid_roster();
    roster.set(Period::new(0, Day::Monday, ShiftKind::Evening), PharmacistId::MANAGER);
    io::export_roster_json(&path, &roster).unwrap();

    cli()
        .args(["check", "--roster"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("violation(s)"))
        .stderr(predicate::str::contains("DoubleShift"));
}

#[test]
fn invalid_team_size_is_rejected() {
    cli()
        .args(["model", "--pharmacists", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 pharmacists"));
}

#[test]
fn malformed_request_is_rejected() {
    cli()
        .args(["model", "--request", "0,0,Someday,morning"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid request"));
}

#[test]
fn solve_single_week_writes_csv() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("roster.csv");

    cli()
        .args(["solve", "--pharmacists", "3", "--weeks", "1", "--start-date", "2025-01-04", "--stats", "--out-csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 0 (2025-01-04)"))
        .stdout(predicate::str::contains("objective value : 0"))
        .stdout(predicate::str::contains("P0: 5 shifts"));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("week,day,date,shift,pharmacist"));
    assert_eq!(lines.count(), 14);
    assert!(csv.contains("0,Sat,2025-01-04,morning,"));
}
