#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn fixture() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/hospital.json").to_string()
}

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shiftplan-cli"));
    cmd.current_dir(dir);
    cmd
}

#[test]
fn plan_prints_summary_and_writes_csvs() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["--input", &fixture(), "plan", "--csv", "week.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shift: shift1"))
        .stdout(predicate::str::contains("Coverage short by 1 for shift shift1"))
        .stdout(predicate::str::contains("Schedule CSV written to: week.csv"));

    assert!(dir.path().join("week.csv").is_file());
    assert!(dir.path().join("week_staff.csv").is_file());
    assert!(dir.path().join("week_warnings.csv").is_file());
}

#[test]
fn plan_with_unit_uses_default_name() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["--input", &fixture(), "--unit", "ICU", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit filter: ICU"))
        .stdout(predicate::str::contains("shift2").not());

    assert!(dir.path().join("schedule_ICU.csv").is_file());
    assert!(dir.path().join("schedule_ICU_staff.csv").is_file());
}

#[test]
fn check_exits_with_code_two_on_shortfall() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["--input", &fixture(), "check", "--report", "issues.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Found 2 warning(s), 0 violation(s)"));

    let report = std::fs::read_to_string(dir.path().join("issues.csv")).unwrap();
    assert!(report.contains("coverage_shortfall,shift1"));
    assert!(report.contains("no_eligible_staff,shift2"));
}

#[test]
fn list_shows_loaded_records() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["--input", &fixture(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nurse1 | Alice | RN"))
        .stdout(predicate::str::contains("shift2 | ER"));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    cli(dir.path())
        .args(["--input", "nope.json", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"));
}
