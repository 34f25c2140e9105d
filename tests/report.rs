#![forbid(unsafe_code)]
use chrono::{DateTime, TimeZone, Utc};
use shiftplan::{
    build_schedule, parse_roster_json, report, DuplicateShiftPolicy, EngineOptions, LoadFilters,
    Roster, ScheduleResult, Scheduler, Shift, ShiftId, Staff, StaffId,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const FIXTURE: &str = include_str!("fixtures/hospital.json");

fn planned() -> (Roster, ScheduleResult) {
    let roster = parse_roster_json(FIXTURE, &LoadFilters::default()).unwrap();
    let result = build_schedule(&roster, EngineOptions::default());
    (roster, result)
}

#[test]
fn schedule_csv_has_one_row_per_assignment() {
    let (roster, result) = planned();
    let csv =
        report::render_schedule_csv(&roster, &result, DuplicateShiftPolicy::KeepFirst).unwrap();
    assert_eq!(
        csv,
        "shift_id,unit,start,end,required_role,required_count,assigned_count,assigned_staff_ids,coverage_ok,missing_count\n\
         shift1,ICU,2025-04-01 07:00,2025-04-01 19:00,RN,3,2,nurse1;nurse2,No,1\n\
         shift2,ER,2025-04-01 07:00,2025-04-01 15:00,RN,2,0,,No,2\n"
    );
}

#[test]
fn staff_hours_cover_whole_roster() {
    let (roster, result) = planned();
    let totals = report::staff_hours(&roster, &result, DuplicateShiftPolicy::KeepFirst);
    assert_eq!(totals.get(&StaffId::new("nurse1")), Some(&12));
    assert_eq!(totals.get(&StaffId::new("nurse2")), Some(&12));

    let csv = report::render_staff_summary_csv(&roster, &result, DuplicateShiftPolicy::KeepFirst)
        .unwrap();
    assert_eq!(
        csv,
        "staff_id,name,role,total_hours\nnurse1,Alice,RN,12\nnurse2,nurse2,RN,12\n"
    );
}

#[test]
fn warnings_csv_is_indexed() {
    let (_, result) = planned();
    let csv = report::render_warnings_csv(&result).unwrap();
    insta::assert_snapshot!(csv, @r"
index,warning
0,Coverage short by 1 for shift shift1
1,No eligible staff for shift shift2 (ER)
");
}

#[test]
fn console_summary_lists_assignments_then_warnings() {
    let (_, result) = planned();
    let text = report::render_text(&result, "hospital.json", None);
    insta::assert_snapshot!(text, @r"
=== Shift Planner ===
Input: hospital.json
--------------------------

Shift: shift1
  Assigned: nurse1, nurse2

Shift: shift2
  Assigned: (none)

=== WARNINGS ===
 - Coverage short by 1 for shift shift1
 - No eligible staff for shift shift2 (ER)
");
}

#[test]
fn output_paths_follow_unit_and_base_name() {
    assert_eq!(report::default_csv_path(None), Path::new("schedule.csv"));
    assert_eq!(report::default_csv_path(Some("ICU")), Path::new("schedule_ICU.csv"));

    let (staff, warnings) = report::companion_paths(Path::new("out/plan.v2.csv"));
    assert_eq!(staff, Path::new("out/plan.v2_staff.csv"));
    assert_eq!(warnings, Path::new("out/plan.v2_warnings.csv"));
}

#[test]
fn writes_files_atomically() {
    let dir = tempdir().unwrap();
    let (roster, result) = planned();
    let csv_path = dir.path().join("schedule.csv");
    let (staff_path, warn_path) = report::companion_paths(&csv_path);

    let policy = DuplicateShiftPolicy::KeepFirst;
    report::write_schedule_csv(&csv_path, &roster, &result, policy).unwrap();
    report::write_staff_summary_csv(&staff_path, &roster, &result, policy).unwrap();
    report::write_warnings_csv(&warn_path, &result).unwrap();
    let json_path = dir.path().join("result.json");
    report::export_result_json(&json_path, &result).unwrap();

    assert!(fs::read_to_string(&csv_path).unwrap().starts_with("shift_id,unit,"));
    assert!(fs::read_to_string(&staff_path).unwrap().contains("nurse1,Alice,RN,12"));
    assert_eq!(fs::read_to_string(&warn_path).unwrap().lines().count(), 3);

    let back: ScheduleResult =
        serde_json::from_slice(&fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(back, result);
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, day, hour, 0, 0).unwrap()
}

fn rn(id: &str) -> Staff {
    let mut s = Staff::new(id, "RN");
    s.id = StaffId::new(id);
    s
}

fn dup_shift(name: &str, start: DateTime<Utc>, end: DateTime<Utc>, count: u32) -> Shift {
    let mut s = Shift::new(name.into(), "RN".into(), count, start, end).unwrap();
    s.id = ShiftId::new("dup");
    s
}

#[test]
fn repeated_shift_ids_keep_their_own_rows_and_hours() {
    let roster = Roster {
        staff: vec![rn("a"), rn("b")],
        shifts: vec![
            dup_shift("ICU", at(2, 7), at(2, 19), 1),
            dup_shift("ER", at(1, 7), at(1, 9), 2),
        ],
        ..Roster::default()
    };
    let policy = DuplicateShiftPolicy::KeepAll;
    let opts = EngineOptions {
        duplicate_shifts: policy,
        ..EngineOptions::default()
    };
    let result = build_schedule(&roster, opts);

    let csv = report::render_schedule_csv(&roster, &result, policy).unwrap();
    insta::assert_snapshot!(csv, @r"
shift_id,unit,start,end,required_role,required_count,assigned_count,assigned_staff_ids,coverage_ok,missing_count
dup,ER,2025-04-01 07:00,2025-04-01 09:00,RN,2,2,a;b,Yes,0
dup,ICU,2025-04-02 07:00,2025-04-02 19:00,RN,1,1,a,Yes,0
");

    let totals = report::staff_hours(&roster, &result, policy);
    assert_eq!(totals.get(&StaffId::new("a")), Some(&14));
    assert_eq!(totals.get(&StaffId::new("b")), Some(&2));
}

#[test]
fn check_csv_lists_warnings_then_violations() {
    let mut low = rn("low");
    low.max_weekly_hours = 8;
    let mut long = Shift::new("ICU".into(), "RN".into(), 1, at(1, 7), at(1, 19)).unwrap();
    long.id = ShiftId::new("long");
    let scheduler = Scheduler::new(Roster {
        staff: vec![low],
        shifts: vec![long],
        ..Roster::default()
    });
    let opts = EngineOptions::default();
    let mut result = scheduler.build_schedule(opts);
    result.assignments[0].staff_ids.push(StaffId::new("low"));
    let violations = scheduler.audit(&result, opts);

    let csv = report::render_check_csv(&result, &violations).unwrap();
    insta::assert_snapshot!(csv, @r"
kind,shift_id,detail
no_eligible_staff,long,No eligible staff for shift long (ICU)
hours,long,low
");

    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    report::write_check_csv(&path, &result, &violations).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), csv);
}

#[test]
fn empty_unit_is_not_shown_in_summary() {
    let (_, result) = planned();
    let text = report::render_text(&result, "hospital.json", Some(""));
    assert!(!text.contains("Unit filter"));
}
