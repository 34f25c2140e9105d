//! Rendus du planning : CSV (planning, heures par personne, alertes), JSON et texte console.

use crate::engine::{pair_assignments, DuplicateShiftPolicy, ScheduleResult, Violation, Warning};
use crate::model::{Roster, StaffId};
use crate::storage::write_atomic;
use anyhow::Context;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_time(t: DateTime<Utc>) -> String {
    t.format(TIME_FORMAT).to_string()
}

/// Heures entières affectées par personne (0 si jamais affectée).
/// `policy` doit être celle utilisée pour construire `result`.
pub fn staff_hours(
    roster: &Roster,
    result: &ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> BTreeMap<StaffId, i64> {
    let mut totals: BTreeMap<StaffId, i64> =
        roster.staff.iter().map(|s| (s.id.clone(), 0)).collect();
    for (asg, shift) in pair_assignments(roster, result, policy) {
        let Some(shift) = shift else {
            continue;
        };
        let hours = shift.duration_hours();
        for id in &asg.staff_ids {
            *totals.entry(id.clone()).or_insert(0) += hours;
        }
    }
    totals
}

/// CSV du planning, une ligne par affectation :
/// `shift_id,unit,start,end,required_role,required_count,assigned_count,assigned_staff_ids,coverage_ok,missing_count`
pub fn render_schedule_csv(
    roster: &Roster,
    result: &ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> anyhow::Result<String> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record([
        "shift_id",
        "unit",
        "start",
        "end",
        "required_role",
        "required_count",
        "assigned_count",
        "assigned_staff_ids",
        "coverage_ok",
        "missing_count",
    ])?;

    for (asg, shift) in pair_assignments(roster, result, policy) {
        let Some(shift) = shift else {
            tracing::warn!(shift = %asg.shift_id, "assignment without matching shift skipped");
            continue;
        };
        let required = shift.required_count as usize;
        let assigned = asg.staff_ids.len();
        let missing = required.saturating_sub(assigned);
        let staff = asg
            .staff_ids
            .iter()
            .map(StaffId::as_str)
            .collect::<Vec<_>>()
            .join(";");
        let start = format_time(shift.start);
        let end = format_time(shift.end);
        let (mut b_req, mut b_asg, mut b_miss) =
            (itoa::Buffer::new(), itoa::Buffer::new(), itoa::Buffer::new());
        w.write_record([
            shift.id.as_str(),
            shift.name.as_str(),
            start.as_str(),
            end.as_str(),
            shift.required_role.as_str(),
            b_req.format(required),
            b_asg.format(assigned),
            staff.as_str(),
            if missing == 0 { "Yes" } else { "No" },
            b_miss.format(missing),
        ])?;
    }
    finish(w)
}

/// CSV des heures : `staff_id,name,role,total_hours`, dans l'ordre du roster.
pub fn render_staff_summary_csv(
    roster: &Roster,
    result: &ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> anyhow::Result<String> {
    let totals = staff_hours(roster, result, policy);
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record(["staff_id", "name", "role", "total_hours"])?;
    for s in &roster.staff {
        let hours = totals.get(&s.id).copied().unwrap_or(0);
        let mut buf = itoa::Buffer::new();
        w.write_record([s.id.as_str(), s.name.as_str(), s.role.as_str(), buf.format(hours)])?;
    }
    finish(w)
}

/// CSV des alertes : `index,warning`.
pub fn render_warnings_csv(result: &ScheduleResult) -> anyhow::Result<String> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record(["index", "warning"])?;
    for (idx, warning) in result.warnings.iter().enumerate() {
        let mut buf = itoa::Buffer::new();
        let message = warning.to_string();
        w.write_record([buf.format(idx), message.as_str()])?;
    }
    finish(w)
}

/// CSV de contrôle : `kind,shift_id,detail`, alertes puis violations.
pub fn render_check_csv(result: &ScheduleResult, violations: &[Violation]) -> anyhow::Result<String> {
    let mut w = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    w.write_record(["kind", "shift_id", "detail"])?;
    for warning in &result.warnings {
        let kind = match warning {
            Warning::NoEligibleStaff { .. } => "no_eligible_staff",
            Warning::CoverageShortfall { .. } => "coverage_shortfall",
        };
        let detail = warning.to_string();
        w.write_record([kind, warning.shift_id().as_str(), detail.as_str()])?;
    }
    for v in violations {
        let staff = v.staff.as_ref().map_or("", StaffId::as_str);
        w.write_record([v.kind.as_str(), v.shift.as_str(), staff])?;
    }
    finish(w)
}

fn finish(w: csv::Writer<Vec<u8>>) -> anyhow::Result<String> {
    let bytes = w.into_inner().context("flushing csv buffer")?;
    Ok(String::from_utf8(bytes)?)
}

pub fn write_schedule_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    result: &ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> anyhow::Result<()> {
    write_atomic(path, render_schedule_csv(roster, result, policy)?.as_bytes())
}

pub fn write_staff_summary_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    result: &ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> anyhow::Result<()> {
    write_atomic(path, render_staff_summary_csv(roster, result, policy)?.as_bytes())
}

pub fn write_check_csv<P: AsRef<Path>>(
    path: P,
    result: &ScheduleResult,
    violations: &[Violation],
) -> anyhow::Result<()> {
    write_atomic(path, render_check_csv(result, violations)?.as_bytes())
}

pub fn write_warnings_csv<P: AsRef<Path>>(path: P, result: &ScheduleResult) -> anyhow::Result<()> {
    write_atomic(path, render_warnings_csv(result)?.as_bytes())
}

/// Export JSON du résultat (jolie mise en forme)
pub fn export_result_json<P: AsRef<Path>>(path: P, result: &ScheduleResult) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(result)?;
    write_atomic(path, &json)
}

/// `schedule.csv`, ou `schedule_<unit>.csv` quand un filtre d'unité est actif.
pub fn default_csv_path(unit: Option<&str>) -> PathBuf {
    match unit {
        Some(u) if !u.is_empty() => PathBuf::from(format!("schedule_{u}.csv")),
        _ => PathBuf::from("schedule.csv"),
    }
}

/// Fichiers compagnons `<base>_staff.csv` et `<base>_warnings.csv`, à côté du planning.
pub fn companion_paths(csv_path: &Path) -> (PathBuf, PathBuf) {
    let stem = csv_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (
        csv_path.with_file_name(format!("{stem}_staff.csv")),
        csv_path.with_file_name(format!("{stem}_warnings.csv")),
    )
}

/// Résumé lisible pour la console.
pub fn render_text(result: &ScheduleResult, input: &str, unit: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Shift Planner ===");
    let _ = writeln!(out, "Input: {input}");
    if let Some(u) = unit.filter(|u| !u.is_empty()) {
        let _ = writeln!(out, "Unit filter: {u}");
    }
    let _ = writeln!(out, "--------------------------");
    let _ = writeln!(out);

    for a in &result.assignments {
        let _ = writeln!(out, "Shift: {}", a.shift_id);
        if a.staff_ids.is_empty() {
            let _ = writeln!(out, "  Assigned: (none)");
        } else {
            let ids = a
                .staff_ids
                .iter()
                .map(StaffId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "  Assigned: {ids}");
        }
        let _ = writeln!(out);
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(out, "=== WARNINGS ===");
        for w in &result.warnings {
            let _ = writeln!(out, " - {w}");
        }
        let _ = writeln!(out);
    }
    out
}
