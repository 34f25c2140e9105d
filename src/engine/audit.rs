use super::{eligibility, util, DuplicateShiftPolicy, ScheduleResult, Violation, ViolationKind};
use crate::model::{Roster, StaffId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Vérifie un résultat a posteriori en rejouant les affectations dans l'ordre.
pub(super) fn audit(
    roster: &Roster,
    result: &ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> Vec<Violation> {
    let mut out = Vec::new();

    let mut hours: HashMap<&StaffId, i64> = HashMap::new();
    let mut last_end: HashMap<&StaffId, DateTime<Utc>> = HashMap::new();

    for (assignment, shift) in util::pair_assignments(roster, result, policy) {
        let Some(shift) = shift else {
            out.push(Violation {
                shift: assignment.shift_id.clone(),
                staff: None,
                kind: ViolationKind::UnknownShift,
            });
            continue;
        };

        if assignment.staff_ids.len() > shift.required_count as usize {
            out.push(Violation {
                shift: shift.id.clone(),
                staff: None,
                kind: ViolationKind::Overstaffed,
            });
        }

        let mut seen = HashSet::new();
        for staff_id in &assignment.staff_ids {
            let flag = |kind| Violation {
                shift: shift.id.clone(),
                staff: Some(staff_id.clone()),
                kind,
            };
            if !seen.insert(staff_id) {
                out.push(flag(ViolationKind::DuplicateStaff));
                continue;
            }
            let Some(staff) = roster.find_staff_by_id(staff_id) else {
                out.push(flag(ViolationKind::UnknownStaff));
                continue;
            };

            if !eligibility::role_ok(staff, shift) {
                out.push(flag(ViolationKind::RoleMismatch));
            }
            if !eligibility::available(staff, shift) {
                out.push(flag(ViolationKind::Unavailable));
            }

            let worked = hours.entry(&staff.id).or_insert(0);
            if !eligibility::within_hour_cap(*worked, staff, shift) {
                out.push(flag(ViolationKind::HourCapExceeded));
            }
            *worked += shift.duration_hours();

            if !eligibility::rested(last_end.get(&staff.id).copied(), staff, shift) {
                out.push(flag(ViolationKind::RestViolation));
            }
            last_end.insert(&staff.id, shift.end);
        }
    }

    out
}
