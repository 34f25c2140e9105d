use super::{state::WorkerState, util};
use crate::model::{Shift, Staff};
use chrono::{DateTime, Utc};

pub(super) fn role_ok(staff: &Staff, shift: &Shift) -> bool {
    staff.role == shift.required_role
}

pub(super) fn available(staff: &Staff, shift: &Shift) -> bool {
    staff.available_on(shift.day())
}

pub(super) fn within_hour_cap(assigned_hours: i64, staff: &Staff, shift: &Shift) -> bool {
    assigned_hours + shift.duration_hours() <= i64::from(staff.max_weekly_hours)
}

pub(super) fn rested(last_end: Option<DateTime<Utc>>, staff: &Staff, shift: &Shift) -> bool {
    match last_end {
        None => true,
        Some(end) => util::whole_hours_between(end, shift.start) >= i64::from(staff.min_rest),
    }
}

/// Éligibilité d'un membre pour `shift`, selon son état courant dans le passage.
pub(super) fn is_eligible(state: &WorkerState<'_>, shift: &Shift) -> bool {
    let staff = state.staff;
    role_ok(staff, shift)
        && available(staff, shift)
        && within_hour_cap(state.assigned_hours, staff, shift)
        && rested(state.last_end, staff, shift)
}
