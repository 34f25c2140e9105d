use super::{state::WorkerState, EngineOptions};
use crate::model::{Shift, Staff};
use std::cmp::Ordering;

const NIGHT_PENALTY: u32 = 5;
const UNIT_PENALTY: u32 = 1;

/// Pénalité de préférence : nuit évitée (+5), unité non préférée (+1).
pub(super) fn preference_penalty(staff: &Staff, shift: &Shift) -> u32 {
    let prefs = &staff.preferences;
    let mut penalty = 0;
    if prefs.avoid_nights && shift.is_night() {
        penalty += NIGHT_PENALTY;
    }
    if !prefs.preferred_unit.is_empty() && !prefs.preferred_unit.contains(&shift.name) {
        penalty += UNIT_PENALTY;
    }
    penalty
}

/// Ordre total : heures cumulées, puis pénalité, puis id.
pub(super) fn compare(
    a: &WorkerState<'_>,
    b: &WorkerState<'_>,
    shift: &Shift,
    opts: EngineOptions,
) -> Ordering {
    let by_hours = if opts.fairness_on {
        a.assigned_hours.cmp(&b.assigned_hours)
    } else {
        Ordering::Equal
    };
    by_hours
        .then_with(|| {
            if opts.respect_preferences {
                preference_penalty(a.staff, shift).cmp(&preference_penalty(b.staff, shift))
            } else {
                Ordering::Equal
            }
        })
        .then_with(|| a.staff.id.cmp(&b.staff.id))
}
