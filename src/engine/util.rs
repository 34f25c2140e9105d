use super::{Assignment, DuplicateShiftPolicy, ScheduleResult};
use crate::model::{Roster, Shift, ShiftId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet, VecDeque};

/// Écart en heures entières ; les fractions d'heure sont perdues.
pub(super) fn whole_hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_hours()
}

/// Créneaux à traiter, triés par début (tri stable : l'ordre source départage).
pub(crate) fn ordered_shifts(shifts: &[Shift], policy: DuplicateShiftPolicy) -> Vec<&Shift> {
    let mut out: Vec<&Shift> = match policy {
        DuplicateShiftPolicy::KeepAll => shifts.iter().collect(),
        DuplicateShiftPolicy::KeepFirst => {
            let mut seen = HashSet::with_capacity(shifts.len());
            shifts.iter().filter(|s| seen.insert(&s.id)).collect()
        }
    };
    out.sort_by_key(|s| s.start);
    out
}

/// Associe chaque affectation au créneau qu'elle couvre, dans l'ordre du passage.
/// Les ids répétés (`KeepAll`) sont consommés dans l'ordre chronologique.
pub(crate) fn pair_assignments<'a>(
    roster: &'a Roster,
    result: &'a ScheduleResult,
    policy: DuplicateShiftPolicy,
) -> Vec<(&'a Assignment, Option<&'a Shift>)> {
    let mut pending: HashMap<&ShiftId, VecDeque<&Shift>> = HashMap::new();
    for shift in ordered_shifts(&roster.shifts, policy) {
        pending.entry(&shift.id).or_default().push_back(shift);
    }
    result
        .assignments
        .iter()
        .map(|asg| {
            let shift = pending
                .get_mut(&asg.shift_id)
                .and_then(VecDeque::pop_front);
            (asg, shift)
        })
        .collect()
}
