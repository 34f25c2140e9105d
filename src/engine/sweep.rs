use super::{
    eligibility, ranking, state::WorkerState, util, Assignment, EngineOptions, ScheduleResult,
    Warning,
};
use crate::model::Roster;

/// Passage glouton, créneau par créneau, dans l'ordre chronologique.
/// Chaque créneau produit exactement une affectation, éventuellement vide.
pub(super) fn build_schedule(roster: &Roster, opts: EngineOptions) -> ScheduleResult {
    let shifts = util::ordered_shifts(&roster.shifts, opts.duplicate_shifts);
    let dropped = roster.shifts.len() - shifts.len();
    if dropped > 0 {
        tracing::warn!(dropped, "duplicate shift ids ignored, first occurrence kept");
    }
    let mut workers: Vec<WorkerState<'_>> = roster.staff.iter().map(WorkerState::new).collect();
    let mut result = ScheduleResult::default();

    for shift in shifts {
        let mut assignment = Assignment {
            shift_id: shift.id.clone(),
            staff_ids: Vec::new(),
        };

        let mut candidates: Vec<usize> = workers
            .iter()
            .enumerate()
            .filter(|(_, w)| eligibility::is_eligible(w, shift))
            .map(|(idx, _)| idx)
            .collect();

        if candidates.is_empty() {
            let warning = Warning::NoEligibleStaff {
                shift: shift.id.clone(),
                name: shift.name.clone(),
            };
            tracing::warn!(shift = %shift.id, "{warning}");
            result.warnings.push(warning);
            result.assignments.push(assignment);
            continue;
        }

        candidates.sort_by(|&a, &b| ranking::compare(&workers[a], &workers[b], shift, opts));

        let hours = shift.duration_hours();
        for &idx in candidates.iter().take(shift.required_count as usize) {
            let worker = &mut workers[idx];
            assignment.staff_ids.push(worker.staff.id.clone());
            worker.record(hours, shift.end);
        }

        tracing::debug!(
            shift = %shift.id,
            eligible = candidates.len(),
            assigned = assignment.staff_ids.len(),
            "shift processed"
        );

        let assigned = assignment.staff_ids.len() as u32;
        if assigned < shift.required_count {
            let warning = Warning::CoverageShortfall {
                shift: shift.id.clone(),
                missing: shift.required_count - assigned,
            };
            tracing::warn!(shift = %shift.id, "{warning}");
            result.warnings.push(warning);
        }

        result.assignments.push(assignment);
    }

    tracing::info!(
        shifts = result.assignments.len(),
        warnings = result.warnings.len(),
        "schedule built"
    );
    result
}
