mod audit;
mod eligibility;
mod ranking;
mod state;
mod sweep;
mod types;
mod util;

pub(crate) use util::pair_assignments;
pub use types::{
    Assignment, DuplicateShiftPolicy, EngineOptions, SchedError, ScheduleResult, Violation,
    ViolationKind, Warning,
};

use crate::model::{Roster, Shift, ShiftId, Staff, StaffId};
use chrono::{DateTime, Utc};

/// Construit un planning à partir d'un roster chargé.
pub fn build_schedule(roster: &Roster, opts: EngineOptions) -> ScheduleResult {
    sweep::build_schedule(roster, opts)
}

/// Scheduler : encapsule le Roster à planifier
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn add_staff(&mut self, staff: Vec<Staff>) {
        self.roster.staff.extend(staff);
    }

    pub fn remove_staff(&mut self, id: &StaffId) -> Result<Staff, SchedError> {
        let pos = self
            .roster
            .staff
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| SchedError::UnknownStaff(id.as_str().to_string()))?;
        Ok(self.roster.staff.remove(pos))
    }

    /// Crée un shift à partir de timestamps UTC
    pub fn create_shift(
        &mut self,
        name: &str,
        required_role: &str,
        required_count: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ShiftId, SchedError> {
        if end <= start {
            return Err(SchedError::InvalidTimeRange);
        }
        let s = Shift::new(
            name.to_string(),
            required_role.to_string(),
            required_count,
            start,
            end,
        )
        .map_err(|_| SchedError::InvalidTimeRange)?;
        let id = s.id.clone();
        self.roster.shifts.push(s);
        Ok(id)
    }

    /// Retire toutes les occurrences d'un shift.
    pub fn remove_shift(&mut self, id: &ShiftId) -> Result<(), SchedError> {
        let before = self.roster.shifts.len();
        self.roster.shifts.retain(|s| &s.id != id);
        if self.roster.shifts.len() == before {
            return Err(SchedError::UnknownShift(id.as_str().to_string()));
        }
        Ok(())
    }

    pub fn build_schedule(&self, opts: EngineOptions) -> ScheduleResult {
        sweep::build_schedule(&self.roster, opts)
    }

    pub fn audit(&self, result: &ScheduleResult, opts: EngineOptions) -> Vec<Violation> {
        audit::audit(&self.roster, result, opts.duplicate_shifts)
    }
}

impl From<Roster> for Scheduler {
    fn from(roster: Roster) -> Self {
        Self::new(roster)
    }
}
