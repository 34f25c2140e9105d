use crate::model::{ShiftId, StaffId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Traitement des créneaux partageant le même identifiant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateShiftPolicy {
    /// Seule la première occurrence (ordre source) est planifiée.
    #[default]
    KeepFirst,
    /// Chaque occurrence est planifiée séparément.
    KeepAll,
}

/// Options du moteur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Favorise le personnel ayant le moins d'heures cumulées.
    pub fairness_on: bool,
    /// Départage selon les préférences (nuits, unités).
    pub respect_preferences: bool,
    pub duplicate_shifts: DuplicateShiftPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            fairness_on: true,
            respect_preferences: true,
            duplicate_shifts: DuplicateShiftPolicy::KeepFirst,
        }
    }
}

/// Affectation d'un créneau ; l'ordre des ids suit l'ordre d'affectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub shift_id: ShiftId,
    pub staff_ids: Vec<StaffId>,
}

/// Problème de couverture, jamais fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    NoEligibleStaff { shift: ShiftId, name: String },
    CoverageShortfall { shift: ShiftId, missing: u32 },
}

impl Warning {
    pub fn shift_id(&self) -> &ShiftId {
        match self {
            Warning::NoEligibleStaff { shift, .. } | Warning::CoverageShortfall { shift, .. } => {
                shift
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoEligibleStaff { shift, name } => {
                write!(f, "No eligible staff for shift {shift} ({name})")
            }
            Warning::CoverageShortfall { shift, missing } => {
                write!(f, "Coverage short by {missing} for shift {shift}")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub assignments: Vec<Assignment>,
    pub warnings: Vec<Warning>,
}

impl ScheduleResult {
    /// Première affectation portant cet id.
    pub fn assignment_for(&self, shift: &ShiftId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.shift_id == shift)
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn is_fully_covered(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    UnknownShift,
    UnknownStaff,
    DuplicateStaff,
    RoleMismatch,
    Unavailable,
    HourCapExceeded,
    RestViolation,
    Overstaffed,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::UnknownShift => "unknown_shift",
            ViolationKind::UnknownStaff => "unknown_staff",
            ViolationKind::DuplicateStaff => "duplicate_staff",
            ViolationKind::RoleMismatch => "role",
            ViolationKind::Unavailable => "unavailable",
            ViolationKind::HourCapExceeded => "hours",
            ViolationKind::RestViolation => "rest",
            ViolationKind::Overstaffed => "overstaffed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub shift: ShiftId,
    pub staff: Option<StaffId>,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on shift {}", self.kind.as_str(), self.shift)?;
        if let Some(staff) = &self.staff {
            write!(f, " (staff {staff})")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("unknown staff: {0}")]
    UnknownStaff(String),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
}
