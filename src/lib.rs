#![forbid(unsafe_code)]
//! Shiftplan — affectation gloutonne de personnel à des créneaux.
//!
//! - Filtre d'éligibilité : rôle, disponibilité, plafond d'heures, repos minimal.
//! - Classement : équité (heures cumulées), préférences, puis id.
//! - Sous-effectif signalé en alertes, jamais en erreur.
//! - Chargement JSON et rendus CSV en périphérie du moteur.

pub mod engine;
pub mod io;
pub mod model;
pub mod report;
pub mod storage;

pub use engine::{
    build_schedule, Assignment, DuplicateShiftPolicy, EngineOptions, SchedError, ScheduleResult,
    Scheduler, Violation, ViolationKind, Warning,
};
pub use io::{load_roster_json, parse_roster_json, LoadFilters};
pub use model::{Availability, Preferences, Roster, Rules, Shift, ShiftId, Staff, StaffId};
pub use storage::{JsonStorage, Storage};
