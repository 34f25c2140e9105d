use crate::model::Staff;
use chrono::{DateTime, Utc};

/// Ombre mutable d'un membre pendant un passage du moteur.
#[derive(Debug, Clone)]
pub(super) struct WorkerState<'a> {
    pub staff: &'a Staff,
    /// Cumul sur tout le passage.
    pub assigned_hours: i64,
    pub last_end: Option<DateTime<Utc>>,
}

impl<'a> WorkerState<'a> {
    pub fn new(staff: &'a Staff) -> Self {
        Self {
            staff,
            assigned_hours: 0,
            last_end: None,
        }
    }

    pub fn record(&mut self, hours: i64, end: DateTime<Utc>) {
        self.assigned_hours += hours;
        self.last_end = Some(end);
    }
}
