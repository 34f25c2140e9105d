use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Préférences individuelles (utilisées seulement pour départager).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub avoid_nights: bool,
    /// Noms de créneaux préférés ; vide = aucune préférence.
    #[serde(default)]
    pub preferred_unit: BTreeSet<String>,
}

/// Exception de disponibilité pour une date précise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub date: NaiveDate,
    pub can_work: bool,
}

/// Membre du personnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub skills: BTreeSet<String>,
    /// Plafond cumulé sur tout le lot traité, pas remis à zéro chaque semaine.
    pub max_weekly_hours: u32,
    /// Déclaré mais non appliqué par le moteur.
    pub max_consecutive_days: u32,
    pub min_rest: u32,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability: Vec<Availability>,
}

impl Staff {
    /// Crée un membre avec les limites par défaut des `Rules`.
    pub fn new<N: Into<String>, R: Into<String>>(name: N, role: R) -> Self {
        Self::with_rules(StaffId::random(), name, role, &Rules::default())
    }

    pub fn with_rules<N: Into<String>, R: Into<String>>(
        id: StaffId,
        name: N,
        role: R,
        rules: &Rules,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
            skills: BTreeSet::new(),
            max_weekly_hours: rules.max_hours_per_week_default,
            max_consecutive_days: rules.max_consecutive_days_default,
            min_rest: rules.min_rest_hours_default,
            preferences: Preferences::default(),
            availability: Vec::new(),
        }
    }

    /// Disponibilité pour un jour donné. Sans exception enregistrée : disponible.
    pub fn available_on(&self, day: NaiveDate) -> bool {
        self.availability
            .iter()
            .find(|a| a.date == day)
            .map_or(true, |a| a.can_work)
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Créneau à pourvoir (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    /// Nom d'unité, sert aussi de clé pour `preferred_unit`.
    pub name: String,
    pub required_role: String,
    pub required_count: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Shift {
    /// Crée un shift en validant que `end > start`.
    pub fn new(
        name: String,
        required_role: String,
        required_count: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, String> {
        if end <= start {
            return Err("end must be strictly after start".to_string());
        }
        Ok(Self {
            id: ShiftId::random(),
            name,
            required_role,
            required_count,
            start,
            end,
        })
    }

    /// Durée en heures entières (troncature).
    pub fn duration_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }

    /// Jour calendaire utilisé pour les disponibilités.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Vrai dès que le début est à 12h ou plus : après-midi et soirée comptent
    /// aussi comme « nuit ».
    pub fn is_night(&self) -> bool {
        self.start.hour() >= 12
    }
}

/// Valeurs par défaut appliquées au chargement ; inertes pendant la planification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub max_hours_per_week_default: u32,
    pub max_consecutive_days_default: u32,
    pub min_rest_hours_default: u32,
    #[serde(default)]
    pub hard_constraints: BTreeSet<String>,
    #[serde(default)]
    pub soft_constraints: BTreeSet<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_hours_per_week_default: 40,
            max_consecutive_days_default: 5,
            min_rest_hours_default: 12,
            hard_constraints: BTreeSet::new(),
            soft_constraints: BTreeSet::new(),
        }
    }
}

/// Modèle d'entrée complet
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub staff: Vec<Staff>,
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub rules: Rules,
}

impl Roster {
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_shift<'a>(&'a self, id: &ShiftId) -> Option<&'a Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }
}
