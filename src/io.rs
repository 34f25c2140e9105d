use crate::model::{
    Availability, Preferences, Roster, Rules, Shift, ShiftId, Staff, StaffId,
};
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Filtre optionnel appliqué au chargement.
#[derive(Debug, Clone, Default)]
pub struct LoadFilters {
    /// Ne garder que les shifts de cette unité (nom exact) ; vide = pas de filtre.
    pub unit: Option<String>,
}

impl LoadFilters {
    pub fn unit<S: Into<String>>(unit: S) -> Self {
        Self {
            unit: Some(unit.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawInput {
    staff: Vec<RawStaff>,
    shifts: Vec<RawShift>,
    #[serde(default)]
    rules: Option<RawRules>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRules {
    max_hours_per_week_default: Option<u32>,
    max_consecutive_days_default: Option<u32>,
    min_rest_hours_default: Option<u32>,
    #[serde(default)]
    hard_constraints: BTreeSet<String>,
    #[serde(default)]
    soft_constraints: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct RawStaff {
    id: String,
    name: Option<String>,
    #[serde(default)]
    role: String,
    #[serde(default)]
    skills: BTreeSet<String>,
    max_weekly_hours: Option<u32>,
    max_consecutive_days: Option<u32>,
    min_rest: Option<u32>,
    #[serde(default)]
    preferences: Option<RawPreferences>,
    #[serde(default)]
    availability: Vec<RawAvailability>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPreferences {
    #[serde(default)]
    avoid_nights: bool,
    #[serde(default)]
    preferred_unit: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct RawAvailability {
    date: String,
    #[serde(default = "default_true")]
    can_work: bool,
}

#[derive(Debug, Deserialize)]
struct RawShift {
    id: String,
    #[serde(default)]
    name: String,
    start: String,
    end: String,
    #[serde(default, alias = "req_role")]
    required_role: String,
    #[serde(default = "default_count")]
    required_count: u32,
}

fn default_true() -> bool {
    true
}

fn default_count() -> u32 {
    1
}

/// Charge un document JSON `{ staff, shifts, rules? }` depuis un fichier.
pub fn load_roster_json<P: AsRef<Path>>(path: P, filters: &LoadFilters) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_roster_json(&text, filters).with_context(|| format!("parsing {}", path.display()))
}

/// Parse le document d'entrée et applique les défauts des `rules` au personnel.
pub fn parse_roster_json(text: &str, filters: &LoadFilters) -> anyhow::Result<Roster> {
    let raw: RawInput = serde_json::from_str(text).context("invalid input document")?;
    let rules = build_rules(raw.rules.unwrap_or_default());

    let staff = raw
        .staff
        .into_iter()
        .map(|s| build_staff(s, &rules))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut shifts = Vec::with_capacity(raw.shifts.len());
    for sh in raw.shifts {
        if let Some(unit) = filters.unit.as_deref().filter(|u| !u.is_empty()) {
            if sh.name != unit {
                continue;
            }
        }
        shifts.push(build_shift(sh)?);
    }

    tracing::debug!(staff = staff.len(), shifts = shifts.len(), "input loaded");
    Ok(Roster {
        staff,
        shifts,
        rules,
    })
}

fn build_rules(raw: RawRules) -> Rules {
    let defaults = Rules::default();
    Rules {
        max_hours_per_week_default: raw
            .max_hours_per_week_default
            .unwrap_or(defaults.max_hours_per_week_default),
        max_consecutive_days_default: raw
            .max_consecutive_days_default
            .unwrap_or(defaults.max_consecutive_days_default),
        min_rest_hours_default: raw
            .min_rest_hours_default
            .unwrap_or(defaults.min_rest_hours_default),
        hard_constraints: raw.hard_constraints,
        soft_constraints: raw.soft_constraints,
    }
}

fn build_staff(raw: RawStaff, rules: &Rules) -> anyhow::Result<Staff> {
    if raw.id.trim().is_empty() {
        bail!("staff id cannot be empty");
    }
    let availability = raw
        .availability
        .iter()
        .map(|a| {
            let date = parse_date(&a.date)
                .with_context(|| format!("bad availability date for staff {}", raw.id))?;
            Ok(Availability {
                date,
                can_work: a.can_work,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let prefs = raw.preferences.unwrap_or_default();

    Ok(Staff {
        name: raw.name.unwrap_or_else(|| raw.id.clone()),
        id: StaffId::new(&raw.id),
        role: raw.role,
        skills: raw.skills,
        max_weekly_hours: raw.max_weekly_hours.unwrap_or(rules.max_hours_per_week_default),
        max_consecutive_days: raw
            .max_consecutive_days
            .unwrap_or(rules.max_consecutive_days_default),
        min_rest: raw.min_rest.unwrap_or(rules.min_rest_hours_default),
        preferences: Preferences {
            avoid_nights: prefs.avoid_nights,
            preferred_unit: prefs.preferred_unit,
        },
        availability,
    })
}

fn build_shift(raw: RawShift) -> anyhow::Result<Shift> {
    if raw.id.trim().is_empty() {
        bail!("shift id cannot be empty");
    }
    let start = parse_datetime(&raw.start)
        .with_context(|| format!("bad start for shift {}", raw.id))?;
    let end =
        parse_datetime(&raw.end).with_context(|| format!("bad end for shift {}", raw.id))?;
    let mut shift = Shift::new(raw.name, raw.required_role, raw.required_count, start, end)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid time range for shift {}", raw.id))?;
    shift.id = ShiftId::new(&raw.id);
    Ok(shift)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw}"))
}

/// Accepte RFC3339 ou un horodatage naïf (`YYYY-MM-DDTHH:MM[:SS]`) lu en UTC.
fn parse_datetime(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("invalid datetime: {raw}"))?;
    Ok(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn naive_and_rfc3339_datetimes() {
        let a = parse_datetime("2025-04-01T07:00").unwrap();
        let b = parse_datetime("2025-04-01T07:00:00Z").unwrap();
        let c = parse_datetime("2025-04-01T09:00:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.hour(), 7);
        assert!(parse_datetime("01/04/2025 07:00").is_err());
    }
}
