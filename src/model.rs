use crate::scheduler::{RosterBounds, RosterError};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nombre de jours d'une semaine de roulement (samedi → vendredi).
pub const DAYS_PER_WEEK: usize = 7;
/// Nombre de gardes par jour (matin, soir).
pub const SHIFTS_PER_DAY: usize = 2;
/// Gardes hebdomadaires imposées au titulaire.
pub const MANAGER_WEEKLY_SHIFTS: i64 = 5;
pub const STAFF_WEEKLY_MIN: i64 = 4;
pub const STAFF_WEEKLY_MAX: i64 = 5;

/// Identifiant fort pour un pharmacien (index dans l'équipe, 0 = titulaire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PharmacistId(usize);

impl PharmacistId {
    pub const MANAGER: PharmacistId = PharmacistId(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }
    pub fn index(self) -> usize {
        self.0
    }
    pub fn role(self) -> Role {
        if self.0 == 0 {
            Role::Manager
        } else {
            Role::Staff
        }
    }
}

impl fmt::Display for PharmacistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Rôle : le titulaire a un quota fixe, les adjoints une plage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Staff,
}

/// Jour de la semaine de roulement. La semaine commence le samedi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Saturday = 0,
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
}

impl Day {
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Saturday,
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];
    pub const WEEKEND: [Day; 2] = [Day::Saturday, Day::Sunday];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Day::ALL.get(index).copied()
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Day::Saturday | Day::Sunday)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Day::Saturday => "Sat",
            Day::Sunday => "Sun",
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepte l'index (`0` = samedi), le nom anglais ou son abréviation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        if let Ok(idx) = raw.parse::<usize>() {
            return Day::from_index(idx).ok_or_else(|| format!("day index out of range: {idx}"));
        }
        Day::ALL
            .iter()
            .copied()
            .find(|d| {
                let short = d.short_name().to_ascii_lowercase();
                raw == short || raw == format!("{d:?}").to_ascii_lowercase()
            })
            .ok_or_else(|| format!("unknown day: {s}"))
    }
}

/// Type de garde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    Morning = 0,
    Evening = 1,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; SHIFTS_PER_DAY] = [ShiftKind::Morning, ShiftKind::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ShiftKind> {
        ShiftKind::ALL.get(index).copied()
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftKind::Morning => f.write_str("morning"),
            ShiftKind::Evening => f.write_str("evening"),
        }
    }
}

impl FromStr for ShiftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "m" | "morning" | "matin" => Ok(ShiftKind::Morning),
            "1" | "e" | "evening" | "soir" => Ok(ShiftKind::Evening),
            other => Err(format!("unknown shift: {other}")),
        }
    }
}

/// Créneau (semaine, jour, garde).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub week: usize,
    pub day: Day,
    pub shift: ShiftKind,
}

impl Period {
    pub fn new(week: usize, day: Day, shift: ShiftKind) -> Self {
        Self { week, day, shift }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{} {} {}", self.week, self.day, self.shift)
    }
}

fn default_weight() -> u32 {
    1
}

/// Demande de repos : le pharmacien préfère ne pas travailler ce créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    pub pharmacist: PharmacistId,
    pub week: usize,
    pub day: Day,
    pub shift: ShiftKind,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl ShiftRequest {
    pub fn new(pharmacist: usize, week: usize, day: Day, shift: ShiftKind) -> Self {
        Self {
            pharmacist: PharmacistId::new(pharmacist),
            week,
            day,
            shift,
            weight: default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn period(&self) -> Period {
        Period::new(self.week, self.day, self.shift)
    }
}

/// Paramètres complets d'une génération de roulement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub num_pharmacists: usize,
    pub num_weeks: usize,
    pub max_cont_staff: u8,
    pub max_cont_manager: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<ShiftRequest>,
    /// Premier samedi du roulement, uniquement pour l'affichage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_secs: Option<u64>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            num_pharmacists: 3,
            num_weeks: 3,
            max_cont_staff: 3,
            max_cont_manager: 7,
            requests: Vec::new(),
            start_date: None,
            time_limit_secs: None,
        }
    }
}

impl RosterConfig {
    pub fn new(num_pharmacists: usize, num_weeks: usize) -> Self {
        Self {
            num_pharmacists,
            num_weeks,
            ..Self::default()
        }
    }

    pub fn with_request(mut self, request: ShiftRequest) -> Self {
        self.requests.push(request);
        self
    }

    /// Vérifie la configuration avant toute construction de modèle.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.num_pharmacists < 2 {
            return Err(RosterError::InvalidConfiguration(format!(
                "at least 2 pharmacists are required (got {})",
                self.num_pharmacists
            )));
        }
        if self.num_weeks == 0 {
            return Err(RosterError::InvalidConfiguration(
                "num_weeks must be > 0".to_string(),
            ));
        }
        for (name, cap) in [
            ("max_cont_staff", self.max_cont_staff),
            ("max_cont_manager", self.max_cont_manager),
        ] {
            if cap == 0 || usize::from(cap) > DAYS_PER_WEEK {
                return Err(RosterError::InvalidConfiguration(format!(
                    "{name} must be in 1..={DAYS_PER_WEEK} (got {cap})"
                )));
            }
        }
        if let Some(date) = self.start_date {
            if date.weekday() != Weekday::Sat {
                return Err(RosterError::InvalidConfiguration(format!(
                    "start_date must be a Saturday (got {date}, a {:?})",
                    date.weekday()
                )));
            }
        }
        for req in &self.requests {
            self.check_slot(req.pharmacist, req.week)
                .map_err(|err| RosterError::InvalidConfiguration(format!("request {}: {err}", req.period())))?;
        }
        Ok(())
    }

    pub(crate) fn check_slot(&self, pharmacist: PharmacistId, week: usize) -> Result<(), RosterError> {
        if pharmacist.index() >= self.num_pharmacists {
            return Err(RosterError::OutOfRange {
                what: "pharmacist",
                value: pharmacist.index(),
                limit: self.num_pharmacists,
            });
        }
        if week >= self.num_weeks {
            return Err(RosterError::OutOfRange {
                what: "week",
                value: week,
                limit: self.num_weeks,
            });
        }
        Ok(())
    }

    pub fn pharmacists(&self) -> impl Iterator<Item = PharmacistId> {
        (0..self.num_pharmacists).map(PharmacistId::new)
    }

    pub fn staff(&self) -> impl Iterator<Item = PharmacistId> {
        (1..self.num_pharmacists).map(PharmacistId::new)
    }

    /// Plafond de jours consécutifs selon le rôle.
    pub fn max_cont(&self, role: Role) -> usize {
        match role {
            Role::Manager => usize::from(self.max_cont_manager),
            Role::Staff => usize::from(self.max_cont_staff),
        }
    }

    pub fn bounds(&self) -> RosterBounds {
        RosterBounds::for_config(self)
    }

    /// Date calendaire d'un jour du roulement, si `start_date` est connu.
    pub fn date_of(&self, week: usize, day: Day) -> Option<NaiveDate> {
        let offset = (week * DAYS_PER_WEEK + day.index()) as u64;
        self.start_date
            .and_then(|d| d.checked_add_days(chrono::Days::new(offset)))
    }
}
