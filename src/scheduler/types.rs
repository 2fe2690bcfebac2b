use crate::model::{RosterConfig, DAYS_PER_WEEK, MANAGER_WEEKLY_SHIFTS, SHIFTS_PER_DAY};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Famille d'une fenêtre glissante de continuité.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFamily {
    /// Fenêtre entièrement contenue dans une semaine.
    InWeek,
    /// Fenêtre à cheval sur la semaine `w` et `w + 1`.
    CrossWeek,
    /// Fenêtre qui repart de la dernière semaine vers la semaine 0.
    Wraparound,
}

/// Règle à l'origine d'une contrainte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Unlabeled,
    Coverage,
    DailyLimit,
    WeeklyLoad,
    HorizonBalance,
    ShiftBalance,
    Rest,
    Continuity(WindowFamily),
    WeekendSymmetry,
    WeekendQuota,
    WeekendBalance,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Unlabeled => "unlabeled",
            ConstraintKind::Coverage => "coverage",
            ConstraintKind::DailyLimit => "daily-limit",
            ConstraintKind::WeeklyLoad => "weekly-load",
            ConstraintKind::HorizonBalance => "horizon-balance",
            ConstraintKind::ShiftBalance => "shift-balance",
            ConstraintKind::Rest => "rest",
            ConstraintKind::Continuity(WindowFamily::InWeek) => "continuity/in-week",
            ConstraintKind::Continuity(WindowFamily::CrossWeek) => "continuity/cross-week",
            ConstraintKind::Continuity(WindowFamily::Wraparound) => "continuity/wraparound",
            ConstraintKind::WeekendSymmetry => "weekend-symmetry",
            ConstraintKind::WeekendQuota => "weekend-quota",
            ConstraintKind::WeekendBalance => "weekend-balance",
        };
        f.pad(name)
    }
}

/// Bornes dérivées de la taille de l'équipe et de l'horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterBounds {
    pub min_shifts: i64,
    pub max_shifts: i64,
    pub min_weekends: i64,
    pub max_weekends: i64,
}

impl RosterBounds {
    /// Suppose une configuration validée (au moins un adjoint).
    pub fn for_config(config: &RosterConfig) -> Self {
        let weeks = config.num_weeks as i64;
        let staff = (config.num_pharmacists.max(2) - 1) as i64;
        let slots_per_week = (DAYS_PER_WEEK * SHIFTS_PER_DAY) as i64;
        let total_off_peak = weeks * (slots_per_week - MANAGER_WEEKLY_SHIFTS);
        let min_shifts = total_off_peak / staff;
        let min_weekends = weeks / config.num_pharmacists.max(1) as i64;
        Self {
            min_shifts,
            max_shifts: min_shifts + 1,
            min_weekends,
            max_weekends: min_weekends + 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("{what} index {value} out of range (expected < {limit})")]
    OutOfRange {
        what: &'static str,
        value: usize,
        limit: usize,
    },
    #[error("infeasible: no roster satisfies every hard rule")]
    Infeasible,
    #[error("inconclusive: solver stopped after {elapsed:?} without a solution or a proof of infeasibility")]
    Inconclusive { elapsed: Duration },
    #[error("solver failure: {0}")]
    Solver(String),
}
