use super::RosterError;
use crate::model::{
    Day, Period, PharmacistId, RosterConfig, ShiftKind, DAYS_PER_WEEK, SHIFTS_PER_DAY,
};
use std::fmt;

/// Identifiant dense d'une variable booléenne (pharmacien, semaine, jour, garde).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Univers des variables : une par (pharmacien, semaine, jour, garde).
///
/// L'indexation est un tableau dense à 4 dimensions ; aucune variable n'est
/// créée à la volée et deux tuples distincts ne partagent jamais un `VarId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableModel {
    num_pharmacists: usize,
    num_weeks: usize,
}

impl VariableModel {
    pub fn new(num_pharmacists: usize, num_weeks: usize) -> Self {
        Self {
            num_pharmacists,
            num_weeks,
        }
    }

    pub fn for_config(config: &RosterConfig) -> Self {
        Self::new(config.num_pharmacists, config.num_weeks)
    }

    pub fn num_pharmacists(&self) -> usize {
        self.num_pharmacists
    }

    pub fn num_weeks(&self) -> usize {
        self.num_weeks
    }

    pub fn len(&self) -> usize {
        self.num_pharmacists * self.num_weeks * DAYS_PER_WEEK * SHIFTS_PER_DAY
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recherche contrôlée : erreur si le pharmacien ou la semaine sort des bornes.
    pub fn lookup(&self, pharmacist: PharmacistId, period: Period) -> Result<VarId, RosterError> {
        if pharmacist.index() >= self.num_pharmacists {
            return Err(RosterError::OutOfRange {
                what: "pharmacist",
                value: pharmacist.index(),
                limit: self.num_pharmacists,
            });
        }
        if period.week >= self.num_weeks {
            return Err(RosterError::OutOfRange {
                what: "week",
                value: period.week,
                limit: self.num_weeks,
            });
        }
        Ok(self.at(pharmacist.index(), period.week, period.day, period.shift))
    }

    /// Accès non contrôlé réservé aux règles, qui itèrent dans les bornes.
    pub(crate) fn at(&self, pharmacist: usize, week: usize, day: Day, shift: ShiftKind) -> VarId {
        debug_assert!(pharmacist < self.num_pharmacists && week < self.num_weeks);
        let idx = ((pharmacist * self.num_weeks + week) * DAYS_PER_WEEK + day.index())
            * SHIFTS_PER_DAY
            + shift.index();
        VarId(idx)
    }

    /// Opération inverse de `lookup`.
    pub fn decode(&self, var: VarId) -> Option<(PharmacistId, Period)> {
        if var.0 >= self.len() {
            return None;
        }
        let shift = ShiftKind::from_index(var.0 % SHIFTS_PER_DAY)?;
        let rest = var.0 / SHIFTS_PER_DAY;
        let day = Day::from_index(rest % DAYS_PER_WEEK)?;
        let rest = rest / DAYS_PER_WEEK;
        let week = rest % self.num_weeks;
        let pharmacist = rest / self.num_weeks;
        Some((PharmacistId::new(pharmacist), Period::new(week, day, shift)))
    }

    pub fn name(&self, var: VarId) -> String {
        match self.decode(var) {
            Some((p, period)) => format!(
                "shift_n{}w{}d{}s{}",
                p.index(),
                period.week,
                period.day.index(),
                period.shift.index()
            ),
            None => var.to_string(),
        }
    }

    /// Les deux gardes d'un jour.
    pub fn day_vars(&self, pharmacist: usize, week: usize, day: Day) -> [VarId; SHIFTS_PER_DAY] {
        ShiftKind::ALL.map(|s| self.at(pharmacist, week, day, s))
    }

    pub fn week_vars(&self, pharmacist: usize, week: usize) -> impl Iterator<Item = VarId> + '_ {
        Day::ALL
            .into_iter()
            .flat_map(move |d| self.day_vars(pharmacist, week, d))
    }

    pub fn horizon_vars(&self, pharmacist: usize) -> impl Iterator<Item = VarId> + '_ {
        (0..self.num_weeks).flat_map(move |w| self.week_vars(pharmacist, w))
    }

    /// Variables d'un type de garde, éventuellement restreintes aux week-ends.
    pub fn shift_kind_vars(
        &self,
        pharmacist: usize,
        shift: ShiftKind,
        weekend_only: bool,
    ) -> impl Iterator<Item = VarId> + '_ {
        (0..self.num_weeks).flat_map(move |w| {
            Day::ALL
                .into_iter()
                .filter(move |d| !weekend_only || d.is_weekend())
                .map(move |d| self.at(pharmacist, w, d, shift))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = VarId> {
        (0..self.len()).map(VarId)
    }
}
