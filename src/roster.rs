//! Lecture de l'affectation en grille, statistiques et audit des règles.

use crate::model::{
    Day, Period, PharmacistId, Role, RosterConfig, ShiftKind, DAYS_PER_WEEK, MANAGER_WEEKLY_SHIFTS,
    STAFF_WEEKLY_MAX, STAFF_WEEKLY_MIN,
};
use crate::scheduler::{build_model, RosterBounds, RosterError, VariableModel};
use crate::solver::{Assignment, SolveOptions, SolveStatus, SolverBackend};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Une semaine de roulement : le pharmacien de chaque garde, samedi → vendredi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRoster {
    pub morning: [PharmacistId; DAYS_PER_WEEK],
    pub evening: [PharmacistId; DAYS_PER_WEEK],
}

impl WeekRoster {
    pub fn get(&self, day: Day, shift: ShiftKind) -> PharmacistId {
        match shift {
            ShiftKind::Morning => self.morning[day.index()],
            ShiftKind::Evening => self.evening[day.index()],
        }
    }

    fn slot_mut(&mut self, day: Day, shift: ShiftKind) -> &mut PharmacistId {
        match shift {
            ShiftKind::Morning => &mut self.morning[day.index()],
            ShiftKind::Evening => &mut self.evening[day.index()],
        }
    }
}

/// Roulement produit : un pharmacien par créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub num_pharmacists: usize,
    pub weeks: Vec<WeekRoster>,
}

impl Roster {
    /// Construit une grille depuis des couples (matin, soir) par jour.
    pub fn from_pairs(num_pharmacists: usize, weeks: &[[(usize, usize); DAYS_PER_WEEK]]) -> Self {
        let weeks = weeks
            .iter()
            .map(|days| WeekRoster {
                morning: days.map(|(m, _)| PharmacistId::new(m)),
                evening: days.map(|(_, e)| PharmacistId::new(e)),
            })
            .collect();
        Self {
            num_pharmacists,
            weeks,
        }
    }

    /// Relit une affectation : chaque créneau doit avoir exactement un titulaire.
    pub fn from_assignment(vars: &VariableModel, assignment: &Assignment) -> Result<Self, RosterError> {
        let mut weeks = Vec::with_capacity(vars.num_weeks());
        for w in 0..vars.num_weeks() {
            let mut week = WeekRoster {
                morning: [PharmacistId::MANAGER; DAYS_PER_WEEK],
                evening: [PharmacistId::MANAGER; DAYS_PER_WEEK],
            };
            for day in Day::ALL {
                for shift in ShiftKind::ALL {
                    let period = Period::new(w, day, shift);
                    let mut on_duty = Vec::new();
                    for n in 0..vars.num_pharmacists() {
                        let p = PharmacistId::new(n);
                        if assignment.value(vars.lookup(p, period)?) {
                            on_duty.push(p);
                        }
                    }
                    let &[p] = on_duty.as_slice() else {
                        return Err(RosterError::Solver(format!(
                            "{period}: expected exactly one pharmacist, got {}",
                            on_duty.len()
                        )));
                    };
                    *week.slot_mut(day, shift) = p;
                }
            }
            weeks.push(week);
        }
        Ok(Self {
            num_pharmacists: vars.num_pharmacists(),
            weeks,
        })
    }

    /// Opération inverse de `from_assignment`.
    pub fn to_assignment(&self, vars: &VariableModel) -> Result<Assignment, RosterError> {
        let mut values = vec![false; vars.len()];
        for (period, p) in self.slots() {
            values[vars.lookup(p, period)?.index()] = true;
        }
        Ok(Assignment::new(values))
    }

    pub fn num_weeks(&self) -> usize {
        self.weeks.len()
    }

    pub fn get(&self, period: Period) -> Option<PharmacistId> {
        self.weeks
            .get(period.week)
            .map(|w| w.get(period.day, period.shift))
    }

    pub fn set(&mut self, period: Period, pharmacist: PharmacistId) {
        if let Some(week) = self.weeks.get_mut(period.week) {
            *week.slot_mut(period.day, period.shift) = pharmacist;
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = (Period, PharmacistId)> + '_ {
        self.weeks.iter().enumerate().flat_map(|(w, week)| {
            Day::ALL.into_iter().flat_map(move |day| {
                ShiftKind::ALL
                    .into_iter()
                    .map(move |shift| (Period::new(w, day, shift), week.get(day, shift)))
            })
        })
    }

    fn works(&self, p: PharmacistId, week: usize, day: Day, shift: ShiftKind) -> bool {
        self.weeks[week].get(day, shift) == p
    }

    fn shifts_on(&self, p: PharmacistId, week: usize, day: Day) -> i64 {
        ShiftKind::ALL
            .into_iter()
            .filter(|&s| self.works(p, week, day, s))
            .count() as i64
    }

    pub fn stats(&self) -> Vec<PharmacistStats> {
        (0..self.num_pharmacists)
            .map(|n| {
                let p = PharmacistId::new(n);
                let mut st = PharmacistStats {
                    pharmacist: p,
                    ..PharmacistStats::default()
                };
                for (period, on_duty) in self.slots() {
                    if on_duty != p {
                        continue;
                    }
                    st.shifts += 1;
                    let weekend = period.day.is_weekend();
                    match period.shift {
                        ShiftKind::Morning => {
                            st.mornings += 1;
                            st.weekend_mornings += i64::from(weekend);
                        }
                        ShiftKind::Evening => {
                            st.evenings += 1;
                            st.weekend_evenings += i64::from(weekend);
                        }
                    }
                }
                st.weekends_off = (0..self.num_weeks())
                    .filter(|&w| Day::WEEKEND.iter().all(|&d| self.shifts_on(p, w, d) == 0))
                    .count() as i64;
                st
            })
            .collect()
    }
}

/// Compteurs par pharmacien sur tout l'horizon.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PharmacistStats {
    pub pharmacist: PharmacistId,
    pub shifts: i64,
    pub mornings: i64,
    pub evenings: i64,
    pub weekend_mornings: i64,
    pub weekend_evenings: i64,
    pub weekends_off: i64,
}

impl PharmacistStats {
    pub fn weekend_shifts(&self) -> i64 {
        self.weekend_mornings + self.weekend_evenings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    Horizon,
    UnknownPharmacist,
    DoubleShift,
    RestViolation,
    WeeklyLoad,
    HorizonBalance,
    ShiftBalance,
    Continuity,
    WeekendSymmetry,
    WeekendQuota,
    WeekendBalance,
}

/// Règle enfreinte par un roulement.
#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub pharmacist: Option<PharmacistId>,
    pub detail: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pharmacist {
            Some(p) => write!(f, "{:?} ({p}): {}", self.kind, self.detail),
            None => write!(f, "{:?}: {}", self.kind, self.detail),
        }
    }
}

/// Revérifie toutes les règles directement sur la grille, sans passer par
/// le modèle linéaire.
pub fn audit(roster: &Roster, config: &RosterConfig) -> Vec<Violation> {
    if roster.num_weeks() != config.num_weeks || roster.num_pharmacists != config.num_pharmacists {
        return vec![Violation {
            kind: ViolationKind::Horizon,
            pharmacist: None,
            detail: format!(
                "roster has {} pharmacists x {} weeks, configuration expects {} x {}",
                roster.num_pharmacists,
                roster.num_weeks(),
                config.num_pharmacists,
                config.num_weeks
            ),
        }];
    }

    let mut out = Vec::new();
    let mut push = |kind, pharmacist: Option<PharmacistId>, detail: String| {
        out.push(Violation {
            kind,
            pharmacist,
            detail,
        })
    };

    for (period, p) in roster.slots() {
        if p.index() >= config.num_pharmacists {
            push(ViolationKind::UnknownPharmacist, Some(p), format!("assigned to {period}"));
        }
    }

    let bounds = RosterBounds::for_config(config);
    let weeks = roster.num_weeks();
    let horizon_days = weeks * DAYS_PER_WEEK;
    let day_at = |abs: usize| (abs / DAYS_PER_WEEK % weeks, Day::ALL[abs % DAYS_PER_WEEK]);

    for p in config.pharmacists() {
        for abs in 0..horizon_days {
            let (w, day) = day_at(abs);
            if roster.shifts_on(p, w, day) > 1 {
                push(ViolationKind::DoubleShift, Some(p), format!("w{w} {day}"));
            }
            if abs + 1 < horizon_days {
                let (nw, next) = day_at(abs + 1);
                if roster.works(p, w, day, ShiftKind::Evening) && roster.works(p, nw, next, ShiftKind::Morning) {
                    push(
                        ViolationKind::RestViolation,
                        Some(p),
                        format!("evening w{w} {day} then morning w{nw} {next}"),
                    );
                }
            }
        }

        for w in 0..weeks {
            let load: i64 = Day::ALL.iter().map(|&d| roster.shifts_on(p, w, d)).sum();
            let ok = match p.role() {
                Role::Manager => load == MANAGER_WEEKLY_SHIFTS,
                Role::Staff => (STAFF_WEEKLY_MIN..=STAFF_WEEKLY_MAX).contains(&load),
            };
            if !ok {
                push(ViolationKind::WeeklyLoad, Some(p), format!("week {w}: {load} shifts"));
            }

            for shift in ShiftKind::ALL {
                if roster.works(p, w, Day::Saturday, shift) != roster.works(p, w, Day::Sunday, shift) {
                    push(
                        ViolationKind::WeekendSymmetry,
                        Some(p),
                        format!("week {w}: saturday and sunday {shift} differ"),
                    );
                }
            }
        }

        let cap = config.max_cont(p.role());
        for start in 0..horizon_days {
            let worked: i64 = (start..=start + cap)
                .map(|abs| {
                    let (w, day) = day_at(abs % horizon_days);
                    roster.shifts_on(p, w, day)
                })
                .sum();
            if worked > cap as i64 {
                let (w, day) = day_at(start);
                push(
                    ViolationKind::Continuity,
                    Some(p),
                    format!("{worked} shifts in {} days from w{w} {day}", cap + 1),
                );
            }
        }
    }

    for st in roster.stats() {
        let p = st.pharmacist;
        if p.index() >= config.num_pharmacists {
            continue;
        }
        if p.role() == Role::Staff && !(bounds.min_shifts..=bounds.max_shifts).contains(&st.shifts) {
            push(
                ViolationKind::HorizonBalance,
                Some(p),
                format!(
                    "{} shifts, expected {}..={}",
                    st.shifts, bounds.min_shifts, bounds.max_shifts
                ),
            );
        }
        if (st.evenings - st.mornings).abs() > 1 {
            push(
                ViolationKind::ShiftBalance,
                Some(p),
                format!("{} mornings / {} evenings", st.mornings, st.evenings),
            );
        }
        let off = 2 * weeks as i64 - st.weekend_shifts();
        if !(2 * bounds.min_weekends..=2 * bounds.max_weekends).contains(&off) {
            push(
                ViolationKind::WeekendQuota,
                Some(p),
                format!(
                    "{} weekend shifts off, expected {}..={}",
                    off,
                    2 * bounds.min_weekends,
                    2 * bounds.max_weekends
                ),
            );
        }
        if (st.weekend_evenings - st.weekend_mornings).abs() > 2 {
            push(
                ViolationKind::WeekendBalance,
                Some(p),
                format!(
                    "{} weekend mornings / {} weekend evenings",
                    st.weekend_mornings, st.weekend_evenings
                ),
            );
        }
    }

    out
}

/// Résultat d'une génération réussie.
#[derive(Debug, Clone)]
pub struct SolvedRoster {
    pub roster: Roster,
    pub status: SolveStatus,
    /// Poids total des demandes de repos non satisfaites.
    pub objective: i64,
    pub wall_time: Duration,
    pub bounds: RosterBounds,
}

/// Construit le modèle, le résout et relit la grille.
///
/// Un modèle infaisable ou un délai épuisé remontent comme erreurs
/// distinctes ; rien n'est relancé.
pub fn generate_roster<B>(config: &RosterConfig, backend: &B) -> Result<SolvedRoster, RosterError>
where
    B: SolverBackend + ?Sized,
{
    let model = build_model(config)?;
    let opts = SolveOptions {
        time_limit: config.time_limit_secs.map(Duration::from_secs),
    };
    info!(
        backend = backend.name(),
        pharmacists = config.num_pharmacists,
        weeks = config.num_weeks,
        constraints = model.constraints().len(),
        "solving roster"
    );
    let outcome = backend.solve(&model, &opts)?;
    match outcome.status {
        SolveStatus::Optimal | SolveStatus::Feasible => {
            let assignment = outcome
                .assignment
                .ok_or_else(|| RosterError::Solver("solver reported a solution without values".into()))?;
            let roster = Roster::from_assignment(model.vars(), &assignment)?;
            Ok(SolvedRoster {
                roster,
                status: outcome.status,
                objective: outcome
                    .objective
                    .unwrap_or_else(|| model.objective_value(assignment.values())),
                wall_time: outcome.wall_time,
                bounds: *model.bounds(),
            })
        }
        SolveStatus::Infeasible => Err(RosterError::Infeasible),
        SolveStatus::Unknown => Err(RosterError::Inconclusive {
            elapsed: outcome.wall_time,
        }),
    }
}
