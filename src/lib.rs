#![forbid(unsafe_code)]
//! Garde — génération du roulement matin/soir d'une petite équipe de pharmaciens.
//!
//! - Une variable booléenne par (pharmacien, semaine, jour, garde).
//! - Règles dures : couverture, charge, repos, continuité, week-ends.
//! - Objectif : minimiser les demandes de repos non satisfaites.
//! - Résolution déléguée à un moteur MILP (`good_lp` + `microlp`).
//! - Semaine samedi → vendredi ; le pharmacien 0 est le titulaire.

pub mod io;
pub mod linear;
pub mod model;
pub mod render;
pub mod roster;
pub mod scheduler;
pub mod solver;

pub use linear::{LinearConstraint, LinearExpr, Relation};
pub use model::{Day, Period, PharmacistId, Role, RosterConfig, ShiftKind, ShiftRequest};
pub use render::{render_stats, render_summary, GridRenderer, TextGrid};
pub use roster::{audit, generate_roster, PharmacistStats, Roster, SolvedRoster, Violation, ViolationKind};
pub use scheduler::{
    build_model, ConstraintKind, RosterBounds, RosterError, ScheduleModel, ScheduleModelBuilder,
    VarId, VariableModel, WindowFamily,
};
pub use solver::{Assignment, MicroLpBackend, SolveOptions, SolveOutcome, SolveStatus, SolverBackend};
