#![allow(dead_code)]
use garde::{Roster, RosterConfig};

/// Roulement 3 pharmaciens × 3 semaines respectant toutes les règles ;
/// le titulaire (P0) n'est pas de garde le samedi de la semaine 0.
pub fn valid_roster() -> Roster {
    Roster::from_pairs(
        3,
        &[
            [(1, 2), (1, 2), (0, 1), (0, 2), (0, 1), (0, 2), (0, 1)],
            [(2, 0), (2, 0), (1, 2), (1, 0), (1, 0), (2, 0), (2, 1)],
            [(0, 1), (0, 1), (2, 0), (1, 2), (1, 2), (0, 1), (2, 0)],
        ],
    )
}

/// Semaine unique valide pour 3 pharmaciens.
pub fn valid_single_week() -> Roster {
    Roster::from_pairs(
        3,
        &[[(0, 1), (0, 1), (0, 2), (1, 0), (2, 1), (2, 0), (1, 2)]],
    )
}

pub fn default_config() -> RosterConfig {
    RosterConfig::default()
}
