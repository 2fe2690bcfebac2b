use crate::model::{Day, RosterConfig, ShiftKind};
use crate::roster::{PharmacistStats, Roster, SolvedRoster};
use std::fmt::Write;

/// Permet de customiser le rendu d'un roulement (texte, markdown, etc.).
pub trait GridRenderer {
    fn render(&self, roster: &Roster, config: &RosterConfig) -> String;
}

/// Grille texte : par semaine, une ligne matin et une ligne soir.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextGrid;

impl GridRenderer for TextGrid {
    fn render(&self, roster: &Roster, config: &RosterConfig) -> String {
        let mut out = String::new();
        for (w, week) in roster.weeks.iter().enumerate() {
            if w > 0 {
                out.push('\n');
            }
            match config.date_of(w, Day::Saturday) {
                Some(date) => {
                    let _ = writeln!(out, "Week {w} ({date})");
                }
                None => {
                    let _ = writeln!(out, "Week {w}");
                }
            }
            let mut header = String::from("   ");
            for day in Day::ALL {
                let _ = write!(header, " {:<3}", day.short_name());
            }
            out.push_str(header.trim_end());
            out.push('\n');
            for shift in ShiftKind::ALL {
                let mut line = String::from(match shift {
                    ShiftKind::Morning => "AM ",
                    ShiftKind::Evening => "PM ",
                });
                for day in Day::ALL {
                    let _ = write!(line, " {:<3}", week.get(day, shift).to_string());
                }
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }
        out
    }
}

/// Une ligne par pharmacien.
pub fn render_stats(stats: &[PharmacistStats]) -> String {
    let mut out = String::new();
    for st in stats {
        let _ = writeln!(
            out,
            "{}: {} shifts ({} AM / {} PM), weekend {} ({} AM / {} PM), {} weekend(s) off",
            st.pharmacist,
            st.shifts,
            st.mornings,
            st.evenings,
            st.weekend_shifts(),
            st.weekend_mornings,
            st.weekend_evenings,
            st.weekends_off
        );
    }
    out
}

pub fn render_summary(solved: &SolvedRoster) -> String {
    let mut out = String::from("Statistics\n");
    let _ = writeln!(out, "  - status          : {:?}", solved.status);
    let _ = writeln!(out, "  - wall time       : {:.3}s", solved.wall_time.as_secs_f64());
    let _ = writeln!(out, "  - objective value : {}", solved.objective);
    out
}
