//! Formation rules: starting-XI bounds, bench slots, and position swap eligibility.

use crate::models::Position;
use serde::{Deserialize, Serialize};

/// Inclusive bounds on how many starters a position may have.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    min: usize,
    max: usize,
}

const GKP_BOUNDS: Bounds = Bounds { min: 1, max: 1 };
const DEF_BOUNDS: Bounds = Bounds { min: 3, max: 5 };
const MID_BOUNDS: Bounds = Bounds { min: 2, max: 5 };
const FWD_BOUNDS: Bounds = Bounds { min: 1, max: 3 };

/// Starters required in a lineup.
pub const STARTING_TOTAL: usize = 11;

/// Full squad size per position (starting + bench): 2 GKP, 5 DEF, 5 MID, 3 FWD.
pub const SQUAD_TOTALS: FormationCounts = FormationCounts {
    gkp: 2,
    def: 5,
    mid: 5,
    fwd: 3,
};

/// Label reported for a lineup that breaks any bound.
pub const INVALID_FORMATION: &str = "Invalid";

/// Number of players per position.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormationCounts {
    pub gkp: usize,
    pub def: usize,
    pub mid: usize,
    pub fwd: usize,
}

impl FormationCounts {
    pub fn count(positions: &[Position]) -> Self {
        positions.iter().fold(Self::default(), |mut counts, pos| {
            *counts.get_mut(*pos) += 1;
            counts
        })
    }

    pub fn get(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => self.gkp,
            Position::Defender => self.def,
            Position::Midfielder => self.mid,
            Position::Forward => self.fwd,
        }
    }

    fn get_mut(&mut self, position: Position) -> &mut usize {
        match position {
            Position::Goalkeeper => &mut self.gkp,
            Position::Defender => &mut self.def,
            Position::Midfielder => &mut self.mid,
            Position::Forward => &mut self.fwd,
        }
    }

    pub fn total(&self) -> usize {
        self.gkp + self.def + self.mid + self.fwd
    }
}

/// Result of checking a starting set against the formation bounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormationReport {
    pub is_valid: bool,
    /// One message per broken bound.
    pub errors: Vec<String>,
    /// "D-M-F" when valid, else "Invalid".
    pub formation: String,
    pub counts: FormationCounts,
}

/// Validate a starting set: exactly 1 GKP, 3-5 DEF, 2-5 MID, 1-3 FWD, 11 in total.
pub fn validate_formation(positions: &[Position]) -> FormationReport {
    let counts = FormationCounts::count(positions);
    let mut errors = Vec::new();

    let total = counts.total();
    if total != STARTING_TOTAL {
        errors.push(format!(
            "Must have exactly {} players (currently {})",
            STARTING_TOTAL, total
        ));
    }
    if !within(counts.gkp, GKP_BOUNDS) {
        errors.push(format!(
            "Must have exactly {} goalkeeper (currently {})",
            GKP_BOUNDS.min, counts.gkp
        ));
    }
    if !within(counts.def, DEF_BOUNDS) {
        errors.push(range_error("defenders", DEF_BOUNDS, counts.def));
    }
    if !within(counts.mid, MID_BOUNDS) {
        errors.push(range_error("midfielders", MID_BOUNDS, counts.mid));
    }
    if !within(counts.fwd, FWD_BOUNDS) {
        errors.push(range_error("forwards", FWD_BOUNDS, counts.fwd));
    }

    let is_valid = errors.is_empty();
    let formation = if is_valid {
        format!("{}-{}-{}", counts.def, counts.mid, counts.fwd)
    } else {
        INVALID_FORMATION.to_string()
    };

    FormationReport {
        is_valid,
        errors,
        formation,
        counts,
    }
}

fn within(n: usize, bounds: Bounds) -> bool {
    n >= bounds.min && n <= bounds.max
}

fn range_error(label: &str, bounds: Bounds, n: usize) -> String {
    format!(
        "Must have {}-{} {} (currently {})",
        bounds.min, bounds.max, label, n
    )
}

/// Bench room per position: squad totals minus starters, floored at zero.
pub fn available_bench_slots(starting: &[Position]) -> FormationCounts {
    let starting = FormationCounts::count(starting);
    FormationCounts {
        gkp: SQUAD_TOTALS.gkp.saturating_sub(starting.gkp),
        def: SQUAD_TOTALS.def.saturating_sub(starting.def),
        mid: SQUAD_TOTALS.mid.saturating_sub(starting.mid),
        fwd: SQUAD_TOTALS.fwd.saturating_sub(starting.fwd),
    }
}

/// Whether a player of `position` fits on the bench given the current starters and bench.
pub fn can_add_to_bench(starting: &[Position], bench: &[Position], position: Position) -> bool {
    let slots = available_bench_slots(starting);
    let used = FormationCounts::count(bench);
    used.get(position) < slots.get(position)
}

/// Goalkeepers swap only with goalkeepers; outfield positions swap freely among themselves.
pub fn can_substitute_positions(out: Position, incoming: Position) -> bool {
    out.is_goalkeeper() == incoming.is_goalkeeper()
}

/// Formation of `current` after replacing the player at `out_index` with `incoming`.
///
/// An out-of-range index leaves `current` unchanged.
pub fn validate_substitution(
    current: &[Position],
    out_index: usize,
    incoming: Position,
) -> FormationReport {
    let mut swapped = current.to_vec();
    if let Some(slot) = swapped.get_mut(out_index) {
        *slot = incoming;
    }
    validate_formation(&swapped)
}

/// Every legal formation label, sorted.
pub fn valid_formations() -> Vec<String> {
    let outfield = STARTING_TOTAL - GKP_BOUNDS.min;
    let mut formations = Vec::new();
    for def in DEF_BOUNDS.min..=DEF_BOUNDS.max {
        for mid in MID_BOUNDS.min..=MID_BOUNDS.max {
            for fwd in FWD_BOUNDS.min..=FWD_BOUNDS.max {
                if def + mid + fwd == outfield {
                    formations.push(format!("{}-{}-{}", def, mid, fwd));
                }
            }
        }
    }
    formations.sort();
    formations
}

/// Corrective hints for a broken formation, one per position out of bounds.
pub fn suggest_formation_fix(counts: &FormationCounts) -> Vec<String> {
    let mut suggestions = Vec::new();
    if counts.gkp != GKP_BOUNDS.min {
        suggestions.push("Need exactly 1 goalkeeper".to_string());
    }
    for (n, bounds, label) in [
        (counts.def, DEF_BOUNDS, "defender(s)"),
        (counts.mid, MID_BOUNDS, "midfielder(s)"),
        (counts.fwd, FWD_BOUNDS, "forward(s)"),
    ] {
        if n < bounds.min {
            suggestions.push(format!("Need {} more {}", bounds.min - n, label));
        } else if n > bounds.max {
            suggestions.push(format!("Remove {} {}", n - bounds.max, label));
        }
    }
    suggestions
}
