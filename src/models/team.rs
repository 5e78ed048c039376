//! Lineups, substitution records, and saved teams.

use crate::logic::validate_formation;
use crate::models::player::{Player, PlayerId, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Players in the starting set.
pub const STARTING_SIZE: usize = 11;

/// Players on the bench (1 GKP + 3 outfield).
pub const BENCH_SIZE: usize = 4;

/// Errors raised when a submitted squad breaks the roster shape rules.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LineupError {
    /// Starting set is not exactly 11 players.
    WrongStartingSize(usize),
    /// Bench is not exactly 4 players.
    WrongBenchSize(usize),
    /// Bench must hold exactly one goalkeeper.
    InvalidBenchComposition { goalkeepers: usize },
    /// Starting set breaks formation bounds; carries the validator's messages.
    InvalidFormation(Vec<String>),
    /// The same player appears twice in the squad.
    DuplicatePlayer(PlayerId),
    /// More than one player carries the captain (or vice-captain) armband.
    MultipleCaptains,
    /// Captain or vice-captain is not in the starting set.
    CaptainNotStarting(PlayerId),
    /// Captain and vice-captain are the same player.
    CaptainIsViceCaptain(PlayerId),
}

impl std::fmt::Display for LineupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineupError::WrongStartingSize(n) => {
                write!(f, "Starting XI must have exactly {} players (has {})", STARTING_SIZE, n)
            }
            LineupError::WrongBenchSize(n) => {
                write!(f, "Bench must have exactly {} players (has {})", BENCH_SIZE, n)
            }
            LineupError::InvalidBenchComposition { goalkeepers } => write!(
                f,
                "Bench must have 1 goalkeeper and 3 outfield players (has {} goalkeepers)",
                goalkeepers
            ),
            LineupError::InvalidFormation(errors) => {
                write!(f, "Invalid formation: {}", errors.join("; "))
            }
            LineupError::DuplicatePlayer(id) => write!(f, "Player {} is selected twice", id),
            LineupError::MultipleCaptains => write!(f, "Only one captain and one vice-captain allowed"),
            LineupError::CaptainNotStarting(id) => {
                write!(f, "Player {} must be in the starting XI to wear the armband", id)
            }
            LineupError::CaptainIsViceCaptain(id) => {
                write!(f, "Player {} cannot be both captain and vice-captain", id)
            }
        }
    }
}

impl std::error::Error for LineupError {}

/// Check sizes, bench composition, formation, and duplicate ids.
fn check_squad_shape(
    starting: &[(PlayerId, Position)],
    bench: &[(PlayerId, Position)],
) -> Result<(), LineupError> {
    if starting.len() != STARTING_SIZE {
        return Err(LineupError::WrongStartingSize(starting.len()));
    }
    if bench.len() != BENCH_SIZE {
        return Err(LineupError::WrongBenchSize(bench.len()));
    }
    let goalkeepers = bench.iter().filter(|(_, pos)| pos.is_goalkeeper()).count();
    if goalkeepers != 1 {
        return Err(LineupError::InvalidBenchComposition { goalkeepers });
    }
    let positions: Vec<Position> = starting.iter().map(|(_, pos)| *pos).collect();
    let report = validate_formation(&positions);
    if !report.is_valid {
        return Err(LineupError::InvalidFormation(report.errors));
    }
    let mut seen = HashSet::new();
    for (id, _) in starting.iter().chain(bench.iter()) {
        if !seen.insert(*id) {
            return Err(LineupError::DuplicatePlayer(*id));
        }
    }
    Ok(())
}

/// Check that the armbands sit on two different starters.
fn check_captaincy(
    starting: &[(PlayerId, Position)],
    captain: Option<PlayerId>,
    vice_captain: Option<PlayerId>,
) -> Result<(), LineupError> {
    for id in captain.iter().chain(vice_captain.iter()) {
        if !starting.iter().any(|(p, _)| p == id) {
            return Err(LineupError::CaptainNotStarting(*id));
        }
    }
    match (captain, vice_captain) {
        (Some(c), Some(v)) if c == v => Err(LineupError::CaptainIsViceCaptain(c)),
        _ => Ok(()),
    }
}

/// A submitted squad: 11 starters in selection order and 4 bench players in priority order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub starting: Vec<Player>,
    pub bench: Vec<Player>,
}

impl Lineup {
    /// Build a lineup, enforcing the squad shape a manager may submit.
    pub fn new(starting: Vec<Player>, bench: Vec<Player>) -> Result<Self, LineupError> {
        let starting_keys: Vec<_> = starting.iter().map(|p| (p.id, p.position)).collect();
        let bench_keys: Vec<_> = bench.iter().map(|p| (p.id, p.position)).collect();
        check_squad_shape(&starting_keys, &bench_keys)?;

        let all = || starting.iter().chain(bench.iter());
        if all().filter(|p| p.is_captain).count() > 1
            || all().filter(|p| p.is_vice_captain).count() > 1
        {
            return Err(LineupError::MultipleCaptains);
        }
        let captain = all().find(|p| p.is_captain).map(|p| p.id);
        let vice_captain = all().find(|p| p.is_vice_captain).map(|p| p.id);
        check_captaincy(&starting_keys, captain, vice_captain)?;

        Ok(Self { starting, bench })
    }

    /// Positions of the starting set, in selection order.
    pub fn starting_positions(&self) -> Vec<Position> {
        self.starting.iter().map(|p| p.position).collect()
    }
}

/// Why a substitution was made.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionReason {
    /// The starter recorded zero minutes.
    DidNotPlay,
}

/// One automatic substitution: `player_out` left the effective lineup, `player_in` took the slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub player_out: Player,
    pub player_in: Player,
    pub reason: SubstitutionReason,
}

/// A squad member as persisted with a saved team (no play-time data).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Club short name, for display.
    #[serde(default)]
    pub team: String,
    /// UI pitch slot the player was dropped into.
    #[serde(default)]
    pub slot_id: String,
}

/// A manager's saved squad selection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SavedTeam {
    pub starting: Vec<SavedPlayer>,
    pub bench: Vec<SavedPlayer>,
    #[serde(default)]
    pub captain_id: Option<PlayerId>,
    #[serde(default)]
    pub vice_captain_id: Option<PlayerId>,
    /// Formation label, recomputed on validation.
    #[serde(default)]
    pub formation: String,
    pub saved_at: DateTime<Utc>,
}

impl SavedTeam {
    /// Validate the squad shape and armbands, and fill in the canonical formation label.
    pub fn validate(mut self) -> Result<Self, LineupError> {
        let starting: Vec<_> = self.starting.iter().map(|p| (p.id, p.position)).collect();
        let bench: Vec<_> = self.bench.iter().map(|p| (p.id, p.position)).collect();
        check_squad_shape(&starting, &bench)?;
        check_captaincy(&starting, self.captain_id, self.vice_captain_id)?;

        let positions: Vec<Position> = starting.iter().map(|(_, pos)| *pos).collect();
        self.formation = validate_formation(&positions).formation;
        Ok(self)
    }
}
