//! Per-round manager input for season scoring: chips, transfers, join point.

use crate::models::fixture::RoundId;
use crate::models::player::{Player, PlayerId};
use crate::models::team::LineupError;
use serde::{Deserialize, Serialize};

/// Free transfers a manager gets when nothing else is said.
pub const DEFAULT_FREE_TRANSFERS: u32 = 1;

/// Points deducted per transfer beyond the free ones.
pub const DEFAULT_HIT_COST: i32 = 4;

/// Chips played in a round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chips {
    /// Bench players score too; no automatic substitutions.
    pub bench_boost: bool,
    /// Armband holder scores 3x instead of 2x.
    pub triple_captain: bool,
    pub free_hit: bool,
    pub wildcard: bool,
}

impl Chips {
    /// Multiplier for whoever ends up holding the armband.
    pub fn captain_multiplier(&self) -> i32 {
        if self.triple_captain {
            3
        } else {
            2
        }
    }
}

/// One transfer made before the round deadline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub player_in: PlayerId,
    pub player_out: PlayerId,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transfers {
    pub made: Vec<Transfer>,
    pub free_transfers_available: u32,
    pub hits_per_extra_transfer: i32,
}

impl Default for Transfers {
    fn default() -> Self {
        Self {
            made: Vec::new(),
            free_transfers_available: DEFAULT_FREE_TRANSFERS,
            hits_per_extra_transfer: DEFAULT_HIT_COST,
        }
    }
}

impl Transfers {
    /// Transfers beyond the free allowance.
    pub fn extra_transfers(&self) -> u32 {
        u32::try_from(self.made.len())
            .unwrap_or(u32::MAX)
            .saturating_sub(self.free_transfers_available)
    }
}

/// When a manager started playing, and what they scored elsewhere before that.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Rounds before this one are not scored here.
    pub first_active_round: RoundId,
    /// Points the manager reports for the rounds before `first_active_round`.
    pub points_before_first_active_round: i32,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            first_active_round: 1,
            points_before_first_active_round: 0,
        }
    }
}

/// A manager's squad for one round, with its play data and chip/transfer choices.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameweekEntry {
    pub round_id: RoundId,
    pub starting: Vec<Player>,
    pub bench: Vec<Player>,
    #[serde(default)]
    pub chips: Chips,
    #[serde(default)]
    pub transfers: Transfers,
}

/// Errors raised while scoring a season.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SeasonError {
    /// The squad submitted for a round breaks the lineup rules.
    InvalidLineup { round_id: RoundId, source: LineupError },
    /// Two entries were submitted for the same round.
    DuplicateRound(RoundId),
}

impl std::fmt::Display for SeasonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeasonError::InvalidLineup { round_id, source } => {
                write!(f, "Gameweek {}: {}", round_id, source)
            }
            SeasonError::DuplicateRound(round_id) => {
                write!(f, "Gameweek {} was submitted more than once", round_id)
            }
        }
    }
}

impl std::error::Error for SeasonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeasonError::InvalidLineup { source, .. } => Some(source),
            SeasonError::DuplicateRound(_) => None,
        }
    }
}
