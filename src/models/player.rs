//! Player and Position data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream feed identifier for a player.
pub type PlayerId = u32;

/// Registered playing position.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GKP")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Short code used by the feed and the UI ("GKP", "DEF", ...).
    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        self == Position::Goalkeeper
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn default_multiplier() -> u8 {
    1
}

/// A squad member together with its play-time data for one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub position: Position,
    /// Minutes played in the round; zero means "did not play".
    #[serde(default)]
    pub minutes_played: u32,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
    /// Multiplier already assigned by the feed (1 normal, 2 captain, 0 bench).
    #[serde(default = "default_multiplier")]
    pub multiplier: u8,
}

impl Player {
    /// Create a player with no minutes or points yet.
    pub fn new(id: PlayerId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            minutes_played: 0,
            total_points: 0,
            is_captain: false,
            is_vice_captain: false,
            multiplier: default_multiplier(),
        }
    }

    /// Set play-time data for the round.
    pub fn with_minutes(mut self, minutes_played: u32, total_points: i32) -> Self {
        self.minutes_played = minutes_played;
        self.total_points = total_points;
        self
    }

    pub fn captain(mut self) -> Self {
        self.is_captain = true;
        self
    }

    pub fn vice_captain(mut self) -> Self {
        self.is_vice_captain = true;
        self
    }

    /// A player "played" once they have at least one minute.
    pub fn played(&self) -> bool {
        self.minutes_played > 0
    }
}
