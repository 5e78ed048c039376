//! Round (gameweek) and Fixture, as supplied by the upstream sports-data feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round identifier; rounds are ordered by increasing id.
pub type RoundId = u32;

/// Fixture identifier.
pub type FixtureId = u32;

/// Club identifier.
pub type ClubId = u32;

/// A scheduling period with a submission deadline.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub deadline: DateTime<Utc>,
    /// Set by the feed once the round is officially closed. Lags real results.
    #[serde(default)]
    pub finished: bool,
}

impl Round {
    pub fn new(id: RoundId, deadline: DateTime<Utc>) -> Self {
        Self {
            id,
            deadline,
            finished: false,
        }
    }

    pub fn finished(mut self) -> Self {
        self.finished = true;
        self
    }
}

/// Status codes the feed uses for a match that has a final result.
pub const FINAL_STATUSES: [&str; 4] = ["FT", "AET", "PEN", "AWARDED"];

/// Status code for a match that was not played on its scheduled date.
pub const POSTPONED_STATUS: &str = "POSTPONED";

/// One scheduled match between two clubs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    /// Owning round.
    pub round_id: RoundId,
    /// None while the feed has not scheduled a kickoff.
    #[serde(default)]
    pub kickoff_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub started: bool,
    /// Free-form status code ("FT", "AET", "PEN", "AWARDED", "POSTPONED", ...).
    #[serde(default)]
    pub status: String,
    pub home_team: ClubId,
    pub away_team: ClubId,
    #[serde(default)]
    pub home_score: Option<u32>,
    #[serde(default)]
    pub away_score: Option<u32>,
}

impl Fixture {
    pub fn new(
        id: FixtureId,
        round_id: RoundId,
        kickoff_time: Option<DateTime<Utc>>,
        home_team: ClubId,
        away_team: ClubId,
    ) -> Self {
        Self {
            id,
            round_id,
            kickoff_time,
            finished: false,
            started: false,
            status: String::new(),
            home_team,
            away_team,
            home_score: None,
            away_score: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn finished(mut self) -> Self {
        self.finished = true;
        self
    }

    /// Status code is one of [`FINAL_STATUSES`].
    pub fn has_final_status(&self) -> bool {
        FINAL_STATUSES.contains(&self.status.as_str())
    }

    pub fn is_postponed(&self) -> bool {
        self.status == POSTPONED_STATUS
    }
}
