//! Data structures: players, rounds and fixtures, lineups, season input, users.

mod fixture;
mod player;
mod season;
mod team;
mod user;

pub use fixture::{ClubId, Fixture, FixtureId, Round, RoundId, FINAL_STATUSES, POSTPONED_STATUS};
pub use player::{Player, PlayerId, Position};
pub use season::{
    Chips, GameweekEntry, JoinConfig, SeasonError, Transfer, Transfers, DEFAULT_FREE_TRANSFERS,
    DEFAULT_HIT_COST,
};
pub use team::{
    Lineup, LineupError, SavedPlayer, SavedTeam, Substitution, SubstitutionReason, BENCH_SIZE,
    STARTING_SIZE,
};
pub use user::{User, UserId};
