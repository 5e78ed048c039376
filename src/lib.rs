//! Fantasy football team manager: library with models, scoring logic, and the user store.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    analyze_round, available_bench_slots, calculate_gameweek_points, compute_season_points,
    process_automatic_substitutions, resolve_current_round, resolve_current_round_with,
    simulate_gameweek, validate_formation, CompletionPolicy, FormationCounts, FormationReport,
    GameweekBreakdown, GameweekPoints, GameweekView, RoundStatus, SeasonPoints, SubstitutionOutcome,
};
pub use models::{
    Chips, Fixture, GameweekEntry, JoinConfig, Lineup, LineupError, Player, PlayerId, Position, Round,
    RoundId, SavedPlayer, SavedTeam, SeasonError, Substitution, SubstitutionReason, Transfer,
    Transfers, User, UserId,
};
pub use store::{InMemoryUserRepository, StoreError, UserRepository};
