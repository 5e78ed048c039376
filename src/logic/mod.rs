//! Scoring logic: current-round resolution, formation rules, automatic substitutions,
//! season points.

mod formation;
mod gameweek;
mod season;
mod substitutions;

pub use formation::{
    available_bench_slots, can_add_to_bench, can_substitute_positions, suggest_formation_fix,
    valid_formations, validate_formation, validate_substitution, FormationCounts, FormationReport,
    INVALID_FORMATION, SQUAD_TOTALS, STARTING_TOTAL,
};
pub use gameweek::{
    analyze_round, current_round_status, format_deadline, is_fixture_complete,
    resolve_current_round, resolve_current_round_with, round_fixtures, CompletionPolicy,
    DateRange, RoundStatus, DEFAULT_KICKOFF_GRACE_MINUTES, DEFAULT_ROUND,
};
pub use season::{
    compute_season_points, score_gameweek, transfer_hits, GameweekBreakdown, SeasonPoints,
};
pub use substitutions::{
    calculate_gameweek_points, process_automatic_substitutions, simulate_gameweek,
    GameweekPoints, GameweekView, SubstitutionOutcome,
};
