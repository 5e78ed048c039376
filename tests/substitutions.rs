//! Integration tests for automatic substitutions and captaincy.

use fpl_team_web::{
    process_automatic_substitutions, validate_formation, Player, Position, SubstitutionReason,
};
use Position::*;

fn player(id: u32, position: Position, minutes: u32, points: i32) -> Player {
    Player::new(id, format!("Player {id}"), position).with_minutes(minutes, points)
}

/// 4-4-2 where everyone played: ids 1 (GKP), 2-5 (DEF), 6-9 (MID), 10-11 (FWD).
fn four_four_two() -> Vec<Player> {
    let mut xi = vec![player(1, Goalkeeper, 90, 3)];
    xi.extend((2..=5).map(|id| player(id, Defender, 90, 2)));
    xi.extend((6..=9).map(|id| player(id, Midfielder, 90, 2)));
    xi.extend((10..=11).map(|id| player(id, Forward, 90, 2)));
    xi
}

/// 3-5-2 where everyone played: ids 1 (GKP), 2-4 (DEF), 5-9 (MID), 10-11 (FWD).
fn three_five_two() -> Vec<Player> {
    let mut xi = vec![player(1, Goalkeeper, 90, 3)];
    xi.extend((2..=4).map(|id| player(id, Defender, 90, 2)));
    xi.extend((5..=9).map(|id| player(id, Midfielder, 90, 2)));
    xi.extend((10..=11).map(|id| player(id, Forward, 90, 2)));
    xi
}

fn did_not_play(xi: &mut [Player], id: u32) {
    let p = xi.iter_mut().find(|p| p.id == id).unwrap();
    p.minutes_played = 0;
    p.total_points = 0;
}

fn positions(team: &[Player]) -> Vec<Position> {
    team.iter().map(|p| p.position).collect()
}

#[test]
fn full_attendance_needs_no_substitutions() {
    let xi = four_four_two();
    let bench = vec![
        player(12, Goalkeeper, 90, 1),
        player(13, Defender, 90, 1),
        player(14, Midfielder, 90, 1),
        player(15, Forward, 90, 1),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    assert!(outcome.substitutions.is_empty());
    assert_eq!(outcome.final_team, xi);
}

#[test]
fn first_valid_bench_player_comes_in_regardless_of_position() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 3);
    let bench = vec![
        player(12, Midfielder, 60, 4),
        player(13, Defender, 90, 6),
        player(14, Forward, 0, 0),
        player(15, Goalkeeper, 0, 0),
    ];

    let outcome = process_automatic_substitutions(&xi, &bench);
    assert_eq!(outcome.substitutions.len(), 1);
    let sub = &outcome.substitutions[0];
    assert_eq!(sub.player_out.id, 3);
    assert_eq!(sub.player_in.id, 12);
    assert_eq!(sub.reason, SubstitutionReason::DidNotPlay);

    let report = validate_formation(&positions(&outcome.final_team));
    assert!(report.is_valid);
    assert_eq!(report.formation, "3-5-2");
}

#[test]
fn substitute_takes_the_vacated_slot() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 7);
    let bench = vec![
        player(12, Goalkeeper, 90, 1),
        player(13, Forward, 45, 2),
        player(14, Defender, 0, 0),
        player(15, Midfielder, 0, 0),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    assert_eq!(outcome.final_team.len(), 11);
    assert_eq!(outcome.final_team[6].id, 13);
    assert_eq!(outcome.final_team[5].id, 6);
}

#[test]
fn candidates_that_break_the_formation_are_skipped() {
    let mut xi = three_five_two();
    did_not_play(&mut xi, 2);
    let bench = vec![
        player(12, Midfielder, 90, 5),
        player(13, Forward, 90, 5),
        player(14, Defender, 30, 1),
        player(15, Goalkeeper, 90, 1),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    assert_eq!(outcome.substitutions.len(), 1);
    assert_eq!(outcome.substitutions[0].player_in.id, 14);
    assert!(validate_formation(&positions(&outcome.final_team)).is_valid);
}

#[test]
fn slot_stays_empty_when_no_candidate_keeps_formation_valid() {
    let mut xi = three_five_two();
    did_not_play(&mut xi, 2);
    let bench = vec![
        player(12, Midfielder, 90, 5),
        player(13, Forward, 90, 5),
        player(14, Defender, 0, 0),
        player(15, Goalkeeper, 90, 1),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    assert!(outcome.substitutions.is_empty());
    assert_eq!(outcome.final_team, xi);
}

#[test]
fn goalkeeper_is_only_replaced_by_goalkeeper() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 1);
    let bench = vec![
        player(12, Defender, 90, 2),
        player(13, Midfielder, 90, 2),
        player(14, Forward, 90, 2),
        player(15, Goalkeeper, 0, 0),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    assert!(outcome.substitutions.is_empty());
    assert_eq!(outcome.final_team[0].id, 1);
}

#[test]
fn reserve_goalkeeper_listed_first_is_still_used_for_keeper_swap() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 1);
    did_not_play(&mut xi, 10);
    let bench = vec![
        player(15, Goalkeeper, 90, 7),
        player(12, Forward, 90, 2),
        player(13, Midfielder, 90, 2),
        player(14, Defender, 90, 2),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    let swaps: Vec<(u32, u32)> = outcome
        .substitutions
        .iter()
        .map(|s| (s.player_out.id, s.player_in.id))
        .collect();
    assert_eq!(swaps, vec![(1, 15), (10, 12)]);
}

#[test]
fn each_bench_player_is_used_once_in_starter_order() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 4);
    did_not_play(&mut xi, 8);
    did_not_play(&mut xi, 11);
    let bench = vec![
        player(12, Goalkeeper, 0, 0),
        player(13, Defender, 90, 1),
        player(14, Midfielder, 0, 0),
        player(15, Midfielder, 70, 3),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    let swaps: Vec<(u32, u32)> = outcome
        .substitutions
        .iter()
        .map(|s| (s.player_out.id, s.player_in.id))
        .collect();
    assert_eq!(swaps, vec![(4, 13), (8, 15)]);
    // Forward 11 stays in with zero minutes.
    assert!(outcome.final_team.iter().any(|p| p.id == 11 && !p.played()));
}

#[test]
fn later_substitutions_see_the_updated_team() {
    // 3-5-2 with DEF 2 and MID 5 out. DEF 12 fills the first slot, after which
    // a forward may take the midfield slot (3-5-2 -> 3-4-3).
    let mut xi = three_five_two();
    did_not_play(&mut xi, 2);
    did_not_play(&mut xi, 5);
    let bench = vec![
        player(12, Defender, 90, 1),
        player(13, Forward, 90, 1),
        player(14, Defender, 90, 1),
        player(15, Goalkeeper, 0, 0),
    ];
    let outcome = process_automatic_substitutions(&xi, &bench);
    let swaps: Vec<(u32, u32)> = outcome
        .substitutions
        .iter()
        .map(|s| (s.player_out.id, s.player_in.id))
        .collect();
    assert_eq!(swaps, vec![(2, 12), (5, 13)]);
    assert_eq!(
        validate_formation(&positions(&outcome.final_team)).formation,
        "3-4-3"
    );
}

#[test]
fn empty_bench_leaves_team_untouched() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 6);
    let outcome = process_automatic_substitutions(&xi, &[]);
    assert!(outcome.substitutions.is_empty());
    assert_eq!(outcome.final_team, xi);
}

#[test]
fn captain_who_played_scores_double() {
    let mut xi = four_four_two();
    xi[9] = player(10, Forward, 90, 9).captain();
    xi[10] = player(11, Forward, 90, 4).vice_captain();
    let outcome = process_automatic_substitutions(&xi, &[]);
    assert_eq!(outcome.captain_points, 18);
    assert!(!outcome.vice_captain_used);
}

#[test]
fn vice_captain_steps_in_for_absent_captain() {
    let mut xi = four_four_two();
    xi[9] = player(10, Forward, 0, 0).captain();
    xi[10] = player(11, Forward, 40, 6).vice_captain();
    let outcome = process_automatic_substitutions(&xi, &[]);
    assert_eq!(outcome.captain_points, 12);
    assert!(outcome.vice_captain_used);
}

#[test]
fn no_bonus_when_neither_armband_holder_played() {
    let mut xi = four_four_two();
    xi[9] = player(10, Forward, 0, 0).captain();
    xi[10] = player(11, Forward, 0, 0).vice_captain();
    let bench = vec![player(12, Forward, 90, 8), player(13, Goalkeeper, 0, 0)];
    let outcome = process_automatic_substitutions(&xi, &bench);
    assert_eq!(outcome.captain_points, 0);
    assert!(!outcome.vice_captain_used);
    // The bench forward still replaces the captain.
    assert_eq!(outcome.substitutions[0].player_out.id, 10);
}

#[test]
fn repeated_calls_give_identical_results() {
    let mut xi = four_four_two();
    did_not_play(&mut xi, 1);
    did_not_play(&mut xi, 3);
    xi[9].is_captain = true;
    let bench = vec![
        player(12, Midfielder, 90, 4),
        player(13, Defender, 90, 6),
        player(14, Forward, 0, 0),
        player(15, Goalkeeper, 90, 2),
    ];
    let first = process_automatic_substitutions(&xi, &bench);
    let second = process_automatic_substitutions(&xi, &bench);
    assert_eq!(first, second);
}
