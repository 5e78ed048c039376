//! Integration tests for current-round resolution.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fpl_team_web::logic::{current_round_status, is_fixture_complete, DEFAULT_ROUND};
use fpl_team_web::{
    analyze_round, resolve_current_round, resolve_current_round_with, CompletionPolicy, Fixture,
    Round,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 20, 18, 0, 0).unwrap()
}

fn round(id: u32) -> Round {
    Round::new(id, now() - Duration::days(7 * (10 - id as i64)))
}

/// A fixture that kicks off in the future relative to `now()`.
fn upcoming(id: u32, round_id: u32) -> Fixture {
    Fixture::new(id, round_id, Some(now() + Duration::hours(1)), 1, 2)
}

#[test]
fn empty_schedule_returns_round_one() {
    assert_eq!(resolve_current_round(&[], &[], now()), DEFAULT_ROUND);
    assert_eq!(resolve_current_round(&[], &[upcoming(1, 4)], now()), 1);
}

#[test]
fn first_incomplete_round_is_current() {
    let rounds = vec![round(1), round(2), round(3)];
    let fixtures = vec![
        upcoming(1, 1).finished(),
        upcoming(2, 2).with_status("FT"),
        upcoming(3, 2),
        upcoming(4, 3),
    ];
    assert_eq!(resolve_current_round(&rounds, &fixtures, now()), 2);
}

#[test]
fn rounds_are_walked_in_id_order() {
    let rounds = vec![round(3), round(1), round(2)];
    let fixtures = vec![upcoming(1, 1).finished(), upcoming(2, 2), upcoming(3, 3)];
    assert_eq!(resolve_current_round(&rounds, &fixtures, now()), 2);
}

#[test]
fn all_complete_returns_last_round() {
    let rounds = vec![round(1).finished(), round(2).finished()];
    assert_eq!(resolve_current_round(&rounds, &[], now()), 2);
}

#[test]
fn round_without_fixtures_follows_its_flag() {
    let rounds = vec![round(1).finished(), round(2), round(3)];
    assert_eq!(resolve_current_round(&rounds, &[], now()), 2);
}

#[test]
fn final_status_codes_complete_a_fixture() {
    let policy = CompletionPolicy::default();
    for status in ["FT", "AET", "PEN", "AWARDED"] {
        let f = upcoming(1, 1).with_status(status);
        assert!(is_fixture_complete(&f, false, now(), &policy), "{status}");
    }
    let live = upcoming(1, 1).with_status("1H");
    assert!(!is_fixture_complete(&live, false, now(), &policy));
}

#[test]
fn postponed_counts_only_once_round_is_finished() {
    let policy = CompletionPolicy::default();
    let f = upcoming(1, 1).with_status("POSTPONED");
    assert!(!is_fixture_complete(&f, false, now(), &policy));
    assert!(is_fixture_complete(&f, true, now(), &policy));
}

#[test]
fn stale_kickoff_completes_round_despite_feed_lag() {
    let rounds = vec![round(1), round(2)];
    let fixtures = vec![
        Fixture::new(1, 1, Some(now() - Duration::hours(3)), 1, 2),
        Fixture::new(2, 1, Some(now() - Duration::minutes(150)), 3, 4),
        upcoming(3, 2),
    ];
    assert_eq!(resolve_current_round(&rounds, &fixtures, now()), 2);

    // A wider grace window keeps round 1 live.
    let strict = CompletionPolicy::from_minutes(240);
    assert_eq!(resolve_current_round_with(&strict, &rounds, &fixtures, now()), 1);
}

#[test]
fn finished_flag_overrides_incomplete_fixtures() {
    let r = round(1).finished();
    let fixtures = vec![upcoming(1, 1), upcoming(2, 1).finished()];
    let status = analyze_round(&r, &fixtures, now(), &CompletionPolicy::default());
    assert!(status.is_complete);
    assert_eq!(status.completed_count, 1);
    assert_eq!(status.total_count, 2);
    assert_eq!(status.match_progress(), "1/2 played");
}

#[test]
fn status_reports_only_the_rounds_own_fixtures() {
    let r = round(2);
    let fixtures = vec![upcoming(1, 1), upcoming(2, 2), upcoming(3, 2).finished()];
    let status = analyze_round(&r, &fixtures, now(), &CompletionPolicy::default());
    assert_eq!(status.round_id, 2);
    assert_eq!(status.total_count, 2);
    assert!(!status.is_complete);
}

#[test]
fn current_status_matches_resolved_round() {
    let rounds = vec![round(1), round(2)];
    let fixtures = vec![upcoming(1, 1).finished(), upcoming(2, 2)];
    let policy = CompletionPolicy::default();
    let status = current_round_status(&policy, &rounds, &fixtures, now()).unwrap();
    assert_eq!(status.round_id, resolve_current_round(&rounds, &fixtures, now()));
    assert!(current_round_status(&policy, &[], &fixtures, now()).is_none());
}
