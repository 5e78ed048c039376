//! Current-round resolution using a fixtures-first completion policy.
//!
//! The feed's `finished` flags and status codes lag real results, so a fixture is also
//! treated as complete once its kickoff is older than the policy's grace window.

use crate::models::{Fixture, Round, RoundId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Round reported when the schedule is empty.
pub const DEFAULT_ROUND: RoundId = 1;

/// Default grace window after kickoff before a fixture counts as complete.
pub const DEFAULT_KICKOFF_GRACE_MINUTES: i64 = 120;

/// Tunables for deciding fixture completion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompletionPolicy {
    /// A fixture whose kickoff is more than this far before `now` is complete.
    pub kickoff_grace: Duration,
}

impl CompletionPolicy {
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            kickoff_grace: Duration::minutes(minutes),
        }
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_KICKOFF_GRACE_MINUTES)
    }
}

/// Earliest and latest kickoff of a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Completion verdict for one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub round_id: RoundId,
    pub is_complete: bool,
    pub completed_count: usize,
    pub total_count: usize,
    /// None when no fixture of the round has a kickoff time.
    pub date_range: Option<DateRange>,
}

impl RoundStatus {
    /// "No fixtures" or "{completed}/{total} played".
    pub fn match_progress(&self) -> String {
        if self.total_count == 0 {
            return "No fixtures".to_string();
        }
        format!("{}/{} played", self.completed_count, self.total_count)
    }

    /// "TBD", a single day ("Sat, Aug 16"), or "start - end".
    pub fn date_range_label(&self) -> String {
        let Some(range) = self.date_range else {
            return "TBD".to_string();
        };
        let start = range.start.format("%a, %b %-d").to_string();
        let end = range.end.format("%a, %b %-d").to_string();
        if start == end {
            start
        } else {
            format!("{} - {}", start, end)
        }
    }
}

/// Fixtures owned by `round_id`, in feed order.
pub fn round_fixtures(fixtures: &[Fixture], round_id: RoundId) -> Vec<&Fixture> {
    fixtures.iter().filter(|f| f.round_id == round_id).collect()
}

/// Whether one fixture counts as finished.
///
/// Complete if any of: the `finished` flag; a final status code; POSTPONED in a round the
/// feed has closed; or kickoff more than `policy.kickoff_grace` before `now`.
pub fn is_fixture_complete(
    fixture: &Fixture,
    round_finished: bool,
    now: DateTime<Utc>,
    policy: &CompletionPolicy,
) -> bool {
    if fixture.finished || fixture.has_final_status() {
        return true;
    }
    if fixture.is_postponed() && round_finished {
        return true;
    }
    match fixture.kickoff_time {
        Some(kickoff) if now - kickoff > policy.kickoff_grace => {
            log::debug!(
                "Time-based completion for fixture {} ({} vs {}), kickoff {} ({} minutes ago)",
                fixture.id,
                fixture.home_team,
                fixture.away_team,
                kickoff,
                (now - kickoff).num_minutes()
            );
            true
        }
        _ => false,
    }
}

fn round_status(
    round: &Round,
    fixtures: &[&Fixture],
    now: DateTime<Utc>,
    policy: &CompletionPolicy,
) -> RoundStatus {
    let total_count = fixtures.len();
    let completed_count = fixtures
        .iter()
        .filter(|f| is_fixture_complete(f, round.finished, now, policy))
        .count();

    // No fixtures: only the round flag can decide.
    let is_complete = if total_count == 0 {
        round.finished
    } else {
        completed_count == total_count || round.finished
    };

    let kickoffs = fixtures.iter().filter_map(|f| f.kickoff_time);
    let date_range = kickoffs
        .clone()
        .min()
        .zip(kickoffs.max())
        .map(|(start, end)| DateRange { start, end });

    RoundStatus {
        round_id: round.id,
        is_complete,
        completed_count,
        total_count,
        date_range,
    }
}

/// Completion status of `round`, given the whole fixture list.
pub fn analyze_round(
    round: &Round,
    fixtures: &[Fixture],
    now: DateTime<Utc>,
    policy: &CompletionPolicy,
) -> RoundStatus {
    round_status(round, &round_fixtures(fixtures, round.id), now, policy)
}

/// The current round under the default policy. See [`resolve_current_round_with`].
pub fn resolve_current_round(rounds: &[Round], fixtures: &[Fixture], now: DateTime<Utc>) -> RoundId {
    resolve_current_round_with(&CompletionPolicy::default(), rounds, fixtures, now)
}

/// The first incomplete round by ascending id; the last round if all are complete;
/// [`DEFAULT_ROUND`] if there are none.
pub fn resolve_current_round_with(
    policy: &CompletionPolicy,
    rounds: &[Round],
    fixtures: &[Fixture],
    now: DateTime<Utc>,
) -> RoundId {
    current_round_status(policy, rounds, fixtures, now)
        .map(|status| status.round_id)
        .unwrap_or(DEFAULT_ROUND)
}

/// Status of the round [`resolve_current_round_with`] picks, or None for an empty schedule.
pub fn current_round_status(
    policy: &CompletionPolicy,
    rounds: &[Round],
    fixtures: &[Fixture],
    now: DateTime<Utc>,
) -> Option<RoundStatus> {
    let mut ordered: Vec<&Round> = rounds.iter().collect();
    ordered.sort_by_key(|r| r.id);

    let mut by_round: HashMap<RoundId, Vec<&Fixture>> = HashMap::new();
    for fixture in fixtures {
        by_round.entry(fixture.round_id).or_default().push(fixture);
    }

    let mut last = None;
    for round in ordered {
        let owned = by_round.get(&round.id).map(Vec::as_slice).unwrap_or(&[]);
        let status = round_status(round, owned, now, policy);
        if !status.is_complete {
            return Some(status);
        }
        last = Some(status);
    }
    last
}

/// Countdown to a deadline: "Passed", "{d}d {h}h {m}m", "{h}h {m}m", or "{m}m".
pub fn format_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = deadline - now;
    if remaining <= Duration::zero() {
        return "Passed".to_string();
    }
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
