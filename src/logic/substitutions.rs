//! Automatic substitutions and captaincy resolution after a round concludes.

use crate::logic::formation::validate_formation;
use crate::models::{Lineup, Player, Position, Substitution, SubstitutionReason};
use serde::{Deserialize, Serialize};

/// Post-match effective lineup and captaincy outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionOutcome {
    /// Starting XI after substitutions, slots kept in submitted selection order.
    pub final_team: Vec<Player>,
    pub substitutions: Vec<Substitution>,
    /// Doubled points of the captain, or of the vice-captain if the captain did not play.
    pub captain_points: i32,
    pub vice_captain_used: bool,
}

/// Replace non-playing starters with bench players who played.
///
/// Starters are handled in selection order. A goalkeeper is only replaced by the bench
/// goalkeeper. An outfield starter takes the first outfield bench player (in bench order)
/// whose entry keeps the current team a valid formation. Each bench player is used at most
/// once; a slot with no valid candidate stays as it is and scores nothing. Never fails.
pub fn process_automatic_substitutions(starting: &[Player], bench: &[Player]) -> SubstitutionOutcome {
    let mut team: Vec<Player> = starting.to_vec();
    let mut substitutions = Vec::new();

    // Stable sort: the reserve goalkeeper goes last, outfield priority is kept.
    let mut ordered_bench: Vec<&Player> = bench.iter().collect();
    ordered_bench.sort_by_key(|p| p.position.is_goalkeeper());
    let mut available: Vec<&Player> = ordered_bench.into_iter().filter(|p| p.played()).collect();

    let non_playing: Vec<usize> = (0..team.len()).filter(|&i| !team[i].played()).collect();

    for slot in non_playing {
        let Some(pick) = find_substitute(&team, slot, &available) else {
            continue;
        };
        let incoming = available.remove(pick).clone();
        log::debug!(
            "Auto-sub: {} {} (0 mins) replaced by {} {}",
            team[slot].position,
            team[slot].id,
            incoming.position,
            incoming.id
        );
        let outgoing = std::mem::replace(&mut team[slot], incoming.clone());
        substitutions.push(Substitution {
            player_out: outgoing,
            player_in: incoming,
            reason: SubstitutionReason::DidNotPlay,
        });
    }

    let (captain_points, vice_captain_used) = resolve_captaincy(&team);

    SubstitutionOutcome {
        final_team: team,
        substitutions,
        captain_points,
        vice_captain_used,
    }
}

/// Index into `available` of the bench player who should fill `team[slot]`.
fn find_substitute(team: &[Player], slot: usize, available: &[&Player]) -> Option<usize> {
    if team[slot].position.is_goalkeeper() {
        return available.iter().position(|p| p.position.is_goalkeeper());
    }

    let mut positions: Vec<Position> = team.iter().map(|p| p.position).collect();
    available.iter().position(|candidate| {
        if candidate.position.is_goalkeeper() {
            return false;
        }
        positions[slot] = candidate.position;
        validate_formation(&positions).is_valid
    })
}

/// Who scores the armband multiplier: the captain if he played, else the vice-captain if he
/// played. The flag is true when the vice-captain stepped in.
pub(crate) fn armband_holder(team: &[Player]) -> Option<(&Player, bool)> {
    let captain = team.iter().find(|p| p.is_captain);
    let vice_captain = team.iter().find(|p| p.is_vice_captain);

    match (captain, vice_captain) {
        (Some(c), _) if c.played() => Some((c, false)),
        (_, Some(v)) if v.played() => Some((v, true)),
        _ => None,
    }
}

/// Captain bonus: (points, vice-captain used).
fn resolve_captaincy(team: &[Player]) -> (i32, bool) {
    match armband_holder(team) {
        Some((holder, vice_captain_used)) => {
            (holder.total_points.saturating_mul(2), vice_captain_used)
        }
        None => (0, false),
    }
}

/// Points of the players who played. Saturates instead of overflowing.
pub(crate) fn played_points<'a>(players: impl IntoIterator<Item = &'a Player>) -> i32 {
    players
        .into_iter()
        .filter(|p| p.played())
        .fold(0i32, |acc, p| acc.saturating_add(p.total_points))
}

/// Points for a round after substitutions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameweekPoints {
    pub total_points: i32,
    /// Points of final-team players who played, excluding the armband holder's base points.
    pub player_points: i32,
    /// Same as `captain_points` on the outcome: the armband holder's points, doubled.
    pub captain_bonus: i32,
    /// Unused substitutes never score.
    pub bench_points: i32,
    pub outcome: SubstitutionOutcome,
}

/// Run substitutions and total the round's points.
pub fn calculate_gameweek_points(starting: &[Player], bench: &[Player]) -> GameweekPoints {
    let outcome = process_automatic_substitutions(starting, bench);

    let armband_base = armband_holder(&outcome.final_team)
        .map(|(holder, _)| holder.total_points)
        .unwrap_or(0);

    let player_points = played_points(&outcome.final_team).saturating_sub(armband_base);
    GameweekPoints {
        total_points: player_points.saturating_add(outcome.captain_points),
        player_points,
        captain_bonus: outcome.captain_points,
        bench_points: 0,
        outcome,
    }
}

/// What to show for a lineup: substitutions only appear once the round is finished.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameweekView {
    pub display_team: Vec<Player>,
    pub substitutions: Vec<Substitution>,
    pub total_points: i32,
    pub show_substitutions: bool,
}

pub fn simulate_gameweek(starting: &[Player], bench: &[Player], round_finished: bool) -> GameweekView {
    if !round_finished {
        return GameweekView {
            display_team: starting.to_vec(),
            substitutions: Vec::new(),
            total_points: 0,
            show_substitutions: false,
        };
    }

    let points = calculate_gameweek_points(starting, bench);
    GameweekView {
        display_team: points.outcome.final_team,
        substitutions: points.outcome.substitutions,
        total_points: points.total_points,
        show_substitutions: true,
    }
}

impl Lineup {
    /// Apply automatic substitutions to this lineup.
    pub fn auto_substitute(&self) -> SubstitutionOutcome {
        process_automatic_substitutions(&self.starting, &self.bench)
    }

    pub fn points(&self) -> GameweekPoints {
        calculate_gameweek_points(&self.starting, &self.bench)
    }
}
