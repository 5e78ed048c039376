//! Season scoring: per-round breakdowns with chips, transfer hits, and a join offset.
//!
//! Each round goes through these steps:
//! 1. Validate the squad and total the submitted XI.
//! 2. Without Bench Boost, apply automatic substitutions. With it, the XI stays as submitted.
//! 3. Give the armband holder 2x (3x with Triple Captain), falling back to the vice-captain.
//! 4. With Bench Boost, add every bench player's points.
//! 5. Deduct transfer hits unless Free Hit or Wildcard is active.

use crate::logic::formation::validate_formation;
use crate::logic::substitutions::{armband_holder, played_points, process_automatic_substitutions};
use crate::models::{
    Chips, GameweekEntry, JoinConfig, Lineup, Player, PlayerId, RoundId, SeasonError, Substitution,
    Transfers,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How one round was scored, with a human-readable audit trail.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameweekBreakdown {
    pub round_id: RoundId,
    pub chips: Chips,
    /// "D-M-F" of the submitted XI.
    pub formation: String,
    /// Submitted XI before substitutions and multipliers.
    pub base_points: i32,
    pub substitutions: Vec<Substitution>,
    /// XI that scored: post-substitution, or as submitted under Bench Boost.
    pub effective_team: Vec<Player>,
    /// Player who received the multiplier, if anyone did.
    pub captain_id: Option<PlayerId>,
    /// 1 when neither armband holder played.
    pub captain_multiplier: i32,
    pub vice_captain_used: bool,
    /// Extra points from the multiplier: (multiplier - 1) x holder points.
    pub captain_bonus: i32,
    /// Effective XI plus `captain_bonus`.
    pub effective_points: i32,
    /// Zero unless Bench Boost is active.
    pub bench_points: i32,
    /// Zero or negative.
    pub transfer_hits: i32,
    pub points: i32,
    pub audit_log: Vec<String>,
}

/// Season total and the rounds it was built from, in round order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeasonPoints {
    pub by_round: Vec<GameweekBreakdown>,
    pub points_before_first_active_round: i32,
    pub total_points: i32,
}

/// Transfer deduction for a round and the audit line explaining it.
pub fn transfer_hits(chips: &Chips, transfers: &Transfers) -> (i32, String) {
    if chips.free_hit {
        return (0, "Free Hit chip active - no transfer hits applied".to_string());
    }
    if chips.wildcard {
        return (0, "Wildcard chip active - no transfer hits applied".to_string());
    }

    let made = transfers.made.len();
    let free = transfers.free_transfers_available;
    let extra = transfers.extra_transfers();
    if extra == 0 {
        return (
            0,
            format!("{} transfers made, {} free transfers available - no hits", made, free),
        );
    }
    let extra_i32 = i32::try_from(extra).unwrap_or(i32::MAX);
    let hits = extra_i32
        .saturating_mul(transfers.hits_per_extra_transfer)
        .saturating_neg();
    (
        hits,
        format!(
            "{} transfers made, {} free transfers available - {} extra transfers x {} points = {} points",
            made, free, extra, transfers.hits_per_extra_transfer, hits
        ),
    )
}

/// Score one round.
pub fn score_gameweek(entry: &GameweekEntry) -> Result<GameweekBreakdown, SeasonError> {
    let round_id = entry.round_id;
    let lineup = Lineup::new(entry.starting.clone(), entry.bench.clone())
        .map_err(|source| SeasonError::InvalidLineup { round_id, source })?;
    let chips = entry.chips;
    let mut audit_log = vec![format!("=== GAMEWEEK {} CALCULATION ===", round_id)];

    let formation = validate_formation(&lineup.starting_positions()).formation;
    audit_log.push(format!("Formation validated: {}", formation));

    let base_points = played_points(&lineup.starting);
    audit_log.push(format!(
        "Starting XI base points: {} (before subs/multipliers)",
        base_points
    ));

    let (effective_team, substitutions) = if chips.bench_boost {
        audit_log.push("Bench Boost active - no auto-substitutions applied".to_string());
        (lineup.starting.clone(), Vec::new())
    } else {
        audit_log.push("Checking for auto-substitutions...".to_string());
        let outcome = process_automatic_substitutions(&lineup.starting, &lineup.bench);
        let non_playing = lineup.starting.iter().filter(|p| !p.played()).count();
        if non_playing == 0 {
            audit_log.push("All starting XI players played - no substitutions needed".to_string());
        } else {
            audit_log.push(format!("{} starting players did not play", non_playing));
            for sub in &outcome.substitutions {
                audit_log.push(format!(
                    "Auto-sub: {} {} (0 mins) -> {} {} ({} mins, {} pts)",
                    sub.player_out.position,
                    sub.player_out.id,
                    sub.player_in.position,
                    sub.player_in.id,
                    sub.player_in.minutes_played,
                    sub.player_in.total_points
                ));
            }
            let unfilled = non_playing - outcome.substitutions.len();
            if unfilled > 0 {
                audit_log.push(format!("No valid substitute for {} player(s)", unfilled));
            }
        }
        (outcome.final_team, outcome.substitutions)
    };

    let multiplier = chips.captain_multiplier();
    let holder = armband_holder(&effective_team);
    let (captain_id, captain_multiplier, vice_captain_used, captain_bonus) = match holder {
        Some((player, vice_captain_used)) => {
            audit_log.push(if vice_captain_used {
                format!(
                    "Captain did not play - vice-captain {} ({} pts) promoted with {}x multiplier",
                    player.id, player.total_points, multiplier
                )
            } else {
                format!(
                    "Captain {} played ({} pts) - {}x multiplier applied",
                    player.id, player.total_points, multiplier
                )
            });
            let bonus = (multiplier - 1).saturating_mul(player.total_points);
            (Some(player.id), multiplier, vice_captain_used, bonus)
        }
        None => {
            let line = if lineup.starting.iter().any(|p| p.is_captain) {
                "Neither captain nor vice-captain played - no captain multiplier applied"
            } else {
                "No captain selected"
            };
            audit_log.push(line.to_string());
            (None, 1, false, 0)
        }
    };

    let xi_points = played_points(&effective_team);
    audit_log.push(format!("Effective XI points: {} (after substitutions)", xi_points));
    if captain_bonus != 0 {
        audit_log.push(format!(
            "Captain bonus: {} points ({}x multiplier)",
            captain_bonus, captain_multiplier
        ));
    }
    let effective_points = xi_points.saturating_add(captain_bonus);

    let bench_points = if chips.bench_boost {
        audit_log.push("Bench Boost active - counting all bench players:".to_string());
        for player in &lineup.bench {
            audit_log.push(format!("  Bench player {}: {} points", player.id, player.total_points));
        }
        let total = played_points(&lineup.bench);
        audit_log.push(format!("Total bench points: {}", total));
        total
    } else {
        0
    };

    let (hits, hits_line) = transfer_hits(&chips, &entry.transfers);
    audit_log.push(hits_line);

    let points = effective_points.saturating_add(bench_points).saturating_add(hits);
    audit_log.push(format!("=== GAMEWEEK {} TOTAL: {} points ===", round_id, points));
    audit_log.push(format!(
        "Breakdown: Effective XI ({}) + Bench Boost ({}) + Transfer Hits ({}) = {}",
        effective_points, bench_points, hits, points
    ));

    Ok(GameweekBreakdown {
        round_id,
        chips,
        formation,
        base_points,
        substitutions,
        effective_team,
        captain_id,
        captain_multiplier,
        vice_captain_used,
        captain_bonus,
        effective_points,
        bench_points,
        transfer_hits: hits,
        points,
        audit_log,
    })
}

/// Score every round from `join.first_active_round` on and add the reported earlier points.
///
/// Entries may arrive in any order; breakdowns come back sorted by round. Fails on the first
/// round whose squad is invalid, or when a round appears twice.
pub fn compute_season_points(
    entries: &[GameweekEntry],
    join: &JoinConfig,
) -> Result<SeasonPoints, SeasonError> {
    let mut ordered: Vec<&GameweekEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.round_id);

    let mut seen = HashSet::new();
    let mut by_round = Vec::new();
    let mut total_points = join.points_before_first_active_round;
    for entry in ordered {
        if !seen.insert(entry.round_id) {
            return Err(SeasonError::DuplicateRound(entry.round_id));
        }
        if entry.round_id < join.first_active_round {
            log::debug!(
                "Skipping gameweek {} (before first active gameweek {})",
                entry.round_id,
                join.first_active_round
            );
            continue;
        }
        let breakdown = score_gameweek(entry)?;
        total_points = total_points.saturating_add(breakdown.points);
        by_round.push(breakdown);
    }

    log::debug!(
        "Season total {} over {} gameweeks (offset {})",
        total_points,
        by_round.len(),
        join.points_before_first_active_round
    );
    Ok(SeasonPoints {
        by_round,
        points_before_first_active_round: join.points_before_first_active_round,
        total_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transfer;

    fn transfers(made: usize, free: u32) -> Transfers {
        Transfers {
            made: (0..made as u32)
                .map(|i| Transfer {
                    player_in: 100 + i,
                    player_out: 200 + i,
                })
                .collect(),
            free_transfers_available: free,
            ..Transfers::default()
        }
    }

    #[test]
    fn transfer_hit_lines() {
        let chips = Chips::default();
        assert_eq!(
            transfer_hits(&chips, &transfers(1, 1)),
            (0, "1 transfers made, 1 free transfers available - no hits".to_string())
        );
        assert_eq!(
            transfer_hits(&chips, &transfers(3, 1)),
            (
                -8,
                "3 transfers made, 1 free transfers available - 2 extra transfers x 4 points = -8 points"
                    .to_string()
            )
        );
    }

    #[test]
    fn free_hit_and_wildcard_waive_hits() {
        let free_hit = Chips {
            free_hit: true,
            ..Chips::default()
        };
        let wildcard = Chips {
            wildcard: true,
            ..Chips::default()
        };
        assert_eq!(transfer_hits(&free_hit, &transfers(5, 1)).0, 0);
        assert_eq!(transfer_hits(&wildcard, &transfers(5, 1)).0, 0);
    }
}
