use std::collections::BTreeMap;

use crate::models::{LeaderboardEntry, WeekPick};
use crate::services::margin_scorer::score_pick;
use crate::utils::{competition_ranks, tie_counts};

struct Tally {
    pigeon_name: String,
    score: i64,
}

/// Build weekly leaderboards from picks.
///
/// Only games that have kicked off and carry scores count toward a pigeon's total,
/// so a week with nothing started yields no entries. Each week is ranked on its own.
/// Tied pigeons share a rank and split the positions they occupy evenly into points,
/// e.g. two pigeons tied at rank 2 take 2.5 points each.
pub fn build_leaderboard(picks: &[WeekPick]) -> Vec<LeaderboardEntry> {
    let mut weeks: BTreeMap<u32, BTreeMap<u32, Tally>> = BTreeMap::new();

    for pick in picks {
        let Some(score) = score_pick(pick) else {
            continue;
        };
        let tally = weeks
            .entry(pick.week_number)
            .or_default()
            .entry(pick.pigeon_number)
            .or_insert_with(|| Tally {
                pigeon_name: pick.pigeon_name.clone(),
                score: 0,
            });
        tally.score += i64::from(score);
    }

    let mut entries = Vec::new();
    for (week_number, tallies) in weeks {
        let mut ordered: Vec<(u32, Tally)> = tallies.into_iter().collect();
        // stable sort keeps pigeon order within equal scores
        ordered.sort_by_key(|(_, tally)| tally.score);

        let ranks = competition_ranks(&ordered, |(_, tally)| tally.score);
        let ties = tie_counts(ranks.iter().copied());
        tracing::debug!("Built leaderboard for week {} ({} entries)", week_number, ordered.len());

        for ((pigeon_number, tally), rank) in ordered.into_iter().zip(ranks) {
            let tied = ties.get(&rank).copied().unwrap_or(1);
            entries.push(LeaderboardEntry {
                pigeon_number,
                pigeon_name: tally.pigeon_name,
                week_number,
                rank,
                score: tally.score,
                points: position_points(rank, tied),
            });
        }
    }

    entries
}

/// Mean of the positions `[rank, rank + tied)`.
pub fn position_points(rank: u32, tied: u32) -> f64 {
    f64::from(rank) + f64::from(tied.saturating_sub(1)) / 2.0
}
