use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::models::{
    GameMeta, LeaderboardEntry, PickCell, ResultsRow, ScheduleSignal, WeekBoard, WeekPick, WeekState,
    WeekStatus, CONSENSUS_NAME, CONSENSUS_PIGEON_NUMBER,
};
use crate::services::margin_scorer::score_pick;
use crate::utils::{format_consensus_label, format_margin_label, with_score_suffix};

/// Shape one week's picks into per-pigeon rows, the distinct game list and the consensus row.
///
/// Leaderboard entries are matched by pigeon number; a pigeon without one keeps
/// `None` for points, rank and score. Inputs are only read.
pub fn aggregate_week(picks: &[WeekPick], leaderboard: &[LeaderboardEntry]) -> WeekBoard {
    let standings: BTreeMap<u32, &LeaderboardEntry> = leaderboard
        .iter()
        .map(|entry| (entry.pigeon_number, entry))
        .collect();

    let mut rows: BTreeMap<u32, ResultsRow> = BTreeMap::new();
    let mut games: Vec<GameMeta> = Vec::new();
    let mut seen_games: HashSet<u32> = HashSet::new();

    for pick in picks {
        if seen_games.insert(pick.game_id) {
            games.push(GameMeta {
                game_id: pick.game_id,
                home_abbr: pick.home_abbr.clone(),
                away_abbr: pick.away_abbr.clone(),
                kickoff_at: pick.kickoff_at,
                status: pick.status,
                home_score: pick.home_score,
                away_score: pick.away_score,
            });
        }

        let row = rows.entry(pick.pigeon_number).or_insert_with(|| {
            let standing = standings.get(&pick.pigeon_number);
            ResultsRow {
                pigeon_number: pick.pigeon_number,
                pigeon_name: pick.pigeon_name.clone(),
                picks: BTreeMap::new(),
                points: standing.map(|s| s.points),
                rank: standing.map(|s| s.rank),
                score: standing.map(|s| s.score),
            }
        });
        row.picks.insert(pick.game_id, pick_cell(pick));
    }

    let rows: Vec<ResultsRow> = rows.into_values().collect();
    let consensus = consensus_row(&rows, &games);

    tracing::debug!("Aggregated {} rows across {} games", rows.len(), games.len());

    WeekBoard {
        week_number: picks.first().map(|p| p.week_number),
        rows,
        games,
        consensus,
        state: None,
    }
}

/// Same as [`aggregate_week`], with the week's lifecycle phase resolved from the schedule signal.
pub fn build_week_board(
    week_number: u32,
    picks: &[WeekPick],
    leaderboard: &[LeaderboardEntry],
    signal: &ScheduleSignal,
) -> WeekBoard {
    let mut board = aggregate_week(picks, leaderboard);
    board.week_number = Some(week_number);
    board.state = Some(week_state(week_number, signal));
    board
}

fn pick_cell(pick: &WeekPick) -> PickCell {
    let score = score_pick(pick);
    let label = format_margin_label(pick.picked_abbr(), pick.predicted_margin);
    let label = match score {
        Some(score) => with_score_suffix(&label, score),
        None => label,
    };

    PickCell {
        signed: f64::from(pick.signed_margin()),
        label,
        home_abbr: pick.home_abbr.clone(),
        away_abbr: pick.away_abbr.clone(),
        score,
    }
}

/// Mean signed pick per game across real pigeons.
///
/// Missing picks and zero-margin picks are left out of the mean so that unfilled
/// rows (stored as home by 0) do not drag it toward zero. A game with nothing
/// left to average gets 0. Returns `None` when there are no rows.
pub fn consensus_row(rows: &[ResultsRow], games: &[GameMeta]) -> Option<ResultsRow> {
    if rows.is_empty() {
        return None;
    }

    let mut picks = BTreeMap::new();
    for game in games {
        let values: Vec<f64> = rows
            .iter()
            .filter(|row| !row.is_consensus())
            .filter_map(|row| row.picks.get(&game.game_id))
            .map(|cell| cell.signed)
            .filter(|signed| *signed != 0.0)
            .collect();

        let mean = if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };

        picks.insert(
            game.game_id,
            PickCell {
                signed: mean,
                label: format_consensus_label(&game.home_abbr, &game.away_abbr, mean),
                home_abbr: game.home_abbr.clone(),
                away_abbr: game.away_abbr.clone(),
                score: None,
            },
        );
    }

    Some(ResultsRow {
        pigeon_number: CONSENSUS_PIGEON_NUMBER,
        pigeon_name: CONSENSUS_NAME.to_string(),
        picks,
        points: None,
        rank: None,
        score: None,
    })
}

/// Lifecycle phase of `week_number`.
///
/// With a live week: earlier weeks are completed, the live week is in progress and later
/// weeks have not started. Without one, weeks before `next_picks_week - 1` are completed
/// and the rest have not started. With neither signal the state falls back to
/// not started and is flagged as defaulted.
pub fn week_state(week_number: u32, signal: &ScheduleSignal) -> WeekStatus {
    let (state, defaulted) = match (signal.live_week, signal.next_picks_week) {
        (Some(live), _) => {
            let state = match week_number.cmp(&live) {
                Ordering::Less => WeekState::Completed,
                Ordering::Equal => WeekState::InProgress,
                Ordering::Greater => WeekState::NotStarted,
            };
            (state, false)
        }
        (None, Some(next_picks)) => {
            // week < next_picks - 1, written to avoid underflow
            let state = if week_number + 1 < next_picks {
                WeekState::Completed
            } else {
                WeekState::NotStarted
            };
            (state, false)
        }
        (None, None) => {
            tracing::warn!(
                "No live week and no next picks week; treating week {} as not started",
                week_number
            );
            (WeekState::NotStarted, true)
        }
    };

    WeekStatus {
        week_number,
        state,
        defaulted,
    }
}
