use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::models::{LeaderboardEntry, YtdRow, YtdWeek};
use crate::utils::{cents, competition_ranks, tie_counts};

pub const DEFAULT_PAYOUTS: [f64; 5] = [530.0, 270.0, 160.0, 100.0, 70.0];

/// Weekly prize amounts by finishing place, place 1 first. Places past the end pay nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutTable {
    amounts: Vec<f64>,
}

impl Default for PayoutTable {
    fn default() -> Self {
        Self::new(DEFAULT_PAYOUTS.to_vec())
    }
}

impl PayoutTable {
    pub fn new(amounts: Vec<f64>) -> Self {
        Self { amounts }
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Prize for a 1-based place.
    pub fn amount_for_place(&self, place: u32) -> f64 {
        if place == 0 {
            return 0.0;
        }
        self.amounts.get(place as usize - 1).copied().unwrap_or(0.0)
    }

    /// Share for each of `tied` pigeons at `rank`: they pool the prizes for
    /// places `rank..rank + tied` and split them evenly.
    pub fn split(&self, rank: u32, tied: u32) -> f64 {
        if tied == 0 {
            return 0.0;
        }
        let pooled: f64 = (rank..rank + tied).map(|place| self.amount_for_place(place)).sum();
        pooled / f64::from(tied)
    }
}

struct Accumulator {
    pigeon_name: String,
    by_week: BTreeMap<u32, YtdWeek>,
}

/// Season standings from weekly leaderboard entries.
///
/// Entries for `live_week` are left out since that week is not final. Each pigeon gets
/// point totals with the worst week dropped (only once two or more weeks are in),
/// a top-5 count and tie-split winnings, then two independent standard competition
/// rankings: by adjusted points (lower is better) and by winnings (higher is better).
///
/// Rows come back in points-rank order, pigeon number breaking ties. Pigeons with no
/// weeks left after filtering do not appear.
pub fn aggregate_ytd(
    entries: &[LeaderboardEntry],
    live_week: Option<u32>,
    payouts: &PayoutTable,
) -> Vec<YtdRow> {
    let counted: Vec<&LeaderboardEntry> = entries
        .iter()
        .filter(|entry| Some(entry.week_number) != live_week)
        .collect();

    let mut pigeons: BTreeMap<u32, Accumulator> = BTreeMap::new();
    for entry in &counted {
        pigeons
            .entry(entry.pigeon_number)
            .or_insert_with(|| Accumulator {
                pigeon_name: entry.pigeon_name.clone(),
                by_week: BTreeMap::new(),
            })
            .by_week
            .insert(
                entry.week_number,
                YtdWeek {
                    rank: entry.rank,
                    score: entry.score,
                    points: entry.points,
                },
            );
    }

    // rank -> number of pigeons sharing it, per week
    let mut week_ties: BTreeMap<u32, BTreeMap<u32, u32>> = BTreeMap::new();
    let mut ranks_by_week: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for accumulator in pigeons.values() {
        for (week_number, week) in &accumulator.by_week {
            ranks_by_week.entry(*week_number).or_default().push(week.rank);
        }
    }
    for (week_number, ranks) in ranks_by_week {
        week_ties.insert(week_number, tie_counts(ranks));
    }

    let mut rows: Vec<YtdRow> = pigeons
        .into_iter()
        .map(|(pigeon_number, accumulator)| {
            let points_total: f64 = accumulator.by_week.values().map(|w| w.points).sum();
            let points_worst = if accumulator.by_week.len() >= 2 {
                accumulator
                    .by_week
                    .values()
                    .map(|w| w.points)
                    .fold(f64::MIN, f64::max)
            } else {
                0.0
            };
            let top5 = accumulator.by_week.values().filter(|w| w.rank <= 5).count() as u32;
            let return_total: f64 = accumulator
                .by_week
                .iter()
                .map(|(week_number, week)| {
                    let tied = week_ties
                        .get(week_number)
                        .and_then(|ties| ties.get(&week.rank))
                        .copied()
                        .unwrap_or(1);
                    payouts.split(week.rank, tied)
                })
                .sum();

            YtdRow {
                pigeon_number,
                pigeon_name: accumulator.pigeon_name,
                by_week: accumulator.by_week,
                points_total,
                points_worst,
                points_adj: points_total - points_worst,
                top5,
                return_total,
                year_rank_pts: 0,
                year_rank_ret: 0,
            }
        })
        .collect();

    rows.sort_by_key(|row| (Reverse(cents(row.return_total)), row.pigeon_number));
    let ret_ranks = competition_ranks(&rows, |row| cents(row.return_total));
    for (row, rank) in rows.iter_mut().zip(ret_ranks) {
        row.year_rank_ret = rank;
    }

    rows.sort_by_key(|row| (cents(row.points_adj), row.pigeon_number));
    let pts_ranks = competition_ranks(&rows, |row| cents(row.points_adj));
    for (row, rank) in rows.iter_mut().zip(pts_ranks) {
        row.year_rank_pts = rank;
    }

    tracing::debug!(
        "Aggregated YTD standings for {} pigeons from {} entries (excluded live week {:?})",
        rows.len(),
        counted.len(),
        live_week
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pigeon: u32, week: u32, rank: u32, points: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            pigeon_number: pigeon,
            pigeon_name: format!("Pigeon {}", pigeon),
            week_number: week,
            rank,
            score: i64::from(rank) * 10,
            points,
        }
    }

    fn row(rows: &[YtdRow], pigeon: u32) -> &YtdRow {
        rows.iter().find(|r| r.pigeon_number == pigeon).expect("pigeon row")
    }

    #[test]
    fn test_payout_split() {
        let table = PayoutTable::default();
        assert_eq!(table.split(1, 2), 400.0);
        assert_eq!(table.split(3, 1), 160.0);
        assert_eq!(table.split(6, 1), 0.0);
        // a tie straddling the last paid place only pools the paid places
        assert_eq!(table.split(5, 2), 35.0);
        assert_eq!(table.amount_for_place(0), 0.0);
    }

    #[test]
    fn test_tie_split_in_standings() {
        let entries = vec![
            entry(1, 1, 1, 1.5),
            entry(2, 1, 1, 1.5),
            entry(3, 1, 3, 3.0),
            entry(4, 1, 4, 4.0),
            entry(5, 1, 5, 5.0),
            entry(6, 1, 6, 6.0),
        ];

        let rows = aggregate_ytd(&entries, None, &PayoutTable::default());

        assert_eq!(row(&rows, 1).return_total, 400.0);
        assert_eq!(row(&rows, 2).return_total, 400.0);
        assert_eq!(row(&rows, 3).return_total, 160.0);
        assert_eq!(row(&rows, 6).return_total, 0.0);

        assert_eq!(row(&rows, 1).year_rank_ret, 1);
        assert_eq!(row(&rows, 2).year_rank_ret, 1);
        assert_eq!(row(&rows, 3).year_rank_ret, 3);
    }

    #[test]
    fn test_points_ranking_skips_after_ties() {
        // adjusted points 10, 10, 20
        let entries = vec![
            entry(1, 1, 1, 10.0),
            entry(2, 1, 2, 10.0),
            entry(3, 1, 3, 20.0),
        ];

        let rows = aggregate_ytd(&entries, None, &PayoutTable::default());
        let ranks: Vec<(u32, u32)> = rows.iter().map(|r| (r.pigeon_number, r.year_rank_pts)).collect();
        assert_eq!(ranks, vec![(1, 1), (2, 1), (3, 3)]);
    }

    #[test]
    fn test_worst_week_dropped_only_with_two_weeks() {
        let entries = vec![
            entry(1, 1, 4, 4.0),
            entry(1, 2, 9, 9.0),
            entry(1, 3, 2, 2.0),
            entry(2, 1, 12, 12.0),
        ];

        let rows = aggregate_ytd(&entries, None, &PayoutTable::default());

        let one = row(&rows, 1);
        assert_eq!(one.points_total, 15.0);
        assert_eq!(one.points_worst, 9.0);
        assert_eq!(one.points_adj, 6.0);
        assert_eq!(one.top5, 2);
        assert_eq!(one.by_week.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        let two = row(&rows, 2);
        assert_eq!(two.points_worst, 0.0);
        assert_eq!(two.points_adj, 12.0);
        assert_eq!(two.top5, 0);
    }

    #[test]
    fn test_live_week_excluded() {
        let entries = vec![
            entry(1, 1, 1, 1.0),
            entry(2, 1, 2, 2.0),
            entry(1, 2, 2, 2.0),
            entry(2, 2, 1, 1.0),
            // only appears in the live week
            entry(3, 2, 3, 3.0),
        ];

        let rows = aggregate_ytd(&entries, Some(2), &PayoutTable::default());

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.pigeon_number != 3));
        assert!(rows.iter().all(|r| !r.by_week.contains_key(&2)));
        assert_eq!(row(&rows, 1).return_total, 530.0);
    }

    #[test]
    fn test_rankings_are_independent() {
        // pigeon 1 wins once and bombs twice; pigeon 2 is steady but never first
        let entries = vec![
            entry(1, 1, 1, 1.0),
            entry(2, 1, 2, 2.0),
            entry(3, 1, 3, 3.0),
            entry(1, 2, 3, 3.0),
            entry(2, 2, 1, 1.0),
            entry(3, 2, 2, 2.0),
            entry(1, 3, 3, 3.0),
            entry(2, 3, 2, 2.0),
            entry(3, 3, 1, 1.0),
        ];

        let rows = aggregate_ytd(&entries, None, &PayoutTable::default());

        // adjusted points: p1 7-3=4, p2 5-2=3, p3 6-3=3
        assert_eq!(row(&rows, 2).year_rank_pts, 1);
        assert_eq!(row(&rows, 3).year_rank_pts, 1);
        assert_eq!(row(&rows, 1).year_rank_pts, 3);

        // returns: p1 530+160+160, p2 270+530+270, p3 160+270+530
        assert_eq!(row(&rows, 1).return_total, 850.0);
        assert_eq!(row(&rows, 2).return_total, 1070.0);
        assert_eq!(row(&rows, 3).return_total, 960.0);
        assert_eq!(row(&rows, 2).year_rank_ret, 1);
        assert_eq!(row(&rows, 3).year_rank_ret, 2);
        assert_eq!(row(&rows, 1).year_rank_ret, 3);

        // output follows the points ranking, pigeon number breaking ties
        let order: Vec<u32> = rows.iter().map(|r| r.pigeon_number).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_three_way_tie_returns_compare_equal() {
        let entries = vec![
            entry(1, 1, 1, 2.0),
            entry(2, 1, 1, 2.0),
            entry(3, 1, 1, 2.0),
        ];

        let rows = aggregate_ytd(&entries, None, &PayoutTable::default());
        for r in &rows {
            assert!((r.return_total - 320.0).abs() < 1e-9);
            assert_eq!(r.year_rank_ret, 1);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_ytd(&[], Some(1), &PayoutTable::default()).is_empty());
    }
}
