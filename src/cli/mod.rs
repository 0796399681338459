use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::db::{get_all_locked_leaderboards, get_current_week, get_schedule_signal, get_week_picks, upsert_pick};
use crate::models::{PickInput, WeekBoard, WeekState, YtdRow};
use crate::services::{aggregate_ytd, build_leaderboard, build_week_board, week_state, PayoutTable};
use crate::utils::{format_money, format_optional, format_points, MISSING};

/// Import picks from a CSV with columns pigeon_number,game_id,picked_home,predicted_margin.
/// Rows that fail validation are reported and skipped.
pub async fn import_picks(pool: &SqlitePool, path: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)?;

    println!("📥 Importing picks from {}...", path.display());

    let mut imported = 0usize;
    let mut rejected = 0usize;
    for (line, record) in reader.deserialize::<PickInput>().enumerate() {
        // header is line 1
        let line = line + 2;
        let pick = match record {
            Ok(pick) => pick,
            Err(e) => {
                rejected += 1;
                println!("   ❌ line {}: {}", line, e);
                continue;
            }
        };

        match upsert_pick(pool, &pick).await {
            Ok(()) => imported += 1,
            Err(e) => {
                rejected += 1;
                tracing::warn!("Rejected pick on line {}: {}", line, e);
                println!("   ❌ line {}: {}", line, e);
            }
        }
    }

    println!("✅ Imported {} picks ({} rejected)", imported, rejected);
    Ok(())
}

pub async fn show_week(pool: &SqlitePool, week: u32) -> Result<()> {
    let picks = get_week_picks(pool, week).await?;
    let leaderboard = build_leaderboard(&picks);
    let signal = get_schedule_signal(pool).await?;

    let board = build_week_board(week, &picks, &leaderboard, &signal);
    print_week_board(&board);
    Ok(())
}

fn print_week_board(board: &WeekBoard) {
    for line in render_week_board(board) {
        println!("{}", line);
    }
}

/// Board lines: title, then a header and one line per pigeon with the consensus row last.
fn render_week_board(board: &WeekBoard) -> Vec<String> {
    let week = format_optional(board.week_number);
    let title = match board.state {
        Some(status) if status.defaulted => {
            format!("📅 Week {} ({}, schedule unknown)", week, status.state.label())
        }
        Some(status) => format!("📅 Week {} ({})", week, status.state.label()),
        None => format!("📅 Week {}", week),
    };
    let mut lines = vec![title];

    if board.rows.is_empty() {
        lines.push("📭 No picks for this week.".to_string());
        return lines;
    }

    let header: Vec<String> = board
        .games
        .iter()
        .map(|g| format!("{}@{}", g.away_abbr, g.home_abbr))
        .collect();
    lines.push(format!("{:<4} {:<16} {:>5} {:>6}  {}", "#", "Pigeon", "Rank", "Points", header.join(" | ")));

    for row in board.rows.iter().chain(board.consensus.iter()) {
        let cells: Vec<String> = board
            .games
            .iter()
            .map(|g| {
                row.picks
                    .get(&g.game_id)
                    .map(|cell| cell.label.clone())
                    .unwrap_or_else(|| MISSING.to_string())
            })
            .collect();
        lines.push(format!(
            "{:<4} {:<16} {:>5} {:>6}  {}",
            row.pigeon_number,
            row.pigeon_name,
            format_optional(row.rank),
            row.points.map_or_else(|| MISSING.to_string(), format_points),
            cells.join(" | ")
        ));
    }

    lines
}

pub async fn show_ytd(pool: &SqlitePool, payouts: &PayoutTable, csv_path: Option<&Path>) -> Result<()> {
    let entries = get_all_locked_leaderboards(pool).await?;
    let signal = get_schedule_signal(pool).await?;
    let rows = aggregate_ytd(&entries, signal.live_week, payouts);

    if rows.is_empty() {
        println!("📭 No completed weeks yet.");
        return Ok(());
    }

    match csv_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = std::fs::File::create(path)?;
            write_ytd_csv(file, &rows)?;
            println!("✅ Exported YTD standings for {} pigeons to {}", rows.len(), path.display());
        }
        None => print_ytd(&rows),
    }

    Ok(())
}

fn print_ytd(rows: &[YtdRow]) {
    println!("🏆 Year to date");
    println!(
        "{:>4} {:>4} {:<16} {:>7} {:>6} {:>7} {:>4} {:>9}",
        "Pts#", "Ret#", "Pigeon", "Total", "Worst", "Adj", "Top5", "Return"
    );
    for row in rows {
        println!(
            "{:>4} {:>4} {:<16} {:>7} {:>6} {:>7} {:>4} {:>9}",
            row.year_rank_pts,
            row.year_rank_ret,
            row.pigeon_name,
            format_points(row.points_total),
            format_points(row.points_worst),
            format_points(row.points_adj),
            row.top5,
            format_money(row.return_total)
        );
    }
}

/// One row per pigeon, one rank column per week seen in any row.
pub fn write_ytd_csv<W: Write>(writer: W, rows: &[YtdRow]) -> crate::error::Result<()> {
    let weeks: BTreeSet<u32> = rows.iter().flat_map(|r| r.by_week.keys().copied()).collect();

    let mut writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = [
        "pigeon_number",
        "pigeon_name",
        "year_rank_pts",
        "year_rank_ret",
        "points_total",
        "points_worst",
        "points_adj",
        "top5",
        "return_total",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend(weeks.iter().map(|w| format!("week_{}_rank", w)));
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.pigeon_number.to_string(),
            row.pigeon_name.clone(),
            row.year_rank_pts.to_string(),
            row.year_rank_ret.to_string(),
            format_points(row.points_total),
            format_points(row.points_worst),
            format_points(row.points_adj),
            row.top5.to_string(),
            format_money(row.return_total),
        ];
        record.extend(
            weeks
                .iter()
                .map(|w| row.by_week.get(w).map(|wk| wk.rank.to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub async fn show_current_week(pool: &SqlitePool) -> Result<()> {
    let current = get_current_week(pool).await?;
    let signal = get_schedule_signal(pool).await?;

    println!("📅 Current week: {} ({})", current.week, current.status);
    println!("   Live week: {}", format_optional(signal.live_week));
    println!("   Next picks week: {}", format_optional(signal.next_picks_week));

    let status = week_state(current.week, &signal);
    if status.defaulted {
        println!("⚠️  Schedule has no live or upcoming week; state unknown.");
    } else if status.state == WeekState::Completed {
        println!("   Week {} is complete.", current.week);
    }

    Ok(())
}
