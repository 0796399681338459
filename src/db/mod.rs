pub mod seed;
pub use seed::seed_data;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};

use crate::error::{PoolError, Result};
use crate::models::*;
use crate::services::build_leaderboard;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    // Strip the "sqlite:" prefix to get the file path, create parent dir if needed
    let file_path = database_url
        .strip_prefix("sqlite:///")
        .or_else(|| database_url.strip_prefix("sqlite://"))
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if !file_path.starts_with(":memory:") {
        if let Some(parent) = std::path::Path::new(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;
    Ok(pool)
}

/// Single-connection in-memory database; every connection to `:memory:` is its own database.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn init_database(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pigeons (
            pigeon_number INTEGER PRIMARY KEY,
            pigeon_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weeks (
            week_number INTEGER PRIMARY KEY,
            lock_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            game_id INTEGER PRIMARY KEY,
            week_number INTEGER NOT NULL,
            kickoff_at TEXT NOT NULL,
            home_abbr TEXT NOT NULL,
            away_abbr TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'scheduled',
            home_score INTEGER,
            away_score INTEGER,
            UNIQUE (week_number, home_abbr, away_abbr),
            FOREIGN KEY (week_number) REFERENCES weeks (week_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // one pick per pigeon per game
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS picks (
            pigeon_number INTEGER NOT NULL,
            game_id INTEGER NOT NULL,
            picked_home INTEGER NOT NULL,
            predicted_margin INTEGER NOT NULL CHECK (predicted_margin >= 0),
            created_at TEXT NOT NULL,
            PRIMARY KEY (pigeon_number, game_id),
            FOREIGN KEY (pigeon_number) REFERENCES pigeons (pigeon_number),
            FOREIGN KEY (game_id) REFERENCES games (game_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_games_week ON games(week_number, kickoff_at)")
        .execute(pool)
        .await?;

    tracing::info!("Database initialized successfully");
    Ok(())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

fn parse_status(raw: &str) -> GameStatus {
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!("{}; treating as scheduled", e);
        GameStatus::Scheduled
    })
}

fn game_from_row(row: &SqliteRow) -> Result<Game> {
    Ok(Game {
        game_id: row.get("game_id"),
        week_number: row.get("week_number"),
        kickoff_at: parse_timestamp(&row.get::<String, _>("kickoff_at"))?,
        home_abbr: row.get("home_abbr"),
        away_abbr: row.get("away_abbr"),
        status: parse_status(&row.get::<String, _>("status")),
        home_score: row.get("home_score"),
        away_score: row.get("away_score"),
    })
}

// Pigeon operations
pub async fn upsert_pigeon(pool: &SqlitePool, pigeon: &Pigeon) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO pigeons (pigeon_number, pigeon_name) VALUES (?, ?)
           ON CONFLICT(pigeon_number) DO UPDATE SET pigeon_name = excluded.pigeon_name"#,
    )
    .bind(pigeon.pigeon_number)
    .bind(&pigeon.pigeon_name)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_pigeons(pool: &SqlitePool) -> Result<Vec<Pigeon>> {
    let rows = sqlx::query("SELECT pigeon_number, pigeon_name FROM pigeons ORDER BY pigeon_number")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| Pigeon {
            pigeon_number: row.get("pigeon_number"),
            pigeon_name: row.get("pigeon_name"),
        })
        .collect())
}

// Week operations
pub async fn upsert_week(pool: &SqlitePool, week_number: u32, lock_at: DateTime<Utc>) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO weeks (week_number, lock_at) VALUES (?, ?)
           ON CONFLICT(week_number) DO UPDATE SET lock_at = excluded.lock_at"#,
    )
    .bind(week_number)
    .bind(lock_at.to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_weeks_at(pool: &SqlitePool, now: DateTime<Utc>) -> Result<Vec<WeekLock>> {
    let rows = sqlx::query("SELECT week_number, lock_at FROM weeks ORDER BY week_number")
        .fetch_all(pool)
        .await?;

    let mut weeks = Vec::new();
    for row in rows {
        let lock_at = parse_timestamp(&row.get::<String, _>("lock_at"))?;
        weeks.push(WeekLock {
            week_number: row.get("week_number"),
            lock_at,
            is_locked: lock_at <= now,
        });
    }
    Ok(weeks)
}

pub async fn get_week_at(pool: &SqlitePool, week_number: u32, now: DateTime<Utc>) -> Result<Option<WeekLock>> {
    let row = sqlx::query("SELECT week_number, lock_at FROM weeks WHERE week_number = ?")
        .bind(week_number)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let lock_at = parse_timestamp(&row.get::<String, _>("lock_at"))?;
            Ok(Some(WeekLock {
                week_number,
                lock_at,
                is_locked: lock_at <= now,
            }))
        }
        None => Ok(None),
    }
}

pub async fn get_locked_weeks(pool: &SqlitePool) -> Result<Vec<u32>> {
    Ok(get_weeks_at(pool, Utc::now())
        .await?
        .into_iter()
        .filter(|w| w.is_locked)
        .map(|w| w.week_number)
        .collect())
}

/// Picks are never revealed before a week locks.
pub async fn ensure_week_locked(pool: &SqlitePool, week_number: u32) -> Result<()> {
    match get_week_at(pool, week_number, Utc::now()).await? {
        Some(week) if week.is_locked => Ok(()),
        Some(_) => Err(PoolError::WeekNotLocked(week_number)),
        None => Err(PoolError::WeekNotFound(week_number)),
    }
}

// Game operations
pub async fn upsert_game(pool: &SqlitePool, game: &Game) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO games
        (game_id, week_number, kickoff_at, home_abbr, away_abbr, status, home_score, away_score)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(game_id) DO UPDATE SET
            week_number = excluded.week_number,
            kickoff_at  = excluded.kickoff_at,
            home_abbr   = excluded.home_abbr,
            away_abbr   = excluded.away_abbr,
            status      = excluded.status,
            home_score  = excluded.home_score,
            away_score  = excluded.away_score
        "#,
    )
    .bind(game.game_id)
    .bind(game.week_number)
    .bind(game.kickoff_at.to_rfc3339())
    .bind(&game.home_abbr)
    .bind(&game.away_abbr)
    .bind(game.status.as_str())
    .bind(game.home_score)
    .bind(game.away_score)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_game(pool: &SqlitePool, game_id: u32) -> Result<Option<Game>> {
    let row = sqlx::query("SELECT * FROM games WHERE game_id = ?")
        .bind(game_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(game_from_row).transpose()
}

pub async fn get_games_for_week(pool: &SqlitePool, week_number: u32) -> Result<Vec<Game>> {
    let rows = sqlx::query("SELECT * FROM games WHERE week_number = ? ORDER BY kickoff_at, game_id")
        .bind(week_number)
        .fetch_all(pool)
        .await?;

    rows.iter().map(game_from_row).collect()
}

// Pick operations
pub async fn upsert_pick(pool: &SqlitePool, pick: &PickInput) -> Result<()> {
    upsert_pick_at(pool, pick, Utc::now()).await
}

pub async fn upsert_pick_at(pool: &SqlitePool, pick: &PickInput, now: DateTime<Utc>) -> Result<()> {
    // margins are signed by side downstream, so they must also fit an i32
    let margin = i32::try_from(pick.predicted_margin)
        .ok()
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| {
            PoolError::InvalidPick(format!(
                "margin must be a whole number between 0 and {}, got {}",
                i32::MAX,
                pick.predicted_margin
            ))
        })?;

    let pigeon_known = sqlx::query("SELECT 1 FROM pigeons WHERE pigeon_number = ?")
        .bind(pick.pigeon_number)
        .fetch_optional(pool)
        .await?
        .is_some();
    if !pigeon_known {
        return Err(PoolError::InvalidPick(format!("unknown pigeon {}", pick.pigeon_number)));
    }

    let game = get_game(pool, pick.game_id)
        .await?
        .ok_or(PoolError::GameNotFound(pick.game_id))?;
    let week = get_week_at(pool, game.week_number, now)
        .await?
        .ok_or(PoolError::WeekNotFound(game.week_number))?;
    if week.is_locked {
        return Err(PoolError::WeekLocked(game.week_number));
    }

    sqlx::query(
        r#"INSERT INTO picks (pigeon_number, game_id, picked_home, predicted_margin, created_at)
           VALUES (?, ?, ?, ?, ?)
           ON CONFLICT(pigeon_number, game_id) DO UPDATE SET
               picked_home      = excluded.picked_home,
               predicted_margin = excluded.predicted_margin,
               created_at       = excluded.created_at"#,
    )
    .bind(pick.pigeon_number)
    .bind(pick.game_id)
    .bind(pick.picked_home)
    .bind(margin)
    .bind(now.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Every pigeon's pick for every game in a locked week.
///
/// Pigeons without a pick for a game get the default (home, 0), matching what the
/// board shows for an unfilled slot.
pub async fn get_week_picks(pool: &SqlitePool, week_number: u32) -> Result<Vec<WeekPick>> {
    ensure_week_locked(pool, week_number).await?;

    let rows = sqlx::query(
        r#"
        SELECT
            p.pigeon_number,
            p.pigeon_name,
            g.game_id,
            g.week_number,
            COALESCE(k.picked_home, 1) AS picked_home,
            COALESCE(k.predicted_margin, 0) AS predicted_margin,
            g.home_abbr,
            g.away_abbr,
            g.kickoff_at,
            g.status,
            g.home_score,
            g.away_score
        FROM pigeons p
        CROSS JOIN games g
        LEFT JOIN picks k ON k.pigeon_number = p.pigeon_number AND k.game_id = g.game_id
        WHERE g.week_number = ?
        ORDER BY p.pigeon_number, g.kickoff_at, g.game_id
        "#,
    )
    .bind(week_number)
    .fetch_all(pool)
    .await?;

    let mut picks = Vec::with_capacity(rows.len());
    for row in rows {
        let margin: i64 = row.get("predicted_margin");
        picks.push(WeekPick {
            pigeon_number: row.get("pigeon_number"),
            pigeon_name: row.get("pigeon_name"),
            game_id: row.get("game_id"),
            week_number: row.get("week_number"),
            picked_home: row.get::<i64, _>("picked_home") != 0,
            predicted_margin: u32::try_from(margin).unwrap_or(0),
            home_abbr: row.get("home_abbr"),
            away_abbr: row.get("away_abbr"),
            kickoff_at: parse_timestamp(&row.get::<String, _>("kickoff_at"))?,
            status: parse_status(&row.get::<String, _>("status")),
            home_score: row.get("home_score"),
            away_score: row.get("away_score"),
        });
    }

    tracing::info!("Loaded {} picks for week {}", picks.len(), week_number);
    Ok(picks)
}

pub async fn get_week_leaderboard(pool: &SqlitePool, week_number: u32) -> Result<Vec<LeaderboardEntry>> {
    let picks = get_week_picks(pool, week_number).await?;
    Ok(build_leaderboard(&picks))
}

/// Leaderboard rows for every locked week, week by week.
pub async fn get_all_locked_leaderboards(pool: &SqlitePool) -> Result<Vec<LeaderboardEntry>> {
    let mut entries = Vec::new();
    for week_number in get_locked_weeks(pool).await? {
        entries.extend(get_week_leaderboard(pool, week_number).await?);
    }
    tracing::info!("Loaded {} leaderboard rows across locked weeks", entries.len());
    Ok(entries)
}

fn summarize_status(statuses: &[GameStatus]) -> GameStatus {
    if statuses.is_empty() || statuses.iter().all(|s| *s == GameStatus::Scheduled) {
        GameStatus::Scheduled
    } else if statuses.iter().all(|s| *s == GameStatus::Final) {
        GameStatus::Final
    } else {
        GameStatus::InProgress
    }
}

/// Latest locked week (week 1 before anything locks) and how far its games have got.
pub async fn get_current_week_at(pool: &SqlitePool, now: DateTime<Utc>) -> Result<CurrentWeek> {
    let weeks = get_weeks_at(pool, now).await?;
    let week = weeks
        .iter()
        .filter(|w| w.is_locked)
        .max_by_key(|w| w.lock_at)
        .map(|w| w.week_number)
        .unwrap_or(1);

    let statuses: Vec<GameStatus> = get_games_for_week(pool, week)
        .await?
        .iter()
        .map(|g| g.status)
        .collect();

    Ok(CurrentWeek {
        week,
        status: summarize_status(&statuses),
    })
}

pub async fn get_current_week(pool: &SqlitePool) -> Result<CurrentWeek> {
    get_current_week_at(pool, Utc::now()).await
}

/// The live week is the current locked week while its games are under way. A week
/// whose games are all final is no longer live. The next picks week is the earliest
/// week still open for picks.
pub async fn get_schedule_signal_at(pool: &SqlitePool, now: DateTime<Utc>) -> Result<ScheduleSignal> {
    let weeks = get_weeks_at(pool, now).await?;
    let current = get_current_week_at(pool, now).await?;

    let current_locked = weeks
        .iter()
        .any(|w| w.week_number == current.week && w.is_locked);
    let live_week = (current_locked && current.status == GameStatus::InProgress).then_some(current.week);

    let next_picks_week = weeks
        .iter()
        .filter(|w| !w.is_locked)
        .min_by_key(|w| w.lock_at)
        .map(|w| w.week_number);

    Ok(ScheduleSignal {
        live_week,
        next_picks_week,
    })
}

pub async fn get_schedule_signal(pool: &SqlitePool) -> Result<ScheduleSignal> {
    get_schedule_signal_at(pool, Utc::now()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.unwrap();
        init_database(&pool).await.unwrap();

        for (number, name) in [(1, "Ace"), (2, "Birdie"), (3, "Coop")] {
            upsert_pigeon(&pool, &Pigeon { pigeon_number: number, pigeon_name: name.to_string() })
                .await
                .unwrap();
        }

        let now = Utc::now();
        upsert_week(&pool, 1, now - Duration::days(10)).await.unwrap();
        upsert_week(&pool, 2, now - Duration::days(3)).await.unwrap();
        upsert_week(&pool, 3, now + Duration::days(4)).await.unwrap();

        let kickoff = Utc.with_ymd_and_hms(2025, 9, 7, 17, 0, 0).unwrap();
        let games = [
            (101, 1, "KC", "BAL", GameStatus::Final, Some(27), Some(20)),
            (102, 1, "DAL", "PHI", GameStatus::Final, Some(17), Some(24)),
            (201, 2, "GB", "CHI", GameStatus::InProgress, Some(10), Some(3)),
            (202, 2, "SF", "LAR", GameStatus::Scheduled, None, None),
            (301, 3, "NE", "NYJ", GameStatus::Scheduled, None, None),
        ];
        for (id, week, home, away, status, hs, aw) in games {
            upsert_game(
                &pool,
                &Game {
                    game_id: id,
                    week_number: week,
                    kickoff_at: kickoff + Duration::days(7 * i64::from(week - 1)) + Duration::minutes(i64::from(id)),
                    home_abbr: home.to_string(),
                    away_abbr: away.to_string(),
                    status,
                    home_score: hs,
                    away_score: aw,
                },
            )
            .await
            .unwrap();
        }

        // picks are inserted straight into the table since weeks 1 and 2 are already locked
        let picks = [
            (1, 101, true, 7),
            (1, 102, false, 7),
            (2, 101, false, 3),
            (2, 102, false, 3),
            (1, 201, true, 7),
            (2, 201, true, 3),
        ];
        for (pigeon, game, home, margin) in picks {
            sqlx::query(
                "INSERT INTO picks (pigeon_number, game_id, picked_home, predicted_margin, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(pigeon as u32)
            .bind(game as u32)
            .bind(home)
            .bind(margin as u32)
            .bind(Utc::now().to_rfc3339())
            .execute(&pool)
            .await
            .unwrap();
        }

        pool
    }

    #[tokio::test]
    async fn test_week_picks_are_filled_and_ordered() {
        let pool = setup().await;
        let picks = get_week_picks(&pool, 1).await.unwrap();

        // 3 pigeons x 2 games
        assert_eq!(picks.len(), 6);
        let order: Vec<(u32, u32)> = picks.iter().map(|p| (p.pigeon_number, p.game_id)).collect();
        assert_eq!(order, vec![(1, 101), (1, 102), (2, 101), (2, 102), (3, 101), (3, 102)]);

        let unfilled = &picks[4];
        assert_eq!(unfilled.pigeon_name, "Coop");
        assert!(unfilled.picked_home);
        assert_eq!(unfilled.predicted_margin, 0);

        assert_eq!(picks[1].signed_margin(), -7);
        assert_eq!(picks[1].status, GameStatus::Final);
    }

    #[tokio::test]
    async fn test_unlocked_week_is_hidden() {
        let pool = setup().await;
        assert!(matches!(get_week_picks(&pool, 3).await, Err(PoolError::WeekNotLocked(3))));
        assert!(matches!(get_week_picks(&pool, 9).await, Err(PoolError::WeekNotFound(9))));
    }

    #[tokio::test]
    async fn test_week_leaderboard_from_store() {
        let pool = setup().await;
        let board = get_week_leaderboard(&pool, 1).await.unwrap();

        // KC +7 actual, PHI by 7 actual (-7)
        // Ace: 0 + 0; Birdie: 17 + 4; Coop: home 0 twice -> 7 + 14
        let summary: Vec<(u32, u32, i64)> = board.iter().map(|e| (e.pigeon_number, e.rank, e.score)).collect();
        assert_eq!(summary, vec![(1, 1, 0), (2, 2, 21), (3, 2, 21)]);
        assert_eq!(board[1].points, 2.5);
    }

    #[tokio::test]
    async fn test_all_locked_leaderboards_cover_locked_weeks() {
        let pool = setup().await;
        let entries = get_all_locked_leaderboards(&pool).await.unwrap();

        let weeks: std::collections::BTreeSet<u32> = entries.iter().map(|e| e.week_number).collect();
        assert_eq!(weeks.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_current_week_and_signal() {
        let pool = setup().await;
        let now = Utc::now();

        let current = get_current_week_at(&pool, now).await.unwrap();
        assert_eq!(current, CurrentWeek { week: 2, status: GameStatus::InProgress });

        let signal = get_schedule_signal_at(&pool, now).await.unwrap();
        assert_eq!(signal, ScheduleSignal { live_week: Some(2), next_picks_week: Some(3) });
    }

    #[tokio::test]
    async fn test_signal_before_kickoff_has_no_live_week() {
        let pool = setup().await;
        sqlx::query("UPDATE games SET status = 'scheduled', home_score = NULL, away_score = NULL WHERE week_number = 2")
            .execute(&pool)
            .await
            .unwrap();

        let signal = get_schedule_signal(&pool).await.unwrap();
        assert_eq!(signal.live_week, None);
        assert_eq!(signal.next_picks_week, Some(3));
    }

    #[tokio::test]
    async fn test_finished_week_is_not_live() {
        let pool = setup().await;
        sqlx::query("UPDATE games SET status = 'final', home_score = 20, away_score = 17 WHERE week_number = 2")
            .execute(&pool)
            .await
            .unwrap();

        let current = get_current_week(&pool).await.unwrap();
        assert_eq!(current, CurrentWeek { week: 2, status: GameStatus::Final });

        let signal = get_schedule_signal(&pool).await.unwrap();
        assert_eq!(signal, ScheduleSignal { live_week: None, next_picks_week: Some(3) });

        // the finished week counts toward the season standings
        let entries = get_all_locked_leaderboards(&pool).await.unwrap();
        let rows = crate::services::aggregate_ytd(&entries, signal.live_week, &Default::default());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.by_week.contains_key(&2)));
    }

    #[tokio::test]
    async fn test_upsert_pick_rules() {
        let pool = setup().await;

        let open = PickInput { pigeon_number: 3, game_id: 301, picked_home: false, predicted_margin: 6 };
        upsert_pick(&pool, &open).await.unwrap();
        // second submission replaces the first
        upsert_pick(&pool, &PickInput { predicted_margin: 10, ..open.clone() }).await.unwrap();

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM picks WHERE pigeon_number = 3 AND game_id = 301")
            .fetch_one(&pool)
            .await
            .unwrap()
            .get("n");
        assert_eq!(count, 1);
        let margin: i64 = sqlx::query("SELECT predicted_margin FROM picks WHERE pigeon_number = 3 AND game_id = 301")
            .fetch_one(&pool)
            .await
            .unwrap()
            .get("predicted_margin");
        assert_eq!(margin, 10);

        let locked = PickInput { pigeon_number: 3, game_id: 101, picked_home: true, predicted_margin: 3 };
        assert!(matches!(upsert_pick(&pool, &locked).await, Err(PoolError::WeekLocked(1))));

        let negative = PickInput { predicted_margin: -2, ..open.clone() };
        assert!(matches!(upsert_pick(&pool, &negative).await, Err(PoolError::InvalidPick(_))));

        let huge = PickInput { predicted_margin: 3_000_000_000, ..open.clone() };
        assert!(matches!(upsert_pick(&pool, &huge).await, Err(PoolError::InvalidPick(_))));
        let widest = PickInput { predicted_margin: i64::from(i32::MAX), ..open.clone() };
        upsert_pick(&pool, &widest).await.unwrap();

        let unknown_game = PickInput { game_id: 999, ..open.clone() };
        assert!(matches!(upsert_pick(&pool, &unknown_game).await, Err(PoolError::GameNotFound(999))));

        let unknown_pigeon = PickInput { pigeon_number: 42, ..open };
        assert!(matches!(upsert_pick(&pool, &unknown_pigeon).await, Err(PoolError::InvalidPick(_))));
    }

    #[test]
    fn test_summarize_status() {
        use GameStatus::*;
        assert_eq!(summarize_status(&[]), Scheduled);
        assert_eq!(summarize_status(&[Scheduled, Scheduled]), Scheduled);
        assert_eq!(summarize_status(&[Final, Final]), Final);
        assert_eq!(summarize_status(&[Final, Scheduled]), InProgress);
    }
}
